use clap::Parser;
use quadprobe::ProbingHashTable;
use quadprobe::TableConfig;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'c', long = "target_capacity", default_value_t = 1000)]
    target_capacity: usize,

    #[arg(short = 'l', long = "load_factor", default_value_t = 0.45)]
    load_factor: f64,

    /// Fraction of inserted keys to remove before printing statistics.
    #[arg(short = 'r', long = "remove_fraction", default_value_t = 0.25)]
    remove_fraction: f64,
}

fn main() {
    let args = Args::parse();

    let config = TableConfig::default()
        .with_capacity(args.target_capacity)
        .with_load_factor(args.load_factor);
    let mut table: ProbingHashTable<u64, u64> = match ProbingHashTable::with_config(config) {
        Ok(table) => table,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    println!(
        "Created table: capacity {}, load factor {}, threshold {}",
        table.capacity(),
        table.load_factor(),
        table.threshold()
    );

    let num_values = args.target_capacity as u64;
    for value in 0..num_values {
        if table.insert(value, value).is_some() {
            panic!("Value already exists in table: {}", value);
        }
    }
    println!(
        "Inserted {} values; capacity is now {}",
        table.len(),
        table.capacity()
    );

    let to_remove = (num_values as f64 * args.remove_fraction.clamp(0.0, 1.0)) as u64;
    for value in 0..to_remove {
        table.remove(&(value * 7 % num_values.max(1)));
    }
    println!(
        "Removed keys; {} live entries, {} tombstones",
        table.len(),
        table.tombstones()
    );

    table.print_probe_histogram();
    table.debug_stats().print();

    // Lookups shorten chains that run through tombstones.
    for value in 0..num_values {
        table.get(&value);
    }
    println!("After one lookup pass over every key:");
    table.print_probe_histogram();
}
