use bool_hash::ObjectBooleanHashMap;
use clap::Parser;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'c', long = "target_capacity", default_value_t = 1000)]
    target_capacity: usize,

    /// Share of inserted keys removed again before the statistics are taken,
    /// in percent.
    #[arg(short = 'r', long = "remove_percent", default_value_t = 20)]
    remove_percent: u64,
}

fn main() {
    let args = Args::parse();

    println!(
        "Creating ObjectBooleanHashMap with target capacity: {}",
        args.target_capacity
    );

    let mut map: ObjectBooleanHashMap<u64> =
        match ObjectBooleanHashMap::try_with_capacity(args.target_capacity) {
            Ok(map) => map,
            Err(err) => {
                eprintln!("{err}");
                std::process::exit(2);
            }
        };

    println!("Actual capacity: {}", map.capacity());
    println!("Filling map to half load with u64 keys...");

    let num_values = (map.capacity() / 2) as u64;
    for key in 0..num_values {
        map.put(key, key % 3 == 0);
    }

    let mut removed = 0;
    for key in (0..num_values).filter(|key| key % 100 < args.remove_percent) {
        map.remove_key(&key);
        removed += 1;
    }

    println!("Inserted {} keys, removed {}", num_values, removed);
    println!(
        "Final load factor: {:.2}%",
        (map.len() as f64 / map.capacity() as f64) * 100.0
    );
    println!("Keys mapped to true: {}", map.count(|v| v));

    map.probe_histogram().print();
    map.debug_stats().print();
}
