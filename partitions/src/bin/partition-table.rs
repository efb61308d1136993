use clap::Parser;
use partitions::PartitionTable;

use anyhow::{Context, Result};

const REFERENCE_VALUES: [usize; 12] = [1, 2, 3, 4, 5, 6, 7, 10, 20, 50, 100, 200];

/// Print partition numbers p(n).
#[derive(Parser, Debug)]
#[clap(version)]
struct Args {
    /// Values of n to print; defaults to a fixed reference set.
    values: Vec<usize>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let values = if args.values.is_empty() {
        REFERENCE_VALUES.to_vec()
    } else {
        args.values
    };

    let max_n = values.iter().copied().max().unwrap_or(0);
    let table = PartitionTable::build(max_n);

    for n in values {
        let count = table.get(n).context(format!("p({n}) missing from table"))?;
        println!("p({n}) = {count}");
    }

    Ok(())
}
