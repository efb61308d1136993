use partitions::write_solution;
use util::read_input_as_string;

use std::io::{self, BufWriter, Write};

use anyhow::Result;

fn main() -> Result<()> {
    env_logger::init();

    let input = read_input_as_string()?;

    let mut out = BufWriter::new(io::stdout().lock());
    write_solution(input.as_str(), &mut out)?;
    out.flush()?;

    Ok(())
}
