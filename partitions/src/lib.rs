use std::{error::Error, io};

use itertools::Itertools;
use log::{debug, error};

pub mod batch;
pub mod query;
pub mod table;

pub use batch::{BatchError, Convention, PartialBatchTolerance, QueryBatch};
pub use query::{Query, INVALID_QUERY_TOKEN, MAX_QUERY, MIN_QUERY};
pub use table::{count_ways, PartitionTable};

/// One output line per query, in batch order.
pub fn answers<'a>(
    batch: &'a QueryBatch,
    table: &'a PartitionTable,
) -> impl Iterator<Item = String> + 'a {
    batch
        .iter()
        .map(|query| match query.value().and_then(|n| table.get(n)) {
            Some(count) => count.to_string(),
            None => INVALID_QUERY_TOKEN.to_string(),
        })
}

pub fn process(input: &str) -> Result<String, BatchError> {
    let batch: QueryBatch = input.parse()?;
    let table = PartitionTable::build(batch.max_valid());

    let output = answers(&batch, &table).join("\n");
    Ok(output)
}

fn report_fatal(e: &BatchError) {
    error!("{e}");
    if let Some(report) = e.source() {
        debug!("{report}");
    }
}

/// Like [`process`], but a fatal batch error becomes the whole output.
pub fn solve(input: &str) -> String {
    process(input).unwrap_or_else(|e| {
        report_fatal(&e);
        e.to_string()
    })
}

/// Streaming form of [`solve`]: lines are written as they are produced, followed by a newline.
pub fn write_solution<W: io::Write>(input: &str, out: &mut W) -> io::Result<()> {
    match input.parse::<QueryBatch>() {
        Ok(batch) => {
            let table = PartitionTable::build(batch.max_valid());
            for (i, line) in answers(&batch, &table).enumerate() {
                if i > 0 {
                    out.write_all(b"\n")?;
                }
                out.write_all(line.as_bytes())?;
            }
        }
        Err(e) => {
            report_fatal(&e);
            write!(out, "{e}")?;
        }
    }

    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const TEST_INPUT: &str = include_str!("../data/test_input");
    const TEST_INPUT_INLINE: &str = include_str!("../data/test_input_inline");

    #[test]
    fn line_oriented_sample() {
        let res = process(TEST_INPUT);
        assert!(res.is_ok());
        assert_eq!(res.unwrap(), "1\n2\n3\n5\n7\n15");
    }

    #[test]
    fn token_oriented_sample() {
        let res = process(TEST_INPUT_INLINE);
        assert!(res.is_ok());
        assert_eq!(res.unwrap(), "1\n2\n3\n5\n7\n15");
    }

    #[rstest]
    #[case("1 5", "7")]
    #[case("1\n5", "7")]
    #[case("7 1 2 3 4 5 7", "1\n2\n3\n5\n7\n15")]
    #[case("1 1", "1")]
    #[case("1 200", "3972999029388")]
    #[case("2 100 150", "190569292\n40853235313")]
    #[case("5 6 10 15 20 25", "11\n42\n176\n627\n1958")]
    #[case("4 11 13 17 19", "56\n101\n297\n490")]
    #[case("10 1 2 3 4 5 6 7 8 9 10", "1\n2\n3\n5\n7\n11\n15\n22\n30\n42")]
    #[case("0", "")]
    #[case("0 5 6", "")]
    #[case("3", "Error: Invalid input for this case\nError: Invalid input for this case\nError: Invalid input for this case")]
    #[case("2 0 4", "Error: Invalid input for this case\n5")]
    #[case("2\n201\n3", "Error: Invalid input for this case\n3")]
    #[case("2\nfive\n6", "Error: Invalid input for this case\n11")]
    #[case("3\n4\n5", "5\n7\nError: Invalid input for this case")]
    #[case("3\n1 2 3", "1\n2\n3")]
    #[case("4\n1 2\n3 4", "1\n2\n3\n5")]
    #[case("3\n6\n\n7 abc\n", "11\n15\nError: Invalid input for this case")]
    #[case("+1 +5", "7")]
    #[case("2 -4 abc", "Error: Invalid input for this case\nError: Invalid input for this case")]
    fn end_to_end(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(solve(input), expected);
    }

    #[rstest]
    #[case("", "Error: Input is empty.")]
    #[case("\n   \n", "Error: Input is empty.")]
    #[case("many\n1", "Error: Invalid integer for number of test cases (t).")]
    #[case("-1\n1", "Error: Number of test cases cannot be negative.")]
    fn fatal_errors(#[case] input: &str, #[case] expected: &str) {
        assert!(process(input).is_err());
        assert_eq!(solve(input), expected);
    }

    #[test]
    fn out_of_table_query_is_invalid() {
        let batch: QueryBatch = "2 3 9".parse().unwrap();
        let table = PartitionTable::build(5);
        assert_eq!(
            answers(&batch, &table).collect_vec(),
            vec!["3", "Error: Invalid input for this case"]
        );
    }

    #[test]
    fn large_batch_matches_single_counts() {
        let input = format!("{} {}", MAX_QUERY, (MIN_QUERY..=MAX_QUERY).join(" "));
        let expected = (MIN_QUERY..=MAX_QUERY).map(count_ways).join("\n");
        assert_eq!(solve(&input), expected);
    }

    struct CappedWriter {
        written: Vec<u8>,
        cap: usize,
    }

    impl io::Write for CappedWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.written.len() + buf.len() > self.cap {
                return Err(io::Error::new(io::ErrorKind::WriteZero, "full"));
            }
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[rstest]
    #[case("9223372036854775807")]
    #[case("1000000000000\n5")]
    fn huge_count_streams_without_padding_up_front(#[case] input: &str) {
        let mut out = CappedWriter {
            written: Vec::new(),
            cap: 4096,
        };
        assert!(write_solution(input, &mut out).is_err());
        assert!(String::from_utf8(out.written)
            .unwrap()
            .contains(INVALID_QUERY_TOKEN));
    }

    #[rstest]
    #[case("2 5 6", "7\n11\n")]
    #[case("2\n5", "7\nError: Invalid input for this case\n")]
    #[case("0", "\n")]
    #[case("", "Error: Input is empty.\n")]
    fn written_solution(#[case] input: &str, #[case] expected: &str) {
        let mut out = Vec::new();
        assert!(write_solution(input, &mut out).is_ok());
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }
}
