use std::{iter, str::FromStr};

use itertools::Itertools;
use log::{info, warn};
use thiserror::Error;
use util::{parse_nice, parse_number, ParseReport};

use crate::query::Query;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BatchError {
    #[error("Error: Input is empty.")]
    Empty,

    #[error("Error: Invalid integer for number of test cases (t).")]
    InvalidCount(#[source] ParseReport),

    #[error("Error: Number of test cases cannot be negative.")]
    NegativeCount(i64),
}

/// How the query count is laid out; only decides the [`PartialBatchTolerance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convention {
    /// Count alone on the first line, queries on the following lines.
    LineOriented,
    /// Count and queries share the first line.
    TokenOriented,
}

/// What happens when fewer queries are supplied than the count declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartialBatchTolerance {
    PadMissing,
    TruncateToSupplied,
}

impl Convention {
    pub fn tolerance(&self) -> PartialBatchTolerance {
        match self {
            Convention::LineOriented => PartialBatchTolerance::PadMissing,
            Convention::TokenOriented => PartialBatchTolerance::TruncateToSupplied,
        }
    }
}

/// Supplied queries in input order, followed by `missing` padded invalid ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryBatch {
    convention: Convention,
    declared: usize,
    supplied: Vec<Query>,
    missing: usize,
}

impl QueryBatch {
    pub fn convention(&self) -> Convention {
        self.convention
    }

    pub fn declared(&self) -> usize {
        self.declared
    }

    pub fn supplied(&self) -> &[Query] {
        &self.supplied
    }

    pub fn missing(&self) -> usize {
        self.missing
    }

    /// Every query to answer; padding is produced lazily.
    pub fn iter(&self) -> impl Iterator<Item = Query> + '_ {
        self.supplied
            .iter()
            .copied()
            .chain(iter::repeat(Query::Invalid).take(self.missing))
    }

    pub fn len(&self) -> usize {
        self.supplied.len() + self.missing
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Largest valid query, 0 when there is none.
    pub fn max_valid(&self) -> usize {
        self.supplied
            .iter()
            .filter_map(Query::value)
            .max()
            .unwrap_or(0)
    }
}

fn parse_count(token: &str) -> Result<usize, BatchError> {
    let count = parse_nice(token, parse_number).map_err(BatchError::InvalidCount)?;
    usize::try_from(count).map_err(|_| BatchError::NegativeCount(count))
}

impl FromStr for QueryBatch {
    type Err = BatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s.lines().skip_while(|l| l.trim().is_empty());

        let mut head = lines.next().ok_or(BatchError::Empty)?.split_whitespace();
        let declared = parse_count(head.next().ok_or(BatchError::Empty)?)?;

        let mut head = head.peekable();
        let convention = if head.peek().is_some() {
            Convention::TokenOriented
        } else {
            Convention::LineOriented
        };

        let supplied = head
            .chain(lines.flat_map(str::split_whitespace))
            .take(declared)
            .map(Query::from_slot)
            .collect_vec();

        let mut missing = 0;
        if supplied.len() < declared {
            match convention.tolerance() {
                PartialBatchTolerance::PadMissing => {
                    missing = declared - supplied.len();
                    warn!("{missing} of {declared} queries missing, marking them invalid");
                }
                PartialBatchTolerance::TruncateToSupplied => {
                    warn!(
                        "only {} of {declared} queries supplied, answering those",
                        supplied.len()
                    );
                }
            }
        }

        info!(
            "{convention:?} batch, {declared} declared: {}",
            supplied.iter().join(", ")
        );

        Ok(Self {
            convention,
            declared,
            supplied,
            missing,
        })
    }
}
