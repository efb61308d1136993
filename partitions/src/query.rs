use std::fmt;

use log::debug;
use util::{parse_nice, parse_number};

pub const MIN_QUERY: usize = 1;
pub const MAX_QUERY: usize = 200;

pub const INVALID_QUERY_TOKEN: &str = "Error: Invalid input for this case";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    Valid(usize),
    Invalid,
}

impl Query {
    /// One data slot: exactly one integer token in `MIN_QUERY..=MAX_QUERY`.
    pub fn from_slot(slot: &str) -> Self {
        let token = slot.trim();
        let n = match parse_nice(token, parse_number) {
            Ok(n) => n,
            Err(report) => {
                debug!("rejected query slot: {report}\n{}", report.rendered);
                return Query::Invalid;
            }
        };

        match usize::try_from(n) {
            Ok(n) if (MIN_QUERY..=MAX_QUERY).contains(&n) => Query::Valid(n),
            _ => {
                debug!("query {n} outside {MIN_QUERY}..={MAX_QUERY}");
                Query::Invalid
            }
        }
    }

    pub fn value(&self) -> Option<usize> {
        match *self {
            Query::Valid(n) => Some(n),
            Query::Invalid => None,
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::Valid(n) => write!(f, "{n}"),
            Query::Invalid => write!(f, "invalid"),
        }
    }
}
