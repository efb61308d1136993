use std::{
    io::{self, BufRead},
    str::FromStr,
};

use anyhow::Result;
use itertools::Itertools;
use miette::{GraphicalReportHandler, GraphicalTheme};
use nom::{
    character::complete::{digit1, one_of},
    combinator::{map_res, opt, recognize},
    error::ParseError,
    sequence::tuple,
    IResult,
};
use nom_locate::LocatedSpan;
use nom_supreme::{
    error::{BaseErrorKind, ErrorTree, GenericErrorTree},
    final_parser::final_parser,
};

pub type Span<'a> = LocatedSpan<&'a str>;

type ErrorKind = BaseErrorKind<&'static str, Box<dyn std::error::Error + Send + Sync>>;

#[derive(thiserror::Error, Debug, miette::Diagnostic)]
#[error("bad input")]
struct BadInput<'a> {
    #[source_code]
    src: &'a str,

    #[label("{kind}")]
    bad_bit: miette::SourceSpan,

    kind: ErrorKind,
}

/// A failed full-input parse, with the diagnostic already rendered for logging.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unable to parse {input:?} at offset {offset}")]
pub struct ParseReport {
    pub input: String,
    pub offset: usize,
    pub rendered: String,
}

pub fn parse_number<'a, E>(i: Span<'a>) -> IResult<Span<'a>, i64, E>
where
    E: ParseError<Span<'a>> + nom::error::FromExternalError<Span<'a>, anyhow::Error>,
{
    map_res(recognize(tuple((opt(one_of("+-")), digit1))), |i: Span<'a>| {
        FromStr::from_str(i.fragment()).map_err(anyhow::Error::msg)
    })(i)
}

fn into_base(tree: ErrorTree<Span<'_>>) -> Option<(Span<'_>, ErrorKind)> {
    match tree {
        GenericErrorTree::Base { location, kind } => Some((location, kind)),
        GenericErrorTree::Stack { base, .. } => into_base(*base),
        GenericErrorTree::Alt(alts) => alts.into_iter().next().and_then(into_base),
    }
}

fn report(src: &str, tree: ErrorTree<Span<'_>>) -> ParseReport {
    let Some((location, kind)) = into_base(tree) else {
        return ParseReport {
            input: src.to_string(),
            offset: 0,
            rendered: "unrecognized input".to_string(),
        };
    };

    let offset = location.location_offset();
    let err = BadInput {
        src,
        bad_bit: miette::SourceSpan::new(offset.into(), 0.into()),
        kind,
    };

    let mut rendered = String::new();
    if GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor())
        .render_report(&mut rendered, &err)
        .is_err()
    {
        rendered = format!("{err}: {}", err.kind);
    }

    ParseReport {
        input: src.to_string(),
        offset,
        rendered,
    }
}

/// Runs `parse_fun` over the whole of `l`; trailing input is an error.
pub fn parse_nice<'a, T, F>(l: &'a str, parse_fun: F) -> Result<T, ParseReport>
where
    F: FnMut(Span<'a>) -> IResult<Span<'a>, T, ErrorTree<Span<'a>>>,
{
    let line_span = Span::new(l);
    let line: Result<_, ErrorTree<Span>> = final_parser(parse_fun)(line_span);
    line.map_err(|e| report(l, e))
}

pub fn read_input_as_string() -> Result<String> {
    let stdin = io::stdin();

    itertools::process_results(stdin.lock().lines(), |mut lines| lines.join("\n"))
        .map_err(anyhow::Error::msg)
}
