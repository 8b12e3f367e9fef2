use winnow::ModalResult;
use winnow::ascii::{dec_int, multispace0};
use winnow::combinator::{alt, delimited, eof, separated, terminated};
use winnow::prelude::*;

/// Parse a list of indices given on the command line.
///
/// Accepts comma separated integers, optionally wrapped in brackets:
/// `0,2,4`, `[0, 2, 4]` and `[]` are all fine.
pub(crate) fn parse_indices(s: &str) -> Option<Vec<i64>> {
    fn index(input: &mut &str) -> ModalResult<i64> {
        dec_int.parse_next(input)
    }

    fn bare(input: &mut &str) -> ModalResult<Vec<i64>> {
        separated(0.., index, (multispace0, ',', multispace0)).parse_next(input)
    }

    fn bracketed(input: &mut &str) -> ModalResult<Vec<i64>> {
        delimited(('[', multispace0), bare, (multispace0, ']')).parse_next(input)
    }

    let mut input = s.trim();
    terminated(alt((bracketed, bare)), eof)
        .parse_next(&mut input)
        .ok()
}
