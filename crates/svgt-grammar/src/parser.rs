use nom::{
    character::complete::{alpha1, char, multispace0},
    combinator::{all_consuming, map, opt},
    multi::many0,
    number::complete::recognize_float,
    sequence::{delimited, pair, preceded, tuple},
    Finish, IResult,
};

use crate::error::GrammarError;

/// A transform function as written, before its arguments are interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FunctionCall<'a> {
    /// The function name, e.g. `translate`.
    pub name: &'a str,
    /// The raw number tokens between the parentheses.
    pub args: Vec<&'a str>,
}

/// Optional whitespace around an optional comma.
///
/// The separator may be empty so that `10-5` reads as two numbers and `scale(2)rotate(5)`
/// as two functions, as browsers accept.
fn comma_wsp(input: &str) -> IResult<&str, ()> {
    map(tuple((multispace0, opt(char(',')), multispace0)), |_| ())(input)
}

/// One or more numbers separated by `comma_wsp`.
fn arguments(input: &str) -> IResult<&str, Vec<&str>> {
    map(
        pair(recognize_float, many0(preceded(comma_wsp, recognize_float))),
        |(first, rest)| std::iter::once(first).chain(rest).collect(),
    )(input)
}

/// `name wsp* "(" wsp* arguments? wsp* ")"`
fn function(input: &str) -> IResult<&str, FunctionCall<'_>> {
    let (input, name) = alpha1(input)?;
    let (input, _) = tuple((multispace0, char('('), multispace0))(input)?;
    let (input, args) = opt(arguments)(input)?;
    let (input, _) = pair(multispace0, char(')'))(input)?;

    Ok((
        input,
        FunctionCall {
            name,
            args: args.unwrap_or_default(),
        },
    ))
}

/// `wsp* (function (comma_wsp function)*)? wsp*`
fn transform_list(input: &str) -> IResult<&str, Vec<FunctionCall<'_>>> {
    delimited(
        multispace0,
        map(
            opt(pair(function, many0(preceded(comma_wsp, function)))),
            |calls| match calls {
                Some((first, rest)) => std::iter::once(first).chain(rest).collect(),
                None => Vec::new(),
            },
        ),
        multispace0,
    )(input)
}

/// Split a transform attribute into its function calls.
///
/// The whole input must be consumed; the error carries the byte offset where parsing
/// stopped.
pub(crate) fn parse_calls(input: &str) -> Result<Vec<FunctionCall<'_>>, GrammarError> {
    all_consuming(transform_list)(input)
        .finish()
        .map(|(_, calls)| calls)
        .map_err(|err| GrammarError::Syntax(input.len() - err.input.len()))
}
