//! Intent syntax parser using nom.
//!
//! A one-line notation for intents, used by the CLI.
//!
//! # Syntax Overview
//!
//! ```text
//! update::users{name='renamed'}[name='test' & age=42][^!age][lim=2][off=10]
//! ──┬─── ──┬──  ────────┬─────  ──────────┬────────  ──┬──  ──────┬───────
//!   │      │            │                 │             │         │
//!   │      │            │                 │             │         └── Limit / offset
//!   │      │            │                 │             └── Sort (^ asc, ^! desc)
//!   │      │            │                 └── Criteria (joined by &)
//!   │      │            └── Values payload (create/update only)
//!   │      └── Model (table name)
//!   └── Action
//! ```

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, digit1, multispace0, satisfy},
    combinator::{cut, map, map_opt, map_res, not, opt, peek, recognize, value},
    multi::{many0, separated_list0, separated_list1},
    sequence::{pair, preceded, terminated, tuple},
    IResult,
};

use crate::ast::*;
use crate::error::{TranslateError, TranslateResult};

/// A bracketed modifier after the model name.
#[derive(Debug, Clone, PartialEq)]
enum Cage {
    Filter(Vec<(String, Value)>),
    Sort(SortKey),
    Limit(u64),
    Offset(u64),
}

/// Syntactic result before the action word is resolved.
#[derive(Debug)]
struct RawIntent<'a> {
    action: &'a str,
    model: &'a str,
    payload: Option<Vec<(String, Value)>>,
    cages: Vec<Cage>,
}

/// Parse a complete intent string.
pub fn parse(input: &str) -> TranslateResult<Intent> {
    let input = input.trim();

    let raw = match parse_raw_intent(input) {
        Ok(("", raw)) => raw,
        Ok((remaining, _)) => {
            return Err(TranslateError::parse(
                input.len() - remaining.len(),
                format!("Unexpected trailing content: '{}'", remaining),
            ));
        }
        Err(nom::Err::Error(e) | nom::Err::Failure(e)) => {
            return Err(TranslateError::parse(
                input.len() - e.input.len(),
                format!("Parse failed: {:?}", e.code),
            ));
        }
        Err(nom::Err::Incomplete(_)) => {
            return Err(TranslateError::parse(input.len(), "Unexpected end of input"));
        }
    };

    raw.into_intent()
}

impl RawIntent<'_> {
    fn into_intent(self) -> TranslateResult<Intent> {
        let action: Action = self.action.parse()?;
        let mut intent = Intent::new(self.model, action);

        match (action.writes_values(), self.payload) {
            (true, Some(pairs)) => intent.values = Some(pairs.into_iter().collect()),
            (true, None) => {
                return Err(TranslateError::invalid(format!(
                    "action '{}' requires a {{...}} payload",
                    action
                )));
            }
            (false, Some(_)) => {
                return Err(TranslateError::invalid(format!(
                    "action '{}' does not take a payload",
                    action
                )));
            }
            (false, None) => {}
        }

        for cage in self.cages {
            match cage {
                Cage::Filter(pairs) => intent
                    .criteria
                    .get_or_insert_with(Fields::new)
                    .extend(pairs),
                Cage::Sort(key) => intent.sort.get_or_insert_with(Vec::new).push(key),
                Cage::Limit(n) => intent.limit = Some(n),
                Cage::Offset(n) => intent.offset = Some(n),
            }
        }

        Ok(intent)
    }
}

fn parse_raw_intent(input: &str) -> IResult<&str, RawIntent<'_>> {
    let (input, action) = parse_word(input)?;
    let (input, _) = tag("::")(input)?;
    let (input, model) = parse_identifier(input)?;
    let (input, payload) = opt(preceded(multispace0, parse_payload))(input)?;
    let (input, cages) = many0(preceded(multispace0, parse_cage))(input)?;

    Ok((
        input,
        RawIntent {
            action,
            model,
            payload,
            cages,
        },
    ))
}

/// Parse the action word. Resolution happens later so unknown words
/// surface as `UnsupportedAction` rather than a syntax error.
fn parse_word(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphabetic() || c == '_')(input)
}

/// Parse an identifier (table name, field name). Dots allow `db.table`.
fn parse_identifier(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_' || c == '.')(input)
}

/// Parse a `{field=value, ...}` payload.
fn parse_payload(input: &str) -> IResult<&str, Vec<(String, Value)>> {
    let (input, _) = char('{')(input)?;
    let (input, _) = multispace0(input)?;
    let (input, pairs) =
        separated_list0(tuple((multispace0, char(','), multispace0)), parse_pair)(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = char('}')(input)?;

    Ok((input, pairs))
}

/// Parse a single cage [...].
fn parse_cage(input: &str) -> IResult<&str, Cage> {
    let (input, _) = char('[')(input)?;
    let (input, _) = multispace0(input)?;
    let (input, cage) = alt((
        parse_limit_cage,
        parse_offset_cage,
        parse_sort_cage,
        parse_filter_cage,
    ))(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = char(']')(input)?;

    Ok((input, cage))
}

/// Parse limit cage [lim=N]. Once `lim=` matched, a bad count is fatal.
fn parse_limit_cage(input: &str) -> IResult<&str, Cage> {
    map(preceded(pair(tag("lim"), equals), cut(parse_count)), Cage::Limit)(input)
}

/// Parse offset cage [off=N].
fn parse_offset_cage(input: &str) -> IResult<&str, Cage> {
    map(preceded(pair(tag("off"), equals), cut(parse_count)), Cage::Offset)(input)
}

/// Parse sort cage [^col] or [^!col].
fn parse_sort_cage(input: &str) -> IResult<&str, Cage> {
    let (input, _) = char('^')(input)?;
    let (input, desc) = opt(char('!'))(input)?;
    let (input, col) = parse_identifier(input)?;

    let direction = if desc.is_some() {
        Direction::Desc
    } else {
        Direction::Asc
    };

    Ok((input, Cage::Sort(SortKey::new(col, direction))))
}

/// Parse `field=value` conditions joined by `&`.
fn parse_filter_cage(input: &str) -> IResult<&str, Cage> {
    map(
        separated_list1(tuple((multispace0, char('&'), multispace0)), parse_pair),
        Cage::Filter,
    )(input)
}

fn parse_pair(input: &str) -> IResult<&str, (String, Value)> {
    let (input, field) = parse_identifier(input)?;
    let (input, _) = equals(input)?;
    let (input, value) = parse_value(input)?;

    Ok((input, (field.to_string(), value)))
}

/// `=` with optional surrounding whitespace.
fn equals(input: &str) -> IResult<&str, char> {
    let (input, _) = multispace0(input)?;
    let (input, c) = char('=')(input)?;
    let (input, _) = multispace0(input)?;
    Ok((input, c))
}

fn parse_count(input: &str) -> IResult<&str, u64> {
    map_res(digit1, str::parse::<u64>)(input)
}

/// Parse a value.
fn parse_value(input: &str) -> IResult<&str, Value> {
    alt((
        value(Value::Null, keyword("null")),
        value(Value::Bool(true), keyword("true")),
        value(Value::Bool(false), keyword("false")),
        // Number (float or int)
        parse_number,
        // Quoted string
        parse_quoted_string,
        // Bare identifier (treated as string)
        map(parse_identifier, |s| Value::String(s.to_string())),
    ))(input)
}

/// A literal word that is not the prefix of a longer identifier.
fn keyword<'a>(word: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    terminated(
        tag(word),
        not(peek(satisfy(|c: char| c.is_alphanumeric() || c == '_' || c == '.'))),
    )
}

/// Parse a number (integer or float).
fn parse_number(input: &str) -> IResult<&str, Value> {
    map_opt(
        recognize(tuple((
            opt(char('-')),
            digit1,
            opt(pair(char('.'), digit1)),
        ))),
        |num_str: &str| {
            if num_str.contains('.') {
                num_str.parse().ok().map(Value::Float)
            } else {
                num_str.parse().ok().map(Value::Int)
            }
        },
    )(input)
}

/// Parse a quoted string.
fn parse_quoted_string(input: &str) -> IResult<&str, Value> {
    let (input, _) = char('\'')(input)?;
    let (input, content) = take_while(|c| c != '\'')(input)?;
    let (input, _) = char('\'')(input)?;

    Ok((input, Value::String(content.to_string())))
}
