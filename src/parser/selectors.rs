//! `nom` combinators for selector syntax.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_until, take_while1},
    character::complete::{char, multispace0},
    combinator::{map, not, opt, success},
    multi::{many0, many1},
    sequence::{delimited, preceded, tuple},
    IResult,
};

use crate::selector::comma_sequence::CommaSequence;
use crate::selector::sequence::{Combinator, Member, Sequence};
use crate::selector::simple::{PseudoKind, SimpleSelector};
use crate::selector::simple_sequence::SimpleSequence;
use crate::tokens::{ScriptNode, Token};

/// Parses a comma-separated selector group (e.g., "a.foo, #bar").
pub(crate) fn parse_comma_sequence(input: &str) -> IResult<&str, CommaSequence> {
    let (input, first) = parse_sequence(input)?;
    let (input, rest) = many0(preceded(
        tuple((multispace0, char(','))),
        parse_sequence,
    ))(input)?;

    let mut members = vec![first];
    members.extend(rest);
    Ok((input, CommaSequence::new(members)))
}

/// Parses a combinator sequence (e.g., "nav > a.active b").
///
/// Descendant combination is adjacency in the member list; explicit
/// `>`, `+`, `~` become combinator members, and newlines in selector
/// whitespace are recorded as formatting markers.
fn parse_sequence(input: &str) -> IResult<&str, Sequence> {
    let (input, leading) = multispace0(input)?;
    let mut members: Vec<Member> = Vec::new();
    push_newlines(&mut members, leading);

    let (mut input, first) = parse_compound(input)?;
    members.push(Member::Simple(first));

    loop {
        let (rem, ws) = multispace0(input)?;

        let combinator: IResult<&str, Combinator> = alt((
            map(char('>'), |_| Combinator::Child),
            map(char('+'), |_| Combinator::AdjacentSibling),
            map(char('~'), |_| Combinator::GeneralSibling),
        ))(rem);

        if let Ok((after_op, op)) = combinator {
            let (after_ws, ws2) = multispace0(after_op)?;
            match parse_compound(after_ws) {
                Ok((next, compound)) => {
                    members.push(Member::Combinator(op));
                    push_newlines(&mut members, ws);
                    push_newlines(&mut members, ws2);
                    members.push(Member::Simple(compound));
                    input = next;
                    continue;
                }
                Err(_) => break, // trailing operator; caller reports the leftover
            }
        }

        if !ws.is_empty() {
            match parse_compound(rem) {
                Ok((next, compound)) => {
                    push_newlines(&mut members, ws);
                    members.push(Member::Simple(compound));
                    input = next;
                    continue;
                }
                Err(_) => break, // just trailing whitespace
            }
        }

        break;
    }

    Ok((input, Sequence::new(members)))
}

fn push_newlines(members: &mut Vec<Member>, whitespace: &str) {
    for _ in 0..whitespace.matches('\n').count() {
        members.push(Member::Newline);
    }
}

/// Parses a compound selector (e.g., "a.foo#bar:hover").
fn parse_compound(input: &str) -> IResult<&str, SimpleSequence> {
    let (input, first) = parse_simple(input)?;
    let (input, rest) = many0(parse_simple)(input)?;

    let mut members = vec![first];
    members.extend(rest);
    Ok((input, SimpleSequence::new(members)))
}

/// Parses a single simple selector.
fn parse_simple(input: &str) -> IResult<&str, SimpleSelector> {
    alt((
        map(char('&'), |_| SimpleSelector::Parent),
        map(preceded(char('.'), name_tokens), |name| {
            SimpleSelector::Class { name }
        }),
        parse_negation,
        parse_pseudo,
        parse_attribute,
        map(parse_script, |script| SimpleSelector::Interpolation {
            script,
        }),
        map(preceded(char('#'), name_tokens), |name| {
            SimpleSelector::Id { name }
        }),
        parse_element_or_universal,
    ))(input)
}

/// An identifier, possibly interleaved with `#{...}` interpolation.
fn name_tokens(input: &str) -> IResult<&str, Vec<Token>> {
    many1(alt((
        map(parse_script, Token::Script),
        map(parse_ident, |s: &str| Token::Literal(s.to_string())),
    )))(input)
}

fn parse_ident(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '-' || c == '_')(input)
}

fn parse_script(input: &str) -> IResult<&str, ScriptNode> {
    map(delimited(tag("#{"), take_until("}"), char('}')), |s: &str| {
        ScriptNode::new(s)
    })(input)
}

fn parse_negation(input: &str) -> IResult<&str, SimpleSelector> {
    map(
        delimited(tag(":not("), parse_simple, char(')')),
        |inner| SimpleSelector::Negation {
            inner: Box::new(inner),
        },
    )(input)
}

fn parse_pseudo(input: &str) -> IResult<&str, SimpleSelector> {
    let (input, marker) = alt((tag("::"), tag(":")))(input)?;
    let kind = if marker == "::" {
        PseudoKind::Element
    } else {
        PseudoKind::Class
    };
    let (input, name) = name_tokens(input)?;
    let (input, arg) = opt(delimited(char('('), take_until(")"), char(')')))(input)?;
    let arg = arg.map(|a: &str| vec![Token::Literal(a.to_string())]);
    Ok((input, SimpleSelector::Pseudo { kind, name, arg }))
}

fn parse_attribute(input: &str) -> IResult<&str, SimpleSelector> {
    let (input, _) = char('[')(input)?;
    let (input, namespace) = opt(parse_namespace_prefix)(input)?;
    let (input, name) = name_tokens(input)?;
    let (input, op) = opt(alt((
        tag("~="),
        tag("|="),
        tag("^="),
        tag("$="),
        tag("*="),
        tag("="),
    )))(input)?;
    let (input, value) = if op.is_some() {
        let (input, value) = take_until("]")(input)?;
        (input, Some(vec![Token::Literal(value.to_string())]))
    } else {
        (input, None)
    };
    let (input, _) = char(']')(input)?;

    Ok((
        input,
        SimpleSelector::Attribute {
            name,
            namespace,
            op: op.map(String::from),
            value,
        },
    ))
}

/// A namespace prefix: `ns|`, `*|`, or the bare `|` of the explicit
/// no-namespace form. `|=` belongs to attribute operators, not here.
fn parse_namespace_prefix(input: &str) -> IResult<&str, Vec<Token>> {
    let (input, ns) = alt((
        map(tag("*"), |s: &str| vec![Token::Literal(s.to_string())]),
        name_tokens,
        success(vec![Token::Literal(String::new())]),
    ))(input)?;
    let (input, _) = char('|')(input)?;
    let (input, _) = not(char('='))(input)?;
    Ok((input, ns))
}

fn parse_element_or_universal(input: &str) -> IResult<&str, SimpleSelector> {
    let (input, namespace) = opt(parse_namespace_prefix)(input)?;
    if let Ok((input, _)) = char::<&str, nom::error::Error<&str>>('*')(input) {
        return Ok((input, SimpleSelector::Universal { namespace }));
    }
    let (input, name) = name_tokens(input)?;
    Ok((input, SimpleSelector::Element { name, namespace }))
}
