//! Token-level combinators for markup documents.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_till, take_until, take_while, take_while1},
    character::complete::{char, multispace0},
    combinator::recognize,
    sequence::{delimited, pair, preceded, terminated, tuple},
    IResult,
};

use xname_core::ParseError;

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == ':'
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | ':' | '-' | '.')
}

/// Parse an XML name such as `Button`, `x:Name` or `Grid.RowDefinitions`.
pub fn name(input: &str) -> IResult<&str, &str> {
    recognize(pair(take_while1(is_name_start), take_while(is_name_char)))(input)
}

/// Parse a single- or double-quoted attribute value, returning the raw text.
pub fn quoted(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(char('"'), take_till(|c| c == '"'), char('"')),
        delimited(char('\''), take_till(|c| c == '\''), char('\'')),
    ))(input)
}

/// Parse `= "value"` with optional surrounding whitespace.
pub fn attribute_value(input: &str) -> IResult<&str, &str> {
    preceded(tuple((multispace0, char('='), multispace0)), quoted)(input)
}

/// Parse a `<!-- ... -->` comment.
pub fn comment(input: &str) -> IResult<&str, &str> {
    delimited(tag("<!--"), take_until("-->"), tag("-->"))(input)
}

/// Parse a `<? ... ?>` processing instruction or XML declaration.
pub fn processing_instruction(input: &str) -> IResult<&str, &str> {
    delimited(tag("<?"), take_until("?>"), tag("?>"))(input)
}

/// Parse a `<![CDATA[ ... ]]>` section, returning its raw content.
pub fn cdata(input: &str) -> IResult<&str, &str> {
    delimited(tag("<![CDATA["), take_until("]]>"), tag("]]>"))(input)
}

/// Parse a `<!DOCTYPE ...>` declaration without an internal subset.
pub fn doctype(input: &str) -> IResult<&str, &str> {
    delimited(tag("<!DOCTYPE"), take_till(|c| c == '>'), char('>'))(input)
}

/// Parse a closing tag `</name>`, returning the name.
pub fn closing_tag(input: &str) -> IResult<&str, &str> {
    delimited(tag("</"), name, terminated(multispace0, char('>')))(input)
}

/// Character data up to the next `<`.
pub fn char_data(input: &str) -> IResult<&str, &str> {
    take_till(|c| c == '<')(input)
}

/// Decode the predefined and numeric entity references in `raw`.
pub fn decode_entities(raw: &str, line: u32) -> Result<String, ParseError> {
    if !raw.contains('&') {
        return Ok(raw.to_string());
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let Some(semi) = after.find(';') else {
            return Err(ParseError::InvalidEntity {
                entity: after.chars().take(12).collect(),
                line,
            });
        };
        let entity = &after[..semi];
        out.push(decode_entity(entity).ok_or_else(|| ParseError::InvalidEntity {
            entity: entity.to_string(),
            line,
        })?);
        rest = &after[semi + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = if let Some(hex) = entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                entity.strip_prefix('#')?.parse().ok()?
            };
            char::from_u32(code)
        }
    }
}
