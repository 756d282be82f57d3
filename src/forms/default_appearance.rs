//! Default appearance (`/DA`) strings.
//!
//! PDF Spec: ISO 32000-1:2008, Section 12.7.3.3 (Variable Text)
//!
//! A DA string is a fragment of content stream such as `/Helv 0 Tf 0 g`.
//! Only the font operator and the fill color operators matter to form
//! appearances; everything else is tokenized and ignored.
//!
//! Parsing is lenient. Strings found in real documents are often sloppy,
//! so a bad number just drops the assignment it belonged to, and an
//! unreadable token ends the scan with whatever was collected so far.

use crate::color::Color;
use crate::writer::content_stream::Num;
use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::char,
    combinator::{map, value},
    sequence::{delimited, preceded},
};

/// Font, size and color read from a DA string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefaultAppearance {
    /// Font resource name, without the leading slash
    pub font: Option<String>,
    /// Font size; `0` means auto
    pub size: Option<f32>,
    /// Non-black fill color
    pub color: Option<Color>,
}

#[derive(Debug, Clone, PartialEq)]
enum Token<'a> {
    /// Numeric operand, kept as text until an operator consumes it
    Number(&'a str),
    Name(String),
    /// Strings, arrays and dictionaries carry nothing of interest
    Ignored,
    Operator(&'a str),
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n' | '\0' | '\x0C')
}

fn is_delimiter(c: char) -> bool {
    matches!(c, '/' | '%' | '(' | ')' | '<' | '>' | '[' | ']' | '{' | '}')
}

/// Skip whitespace and `%` comments.
fn skip_ws(mut input: &str) -> &str {
    loop {
        let trimmed = input.trim_start_matches(is_whitespace);
        if let Some(rest) = trimmed.strip_prefix('%') {
            input = rest.trim_start_matches(|c| c != '\r' && c != '\n');
        } else {
            return trimmed;
        }
    }
}

fn number(input: &str) -> IResult<&str, Token<'_>> {
    map(
        take_while1(|c: char| c.is_ascii_digit() || matches!(c, '+' | '-' | '.')),
        Token::Number,
    )(input)
}

fn name(input: &str) -> IResult<&str, Token<'_>> {
    preceded(
        char('/'),
        map(
            take_while(|c: char| !is_whitespace(c) && !is_delimiter(c)),
            |raw: &str| Token::Name(decode_name_escapes(raw)),
        ),
    )(input)
}

fn literal_string(input: &str) -> IResult<&str, Token<'_>> {
    let (rest, _) = char('(')(input)?;
    let mut depth = 1;
    let mut escaped = false;
    for (i, c) in rest.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok((&rest[i + 1..], Token::Ignored));
                }
            },
            _ => {},
        }
    }
    Err(nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Tag)))
}

fn hex_string(input: &str) -> IResult<&str, Token<'_>> {
    value(
        Token::Ignored,
        delimited(
            char('<'),
            take_while(|c: char| c.is_ascii_hexdigit() || is_whitespace(c)),
            char('>'),
        ),
    )(input)
}

fn delimiter(input: &str) -> IResult<&str, Token<'_>> {
    value(Token::Ignored, alt((tag("<<"), tag(">>"), tag("["), tag("]"))))(input)
}

fn operator(input: &str) -> IResult<&str, Token<'_>> {
    map(
        take_while1(|c: char| c.is_ascii_alphabetic() || matches!(c, '*' | '\'' | '"')),
        Token::Operator,
    )(input)
}

fn token(input: &str) -> IResult<&str, Token<'_>> {
    let input = skip_ws(input);
    alt((name, number, delimiter, literal_string, hex_string, operator))(input)
}

/// Decode `#xx` escapes in a name.
fn decode_name_escapes(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(pos) = rest.find('#') {
        out.push_str(&rest[..pos]);
        let hex = rest.get(pos + 1..pos + 3);
        match hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
            Some(byte) => {
                out.push(byte as char);
                rest = &rest[pos + 3..];
            },
            None => {
                out.push('#');
                rest = &rest[pos + 1..];
            },
        }
    }
    out.push_str(rest);
    out
}

fn numbers<const N: usize>(stack: &[Token<'_>]) -> Option<[f32; N]> {
    if stack.len() < N {
        return None;
    }
    let mut out = [0.0f32; N];
    for (slot, tok) in out.iter_mut().zip(&stack[stack.len() - N..]) {
        *slot = match tok {
            Token::Number(text) => text.parse().ok()?,
            _ => return None,
        };
    }
    Some(out)
}

impl DefaultAppearance {
    /// Parse a DA string.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_oxide_forms::color::Color;
    /// use pdf_oxide_forms::forms::DefaultAppearance;
    ///
    /// let da = DefaultAppearance::parse("/Helv 12 Tf 0 0 1 rg");
    /// assert_eq!(da.font.as_deref(), Some("Helv"));
    /// assert_eq!(da.size, Some(12.0));
    /// assert_eq!(da.color, Some(Color::Rgb(0.0, 0.0, 1.0)));
    /// ```
    pub fn parse(da: &str) -> Self {
        let mut result = DefaultAppearance::default();
        let mut stack: Vec<Token<'_>> = Vec::new();
        let mut input = da;

        loop {
            if skip_ws(input).is_empty() {
                break;
            }
            let (rest, tok) = match token(input) {
                Ok(parsed) => parsed,
                Err(_) => {
                    log::debug!("Stopped reading default appearance at {:?}", skip_ws(input));
                    break;
                },
            };
            input = rest;

            let op = match tok {
                Token::Operator(op) => op,
                Token::Ignored => continue,
                operand => {
                    stack.push(operand);
                    continue;
                },
            };

            match op {
                "Tf" => {
                    if let Some([size]) = numbers::<1>(&stack) {
                        result.size = Some(size);
                    }
                    if stack.len() >= 2 {
                        if let Token::Name(font) = &stack[stack.len() - 2] {
                            result.font = Some(font.clone());
                        }
                    }
                },
                "g" => {
                    if let Some([gray]) = numbers::<1>(&stack) {
                        if gray != 0.0 {
                            result.color = Some(Color::Gray(gray));
                        }
                    }
                },
                "rg" => {
                    if let Some([r, g, b]) = numbers::<3>(&stack) {
                        result.color = Some(Color::Rgb(r, g, b));
                    }
                },
                "k" => {
                    if let Some([c, m, y, k]) = numbers::<4>(&stack) {
                        result.color = Some(Color::Cmyk(c, m, y, k));
                    }
                },
                _ => {},
            }
            stack.clear();
        }

        result
    }

    /// Write a DA string such as `/F1 12 Tf 0 0 1 rg`.
    ///
    /// Spot colors cannot be expressed here; they are dropped with an
    /// error in the log.
    pub fn generate(font: &str, size: f32, color: Option<&Color>) -> String {
        let mut da = format!("/{} {} Tf", font, Num(size));
        match color {
            Some(Color::Gray(g)) => da.push_str(&format!(" {} g", Num(*g))),
            Some(Color::Rgb(r, g, b)) => {
                da.push_str(&format!(" {} {} {} rg", Num(*r), Num(*g), Num(*b)))
            },
            Some(Color::Cmyk(c, m, y, k)) => {
                da.push_str(&format!(" {} {} {} {} k", Num(*c), Num(*m), Num(*y), Num(*k)))
            },
            Some(Color::Separation { colorant, .. }) => {
                log::error!(
                    "Separation color '{}' is not supported in default appearances; omitted",
                    colorant
                );
            },
            None => {},
        }
        da
    }

    /// Serialize this appearance back to a DA string.
    ///
    /// Missing parts fall back to the given font name and size 0.
    pub fn to_da_string(&self, fallback_font: &str) -> String {
        Self::generate(
            self.font.as_deref().unwrap_or(fallback_font),
            self.size.unwrap_or(0.0),
            self.color.as_ref(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_and_gray() {
        let da = DefaultAppearance::parse("/Helv 0 Tf 0.5 g");
        assert_eq!(da.font.as_deref(), Some("Helv"));
        assert_eq!(da.size, Some(0.0));
        assert_eq!(da.color, Some(Color::Gray(0.5)));
    }

    #[test]
    fn test_black_gray_is_not_a_color() {
        let da = DefaultAppearance::parse("/Helv 10 Tf 0 g");
        assert_eq!(da.color, None);
    }

    #[test]
    fn test_cmyk() {
        let da = DefaultAppearance::parse("/Cour 9 Tf 0 1 1 0 k");
        assert_eq!(da.color, Some(Color::Cmyk(0.0, 1.0, 1.0, 0.0)));
    }

    #[test]
    fn test_other_operators_clear_stack() {
        // "w" consumes 0.2; the following g must not see stale operands
        let da = DefaultAppearance::parse("1 0 0 0.2 w g /F1 8 Tf");
        assert_eq!(da.color, None);
        assert_eq!(da.font.as_deref(), Some("F1"));
    }

    #[test]
    fn test_malformed_number_skips_assignment() {
        let da = DefaultAppearance::parse("/Helv 1.2.3 Tf 1 0 0 rg");
        assert_eq!(da.font.as_deref(), Some("Helv"));
        assert_eq!(da.size, None);
        assert_eq!(da.color, Some(Color::Rgb(1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_comments_and_strings_are_skipped() {
        let da = DefaultAppearance::parse("% comment\n/TiRo 11 Tf (text) Tj <4142> Tj [1 2] 0 d 0 0 1 rg");
        assert_eq!(da.font.as_deref(), Some("TiRo"));
        assert_eq!(da.size, Some(11.0));
        assert_eq!(da.color, Some(Color::Rgb(0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_tokenizer_error_keeps_partial_result() {
        let da = DefaultAppearance::parse("/Helv 12 Tf ) 1 g");
        assert_eq!(da.size, Some(12.0));
        assert_eq!(da.color, None);
    }

    #[test]
    fn test_name_escapes() {
        let da = DefaultAppearance::parse("/My#20Font 10 Tf");
        assert_eq!(da.font.as_deref(), Some("My Font"));
    }

    #[test]
    fn test_empty() {
        assert_eq!(DefaultAppearance::parse(""), DefaultAppearance::default());
        assert_eq!(DefaultAppearance::parse("   "), DefaultAppearance::default());
    }

    #[test]
    fn test_generate() {
        assert_eq!(
            DefaultAppearance::generate("F1", 12.0, Some(&Color::Rgb(0.0, 0.0, 1.0))),
            "/F1 12 Tf 0 0 1 rg"
        );
        assert_eq!(
            DefaultAppearance::generate("F2", 0.0, Some(&Color::Gray(0.25))),
            "/F2 0 Tf 0.25 g"
        );
        assert_eq!(DefaultAppearance::generate("F3", 9.5, None), "/F3 9.5 Tf");
    }

    #[test]
    fn test_generate_omits_separation() {
        let spot = Color::Separation {
            colorant: "Gold".to_string(),
            tint: 1.0,
        };
        assert_eq!(DefaultAppearance::generate("F1", 10.0, Some(&spot)), "/F1 10 Tf");
    }

    #[test]
    fn test_to_da_string_fallbacks() {
        let da = DefaultAppearance::parse("0 0 1 rg");
        assert_eq!(da.to_da_string("Helv"), "/Helv 0 Tf 0 0 1 rg");
    }
}
