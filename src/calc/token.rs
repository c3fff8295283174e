//! Tokenizer for calculator expressions.

use super::CalcError;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    LParen,
    RParen,
    Comma,
}

impl TokenKind {
    /// Human-readable form used in error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Number(n) => format!("number {n}"),
            Self::Ident(name) => format!("'{name}'"),
            Self::Plus => "'+'".into(),
            Self::Minus => "'-'".into(),
            Self::Star => "'*'".into(),
            Self::Slash => "'/'".into(),
            Self::Percent => "'%'".into(),
            Self::Caret => "'^'".into(),
            Self::LParen => "'('".into(),
            Self::RParen => "')'".into(),
            Self::Comma => "','".into(),
        }
    }
}

/// A token with its byte offset in the source string.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: usize,
}

/// Split `input` into tokens. Whitespace is skipped.
///
/// The keypad glyphs `×`, `÷` and `−` are accepted as aliases for `*`, `/`
/// and `-`.
///
/// # Errors
///
/// Returns [`CalcError::UnexpectedChar`] for characters outside the grammar
/// and [`CalcError::InvalidNumber`] for malformed literals such as `1.2.3`.
pub fn tokenize(input: &str) -> Result<Vec<Token>, CalcError> {
    let chars: Vec<(usize, char)> = input.char_indices().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let (pos, ch) = chars[i];

        if ch.is_whitespace() {
            i += 1;
            continue;
        }

        let starts_number = ch.is_ascii_digit() || (ch == '.' && peek_digit(&chars, i + 1));
        if starts_number {
            let (value, next) = lex_number(input, &chars, i)?;
            tokens.push(Token { kind: TokenKind::Number(value), pos });
            i = next;
            continue;
        }

        if ch.is_alphabetic() || ch == '_' {
            let start = i;
            while i < chars.len() && (chars[i].1.is_alphanumeric() || chars[i].1 == '_') {
                i += 1;
            }
            let name: String = chars[start..i].iter().map(|(_, c)| *c).collect();
            tokens.push(Token { kind: TokenKind::Ident(name), pos });
            continue;
        }

        let kind = match ch {
            '+' => TokenKind::Plus,
            '-' | '−' => TokenKind::Minus,
            '*' | '×' => TokenKind::Star,
            '/' | '÷' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '^' => TokenKind::Caret,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ',' => TokenKind::Comma,
            other => return Err(CalcError::UnexpectedChar { ch: other, pos }),
        };
        tokens.push(Token { kind, pos });
        i += 1;
    }

    Ok(tokens)
}

fn peek_digit(chars: &[(usize, char)], i: usize) -> bool {
    chars.get(i).is_some_and(|(_, c)| c.is_ascii_digit())
}

/// Lex a decimal literal starting at `start`. Returns the value and the
/// index of the first character after the literal.
fn lex_number(input: &str, chars: &[(usize, char)], start: usize) -> Result<(f64, usize), CalcError> {
    let mut i = start;
    while peek_digit(chars, i) {
        i += 1;
    }
    if chars.get(i).is_some_and(|(_, c)| *c == '.') {
        i += 1;
        while peek_digit(chars, i) {
            i += 1;
        }
    }

    // Exponent only when followed by digits, so `2e` stays `2 * e`.
    if chars.get(i).is_some_and(|(_, c)| *c == 'e' || *c == 'E') {
        let signed = chars
            .get(i + 1)
            .is_some_and(|(_, c)| *c == '+' || *c == '-');
        let digits_at = if signed { i + 2 } else { i + 1 };
        if peek_digit(chars, digits_at) {
            i = digits_at;
            while peek_digit(chars, i) {
                i += 1;
            }
        }
    }

    let begin = chars[start].0;
    let end = chars.get(i).map_or(input.len(), |(p, _)| *p);
    let text = &input[begin..end];

    if chars.get(i).is_some_and(|(_, c)| *c == '.') {
        let tail_end = chars
            .iter()
            .skip(i + 1)
            .find(|(_, c)| !c.is_ascii_digit() && *c != '.')
            .map_or(input.len(), |(p, _)| *p);
        return Err(CalcError::InvalidNumber(input[begin..tail_end].to_owned()));
    }

    let value = text
        .parse::<f64>()
        .map_err(|_| CalcError::InvalidNumber(text.to_owned()))?;
    Ok((value, i))
}
