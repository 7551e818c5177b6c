use dqlc_util::{DynamicQueryError, Result, Span};

use crate::cursor::Cursor;
use crate::token::{LiteralValue, Token, TokenKind};

/// Reserved words; compared case-insensitively and emitted as `Symbol`
/// with this exact canonical spelling.
const RESERVED_WORDS: &[&str] = &[
    "AND",
    "OR",
    "NOT",
    "BETWEEN",
    "IN",
    "IS",
    "CONTAINS",
    "STARTSWITH",
    "ENDSWITH",
];

const TWO_CHAR_SYMBOLS: &[&str] = &["<=", ">=", "<>"];
const ONE_CHAR_SYMBOLS: &[char] = &['[', ']', '(', ')', ',', '+', '-', '*', '/', '%', '^', '=', '<', '>'];

/// Lex an entire clause into a flat token list.
///
/// Fails at the first character that matches no lexeme class, quoting it
/// at its 1-based column — the lexer does not attempt recovery, matching
/// the "an error aborts the current compile" rule that governs the whole
/// pipeline.
pub fn lex(source: &str) -> Result<Vec<Token>> {
    let chars: Vec<char> = source.chars().collect();
    let mut cursor = Cursor::new(&chars);
    let mut tokens = Vec::new();

    loop {
        skip_whitespace(&mut cursor);
        if cursor.is_eof() {
            break;
        }
        tokens.push(lex_one(&mut cursor)?);
    }

    Ok(tokens)
}

fn skip_whitespace(cursor: &mut Cursor<'_>) {
    while matches!(cursor.peek(), Some(c) if c.is_whitespace()) {
        cursor.bump();
    }
}

fn lex_one(cursor: &mut Cursor<'_>) -> Result<Token> {
    let start = cursor.pos();
    let c = cursor.peek().expect("lex_one called at end of input");

    if c == '\'' {
        return lex_char_literal(cursor, start);
    }
    if c == '"' {
        return lex_string_literal(cursor, start);
    }
    if c.is_ascii_digit() || (c == '.' && matches!(cursor.peek_at(1), Some(d) if d.is_ascii_digit())) {
        return lex_number(cursor, start);
    }
    if let Some(token) = try_lex_symbol(cursor, start) {
        return Ok(token);
    }
    if c.is_alphanumeric() || c == '_' {
        return Ok(lex_word(cursor, start));
    }

    let span = Span::point(start as u32 + 1);
    Err(DynamicQueryError::syntax(span, c.to_string()))
}

fn lex_char_literal(cursor: &mut Cursor<'_>, start: usize) -> Result<Token> {
    cursor.bump(); // opening '\''
    let value = match cursor.bump() {
        Some('\\') => match cursor.bump() {
            Some('\\') => '\\',
            Some('\'') => '\'',
            Some('t') => '\t',
            Some('r') => '\r',
            Some('n') => '\n',
            _ => return Err(unterminated(cursor, start)),
        },
        Some('\'') => return Err(unterminated(cursor, start)),
        Some(other) => other,
        None => return Err(unterminated(cursor, start)),
    };
    if cursor.bump() != Some('\'') {
        return Err(unterminated(cursor, start));
    }
    Ok(make_token(cursor, start, TokenKind::Value(LiteralValue::Char(value))))
}

fn lex_string_literal(cursor: &mut Cursor<'_>, start: usize) -> Result<Token> {
    cursor.bump(); // opening quote
    let mut value = String::new();
    loop {
        match cursor.bump() {
            Some('"') => break,
            Some(c) => value.push(c),
            None => return Err(unterminated(cursor, start)),
        }
    }
    Ok(make_token(cursor, start, TokenKind::Value(LiteralValue::String(value))))
}

fn lex_number(cursor: &mut Cursor<'_>, start: usize) -> Result<Token> {
    let mut int_part = String::new();
    while matches!(cursor.peek(), Some(c) if c.is_ascii_digit()) {
        int_part.push(cursor.bump().unwrap());
    }

    if cursor.peek() == Some('.') {
        cursor.bump();
        let mut frac_part = String::new();
        while matches!(cursor.peek(), Some(c) if c.is_ascii_digit()) {
            frac_part.push(cursor.bump().unwrap());
        }
        let text_value = format!("{int_part}.{frac_part}");
        let parsed: f64 = text_value.parse().map_err(|_| unterminated(cursor, start))?;
        return Ok(make_token(cursor, start, TokenKind::Value(LiteralValue::Double(parsed))));
    }

    let parsed: i64 = int_part.parse().map_err(|_| unterminated(cursor, start))?;
    Ok(make_token(cursor, start, TokenKind::Value(LiteralValue::Int(parsed))))
}

fn try_lex_symbol(cursor: &mut Cursor<'_>, start: usize) -> Option<Token> {
    for sym in TWO_CHAR_SYMBOLS {
        let a = cursor.peek();
        let b = cursor.peek_at(1);
        if let (Some(a), Some(b)) = (a, b) {
            let candidate: String = [a, b].iter().collect();
            if &candidate == sym {
                cursor.eat(2);
                return Some(make_token(cursor, start, TokenKind::Symbol((*sym).to_string())));
            }
        }
    }
    let c = cursor.peek()?;
    if ONE_CHAR_SYMBOLS.contains(&c) {
        cursor.bump();
        return Some(make_token(cursor, start, TokenKind::Symbol(c.to_string())));
    }
    None
}

fn lex_word(cursor: &mut Cursor<'_>, start: usize) -> Token {
    let mut word = String::new();
    while matches!(cursor.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
        word.push(cursor.bump().unwrap());
    }

    let lower = word.to_ascii_lowercase();
    let kind = if lower == "null" {
        TokenKind::Value(LiteralValue::Null)
    } else if lower == "true" {
        TokenKind::Value(LiteralValue::Bool(true))
    } else if lower == "false" {
        TokenKind::Value(LiteralValue::Bool(false))
    } else if let Some(reserved) = RESERVED_WORDS.iter().find(|r| r.eq_ignore_ascii_case(&word)) {
        TokenKind::Symbol((*reserved).to_string())
    } else {
        TokenKind::Named(word.clone())
    };

    make_token(cursor, start, kind)
}

fn make_token(cursor: &Cursor<'_>, start: usize, kind: TokenKind) -> Token {
    let end = cursor.pos();
    // text is reconstructed from kind where the cursor's consumed range
    // doesn't already round-trip (e.g. char-literal escapes); callers that
    // need the exact source slice use `span` against the original clause.
    let text = match &kind {
        TokenKind::Symbol(s) => s.clone(),
        TokenKind::Named(s) => s.clone(),
        TokenKind::Value(LiteralValue::Null) => "null".to_string(),
        TokenKind::Value(LiteralValue::Bool(b)) => b.to_string(),
        TokenKind::Value(LiteralValue::Int(i)) => i.to_string(),
        TokenKind::Value(LiteralValue::Double(d)) => d.to_string(),
        TokenKind::Value(LiteralValue::Char(c)) => format!("'{c}'"),
        TokenKind::Value(LiteralValue::String(s)) => format!("\"{s}\""),
    };
    Token {
        kind,
        text,
        span: Span::new(start as u32 + 1, end as u32 + 1),
    }
}

fn unterminated(cursor: &Cursor<'_>, start: usize) -> DynamicQueryError {
    let span = Span::new(start as u32 + 1, cursor.pos() as u32 + 1);
    DynamicQueryError::syntax(span, "")
}
