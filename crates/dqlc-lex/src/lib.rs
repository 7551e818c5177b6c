//! Hand-written lexer for the dynamic query compiler's filter and sort
//! clauses: char/string literals, decimals and integers, symbols, and
//! reserved-word-or-identifier words, each tried in that order.

mod cursor;
mod lexer;
mod token;

pub use lexer::lex;
pub use token::{LiteralValue, Token, TokenKind};
