//! Assembly line parser
//!
//! A line is a mnemonic followed by operands separated by whitespace or
//! commas. Operands are either integer literals or register names; names are
//! resolved later against the register table.

use crate::error::{AssemblerError, Result};
use crate::lexer::Token;
use logos::Logos;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Literal(u64),
    Name(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub mnemonic: String,
    pub operands: Vec<Operand>,
}

/// Parse one line. Blank and comment-only lines yield `None`.
pub fn parse_line(text: &str) -> Result<Option<ParsedLine>> {
    let mut lex = Token::lexer(text).spanned();

    let mnemonic = match lex.next() {
        None => return Ok(None),
        Some((Ok(Token::Identifier(name)), _)) => name,
        Some((Ok(_), span)) => {
            return Err(syntax_error(text, span.start, format!("expected mnemonic, found '{}'", &text[span])));
        }
        Some((Err(()), span)) => return Err(invalid_token(text, span)),
    };

    let mut operands = Vec::new();
    let mut after_comma = false;
    let mut last_comma = 0;
    for (token, span) in lex {
        let token = token.map_err(|()| invalid_token(text, span.clone()))?;
        match token {
            Token::Comma if operands.is_empty() || after_comma => {
                return Err(syntax_error(text, span.start, "unexpected ','".to_string()));
            }
            Token::Comma => {
                after_comma = true;
                last_comma = span.start;
            }
            Token::Identifier(name) => {
                operands.push(Operand::Name(name));
                after_comma = false;
            }
            Token::Number(value) | Token::Hex(value) | Token::Binary(value) => {
                operands.push(Operand::Literal(value));
                after_comma = false;
            }
        }
    }

    if after_comma {
        return Err(syntax_error(text, last_comma, "trailing ','".to_string()));
    }

    Ok(Some(ParsedLine { mnemonic, operands }))
}

fn syntax_error(text: &str, offset: usize, message: String) -> AssemblerError {
    AssemblerError::SyntaxError {
        column: column_at(text, offset),
        message,
    }
}

/// 1-based character column of byte `offset` in `text`
fn column_at(text: &str, offset: usize) -> usize {
    text.get(..offset).map_or(offset, |prefix| prefix.chars().count()) + 1
}

fn invalid_token(text: &str, span: std::ops::Range<usize>) -> AssemblerError {
    syntax_error(text, span.start, format!("invalid token '{}'", &text[span]))
}
