//! # Lexer for Pegasus assembly lines

use logos::Logos;

/// Tokens for Pegasus assembly
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r]+")]
#[logos(skip r"[;#][^\n]*")] // Skip comments
pub enum Token {
    /// Identifier (mnemonics and register names)
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    /// Decimal number
    #[regex(r"[0-9]+", |lex| lex.slice().parse::<u64>().ok())]
    Number(u64),

    /// Hexadecimal number
    #[regex(r"0[xX][0-9a-fA-F]+", |lex| u64::from_str_radix(&lex.slice()[2..], 16).ok())]
    Hex(u64),

    /// Binary number
    #[regex(r"0[bB][01]+", |lex| u64::from_str_radix(&lex.slice()[2..], 2).ok())]
    Binary(u64),

    /// Comma (optional operand separator)
    #[token(",")]
    Comma,
}
