//! Reference lexer.
//!
//! Deliberately simple (spec.md §1 scopes the real grammar out): a single
//! left-to-right scan with one token of pushback. Good enough to drive the
//! parser and the example scripts in spec.md §8, not hardened against
//! adversarial input.

use crate::span::{Pathname, Span};
use crate::token::{keyword, Literal, Token, TokenKind};
use std::fmt;

#[derive(Debug, Clone)]
pub struct LexError {
    pub message: String,
    pub line: u32,
    pub pathname: Pathname,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.pathname, self.line, self.message)
    }
}

pub struct Lexer<'src> {
    src: &'src [u8],
    pos: usize,
    line: u32,
    pathname: Pathname,
}

impl<'src> Lexer<'src> {
    pub fn new(src: &'src str, pathname: Pathname) -> Self {
        Self { src: src.as_bytes(), pos: 0, line: 1, pathname }
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut out = Vec::new();
        loop {
            self.skip_trivia();
            let start = self.pos;
            let line = self.line;
            let Some(c) = self.peek() else {
                out.push(self.finish(TokenKind::Eof, start, line));
                break;
            };

            let tok = match c {
                b'0'..=b'9' => self.number(start, line)?,
                b'"' => self.string(start, line)?,
                c if is_ident_start(c) => self.ident(start, line),
                _ => self.punct(start, line)?,
            };
            out.push(tok);
        }
        Ok(out)
    }

    fn finish(&self, kind: TokenKind, start: usize, line: u32) -> Token {
        let lexeme = String::from_utf8_lossy(&self.src[start..self.pos]).into_owned();
        Token::new(kind, lexeme, Span::new(start as u32, line)).with_pathname(self.pathname.clone())
    }

    fn finish_lit(&self, kind: TokenKind, start: usize, line: u32, lit: Literal) -> Token {
        self.finish(kind, start, line).with_literal(lit)
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn peek_at(&self, n: usize) -> Option<u8> {
        self.src.get(self.pos + n).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let c = self.peek()?;
        self.pos += 1;
        if c == b'\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(b' ') | Some(b'\t') | Some(b'\r') | Some(b'\n') => {
                    self.bump();
                }
                Some(b'#') => {
                    while let Some(c) = self.peek() {
                        if c == b'\n' {
                            break;
                        }
                        self.bump();
                    }
                }
                _ => break,
            }
        }
    }

    fn number(&mut self, start: usize, line: u32) -> Result<Token, LexError> {
        let mut is_float = false;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || c == b'_' {
                self.bump();
            } else if c == b'.' && self.peek_at(1).is_some_and(|d| d.is_ascii_digit()) {
                is_float = true;
                self.bump();
            } else {
                break;
            }
        }
        let text: String = String::from_utf8_lossy(&self.src[start..self.pos])
            .chars()
            .filter(|c| *c != '_')
            .collect();
        if is_float {
            let v: f64 = text.parse().map_err(|_| self.err(line, format!("invalid float literal '{text}'")))?;
            Ok(self.finish_lit(TokenKind::Float, start, line, Literal::Float(v)))
        } else {
            let v: i64 = text.parse().map_err(|_| self.err(line, format!("invalid int literal '{text}'")))?;
            Ok(self.finish_lit(TokenKind::Int, start, line, Literal::Int(v)))
        }
    }

    fn string(&mut self, start: usize, line: u32) -> Result<Token, LexError> {
        self.bump(); // opening quote
        let mut value = String::new();
        loop {
            match self.bump() {
                None => return Err(self.err(line, "unterminated string literal".into())),
                Some(b'"') => break,
                Some(b'\\') => match self.bump() {
                    Some(b'n') => value.push('\n'),
                    Some(b't') => value.push('\t'),
                    Some(b'r') => value.push('\r'),
                    Some(b'"') => value.push('"'),
                    Some(b'\\') => value.push('\\'),
                    Some(c) => value.push(c as char),
                    None => return Err(self.err(line, "unterminated escape".into())),
                },
                Some(c) => value.push(c as char),
            }
        }
        Ok(self.finish_lit(TokenKind::Str, start, line, Literal::Str(value)))
    }

    fn ident(&mut self, start: usize, line: u32) -> Token {
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                self.bump();
            } else {
                break;
            }
        }
        let lexeme = String::from_utf8_lossy(&self.src[start..self.pos]).into_owned();
        if let Some(kw) = keyword(&lexeme) {
            let lit = match kw {
                TokenKind::True => Some(Literal::Bool(true)),
                TokenKind::False => Some(Literal::Bool(false)),
                TokenKind::Empty => Some(Literal::Empty),
                _ => None,
            };
            let tok = Token::new(kw, lexeme, Span::new(start as u32, line)).with_pathname(self.pathname.clone());
            return match lit {
                Some(l) => tok.with_literal(l),
                None => tok,
            };
        }
        self.finish(TokenKind::Ident, start, line)
    }

    fn punct(&mut self, start: usize, line: u32) -> Result<Token, LexError> {
        let c = self.bump().unwrap();
        let two = |s: &Self, b: u8| s.peek() == Some(b);
        let kind = match c {
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b'{' => TokenKind::LBrace,
            b'}' => TokenKind::RBrace,
            b'[' => TokenKind::LBracket,
            b']' => TokenKind::RBracket,
            b',' => TokenKind::Comma,
            b':' => TokenKind::Colon,
            b';' => TokenKind::Semicolon,
            b'.' => TokenKind::Dot,
            b'+' => TokenKind::Plus,
            b'-' => {
                if two(self, b'>') {
                    self.bump();
                    TokenKind::Arrow
                } else {
                    TokenKind::Minus
                }
            }
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b'%' => TokenKind::Percent,
            b'&' => TokenKind::BAnd,
            b'|' => TokenKind::BOr,
            b'^' => TokenKind::BXor,
            b'~' => TokenKind::BNot,
            b'=' => {
                if two(self, b'=') {
                    self.bump();
                    TokenKind::Eq
                } else {
                    TokenKind::Assign
                }
            }
            b'!' => {
                if two(self, b'=') {
                    self.bump();
                    TokenKind::Ne
                } else {
                    return Err(self.err(line, "unexpected '!'".into()));
                }
            }
            b'<' => {
                if two(self, b'=') {
                    self.bump();
                    TokenKind::Le
                } else if two(self, b'<') {
                    self.bump();
                    TokenKind::Shl
                } else {
                    TokenKind::Lt
                }
            }
            b'>' => {
                if two(self, b'=') {
                    self.bump();
                    TokenKind::Ge
                } else if two(self, b'>') {
                    self.bump();
                    TokenKind::Shr
                } else {
                    TokenKind::Gt
                }
            }
            other => return Err(self.err(line, format!("unexpected character '{}'", other as char))),
        };
        Ok(self.finish(kind, start, line))
    }

    fn err(&self, line: u32, message: String) -> LexError {
        LexError { message, line, pathname: self.pathname.clone() }
    }
}

fn is_ident_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

fn is_ident_continue(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_'
}
