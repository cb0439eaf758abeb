//! Tokenizer for the call-expression grammar.
//!
//! Produces a flat token stream with byte spans so the parser can reconstruct
//! the literal source text of any sub-expression (needed for the opaque
//! fallbacks in the resolver).

use super::ParseError;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    Ident(String),
    Int(i64),
    Float(f64),
    Str(String),
    Ellipsis,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Colon,
    Dot,
    Eq,
    Plus,
    Minus,
    Star,
    DoubleStar,
    Slash,
    Percent,
}

impl TokenKind {
    pub(crate) fn describe(&self) -> &'static str {
        match self {
            TokenKind::Ident(_) => "identifier",
            TokenKind::Int(_) => "integer literal",
            TokenKind::Float(_) => "float literal",
            TokenKind::Str(_) => "string literal",
            TokenKind::Ellipsis => "'...'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::Comma => "','",
            TokenKind::Colon => "':'",
            TokenKind::Dot => "'.'",
            TokenKind::Eq => "'='",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::DoubleStar => "'**'",
            TokenKind::Slash => "'/'",
            TokenKind::Percent => "'%'",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) start: usize,
    pub(crate) end: usize,
}

pub(crate) fn tokenize(src: &str) -> Result<Vec<Token>, ParseError> {
    let bytes = src.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let c = bytes[pos];
        match c {
            b' ' | b'\t' | b'\r' | b'\n' => {
                pos += 1;
            }
            b'.' => {
                if bytes[pos..].starts_with(b"...") {
                    tokens.push(Token {
                        kind: TokenKind::Ellipsis,
                        start: pos,
                        end: pos + 3,
                    });
                    pos += 3;
                } else if pos + 1 < bytes.len() && bytes[pos + 1].is_ascii_digit() {
                    pos = lex_number(src, pos, &mut tokens)?;
                } else {
                    tokens.push(punct(TokenKind::Dot, pos, 1));
                    pos += 1;
                }
            }
            b'0'..=b'9' => {
                pos = lex_number(src, pos, &mut tokens)?;
            }
            b'\'' | b'"' => {
                pos = lex_string(src, pos, &mut tokens)?;
            }
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => {
                let start = pos;
                while pos < bytes.len()
                    && (bytes[pos].is_ascii_alphanumeric() || bytes[pos] == b'_')
                {
                    pos += 1;
                }
                tokens.push(Token {
                    kind: TokenKind::Ident(src[start..pos].to_string()),
                    start,
                    end: pos,
                });
            }
            b'(' => {
                tokens.push(punct(TokenKind::LParen, pos, 1));
                pos += 1;
            }
            b')' => {
                tokens.push(punct(TokenKind::RParen, pos, 1));
                pos += 1;
            }
            b'[' => {
                tokens.push(punct(TokenKind::LBracket, pos, 1));
                pos += 1;
            }
            b']' => {
                tokens.push(punct(TokenKind::RBracket, pos, 1));
                pos += 1;
            }
            b'{' => {
                tokens.push(punct(TokenKind::LBrace, pos, 1));
                pos += 1;
            }
            b'}' => {
                tokens.push(punct(TokenKind::RBrace, pos, 1));
                pos += 1;
            }
            b',' => {
                tokens.push(punct(TokenKind::Comma, pos, 1));
                pos += 1;
            }
            b':' => {
                tokens.push(punct(TokenKind::Colon, pos, 1));
                pos += 1;
            }
            b'=' => {
                tokens.push(punct(TokenKind::Eq, pos, 1));
                pos += 1;
            }
            b'+' => {
                tokens.push(punct(TokenKind::Plus, pos, 1));
                pos += 1;
            }
            b'-' => {
                tokens.push(punct(TokenKind::Minus, pos, 1));
                pos += 1;
            }
            b'*' => {
                if bytes.get(pos + 1) == Some(&b'*') {
                    tokens.push(punct(TokenKind::DoubleStar, pos, 2));
                    pos += 2;
                } else {
                    tokens.push(punct(TokenKind::Star, pos, 1));
                    pos += 1;
                }
            }
            b'/' => {
                tokens.push(punct(TokenKind::Slash, pos, 1));
                pos += 1;
            }
            b'%' => {
                tokens.push(punct(TokenKind::Percent, pos, 1));
                pos += 1;
            }
            _ => {
                // Report the full character, not the leading byte.
                let ch = src[pos..].chars().next().unwrap_or('\u{fffd}');
                return Err(ParseError::Syntax {
                    position: pos,
                    message: format!("unexpected character {:?}", ch),
                });
            }
        }
    }

    Ok(tokens)
}

fn punct(kind: TokenKind, start: usize, len: usize) -> Token {
    Token {
        kind,
        start,
        end: start + len,
    }
}

fn lex_number(src: &str, start: usize, tokens: &mut Vec<Token>) -> Result<usize, ParseError> {
    let bytes = src.as_bytes();
    let mut pos = start;
    let mut is_float = false;

    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    if pos < bytes.len() && bytes[pos] == b'.' && !bytes[pos..].starts_with(b"...") {
        is_float = true;
        pos += 1;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
    }
    if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
        let mut exp_end = pos + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        if exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            is_float = true;
            pos = exp_end;
            while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                pos += 1;
            }
        }
    }

    let text = &src[start..pos];
    let kind = if is_float {
        TokenKind::Float(text.parse::<f64>().map_err(|e| ParseError::Syntax {
            position: start,
            message: format!("invalid float literal '{}': {}", text, e),
        })?)
    } else {
        match text.parse::<i64>() {
            Ok(n) => TokenKind::Int(n),
            // Integers beyond i64 degrade to float rather than failing.
            Err(_) => TokenKind::Float(text.parse::<f64>().map_err(|e| {
                ParseError::Syntax {
                    position: start,
                    message: format!("invalid numeric literal '{}': {}", text, e),
                }
            })?),
        }
    };
    tokens.push(Token {
        kind,
        start,
        end: pos,
    });
    Ok(pos)
}

fn lex_string(src: &str, start: usize, tokens: &mut Vec<Token>) -> Result<usize, ParseError> {
    let quote = src.as_bytes()[start] as char;
    let mut value = String::new();
    let mut chars = src[start + 1..].char_indices();

    while let Some((offset, c)) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some((_, 'n')) => value.push('\n'),
                Some((_, 't')) => value.push('\t'),
                Some((_, 'r')) => value.push('\r'),
                Some((_, '0')) => value.push('\0'),
                Some((_, '\\')) => value.push('\\'),
                Some((_, '\'')) => value.push('\''),
                Some((_, '"')) => value.push('"'),
                // Unrecognized escapes keep the backslash, as the source
                // language does.
                Some((_, other)) => {
                    value.push('\\');
                    value.push(other);
                }
                None => {
                    return Err(ParseError::Syntax {
                        position: start,
                        message: "unterminated string literal".to_string(),
                    })
                }
            },
            c if c == quote => {
                let end = start + 1 + offset + c.len_utf8();
                tokens.push(Token {
                    kind: TokenKind::Str(value),
                    start,
                    end,
                });
                return Ok(end);
            }
            other => value.push(other),
        }
    }

    Err(ParseError::Syntax {
        position: start,
        message: "unterminated string literal".to_string(),
    })
}
