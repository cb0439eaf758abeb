//! Recursive-descent parser producing a closed expression tree.
//!
//! The tree is a deliberately small subset of the source language's expression
//! grammar: exactly the node kinds the resolver knows how to interpret.
//! Anything else fails at parse time, so unsupported shapes surface as a
//! [`ParseError`] instead of a silently wrong value. Every node carries its
//! byte span into the original text, which is how the resolver reconstructs
//! opaque source fallbacks.

use super::lexer::{tokenize, Token, TokenKind};
use super::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Span {
    pub(crate) start: usize,
    pub(crate) end: usize,
}

impl Span {
    pub(crate) fn slice<'a>(&self, src: &'a str) -> &'a str {
        &src[self.start..self.end]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BinOpKind {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ExprKind {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    NoneLit,
    Ellipsis,
    Name(String),
    Attribute {
        base: Box<Expr>,
        attr: String,
    },
    Call {
        func: Box<Expr>,
        args: Vec<Expr>,
        kwargs: Vec<(String, Expr)>,
    },
    List(Vec<Expr>),
    Tuple(Vec<Expr>),
    Dict(Vec<(Expr, Expr)>),
    UnaryNeg(Box<Expr>),
    BinOp {
        left: Box<Expr>,
        op: BinOpKind,
        right: Box<Expr>,
    },
    Lambda {
        body: Box<Expr>,
    },
    Subscript {
        base: Box<Expr>,
        index: Box<Expr>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Expr {
    pub(crate) kind: ExprKind,
    pub(crate) span: Span,
}

/// Parse `src` as a single expression (the whole input must be consumed).
pub(crate) fn parse_expression(src: &str) -> Result<Expr, ParseError> {
    let tokens = tokenize(src)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        src_len: src.len(),
    };
    let expr = parser.parse_expr()?;
    if let Some(tok) = parser.peek() {
        return Err(ParseError::Syntax {
            position: tok.start,
            message: format!("unexpected {} after expression", tok.kind.describe()),
        });
    }
    Ok(expr)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    src_len: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<&TokenKind> {
        self.peek().map(|t| &t.kind)
    }

    fn peek2_kind(&self) -> Option<&TokenKind> {
        self.tokens.get(self.pos + 1).map(|t| &t.kind)
    }

    fn advance(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<Token, ParseError> {
        if self.at(kind) {
            return Ok(self.advance().unwrap());
        }
        match self.peek() {
            Some(tok) => Err(ParseError::Syntax {
                position: tok.start,
                message: format!("expected {}, found {}", kind.describe(), tok.kind.describe()),
            }),
            None => Err(self.eof(kind.describe())),
        }
    }

    fn eof(&self, expected: &str) -> ParseError {
        ParseError::Syntax {
            position: self.src_len,
            message: format!("expected {}, found end of input", expected),
        }
    }

    fn at(&self, kind: &TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    // expr := lambda | arithmetic
    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        let is_lambda =
            matches!(self.peek_kind(), Some(TokenKind::Ident(name)) if name == "lambda");
        if is_lambda {
            return self.parse_lambda();
        }
        self.parse_addsub()
    }

    fn parse_lambda(&mut self) -> Result<Expr, ParseError> {
        let start = self.advance().unwrap().start; // 'lambda'
        // Parameter list carries no information for resolution; skip to ':'.
        loop {
            match self.peek_kind() {
                Some(TokenKind::Colon) => {
                    self.advance();
                    break;
                }
                Some(_) => {
                    self.advance();
                }
                None => return Err(self.eof("':' in lambda")),
            }
        }
        let body = self.parse_expr()?;
        let span = Span {
            start,
            end: body.span.end,
        };
        Ok(Expr {
            kind: ExprKind::Lambda {
                body: Box::new(body),
            },
            span,
        })
    }

    fn parse_addsub(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_muldiv()?;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Plus) => BinOpKind::Add,
                Some(TokenKind::Minus) => BinOpKind::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_muldiv()?;
            left = binop(left, op, right);
        }
        Ok(left)
    }

    fn parse_muldiv(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Star) => BinOpKind::Mul,
                Some(TokenKind::Slash) => BinOpKind::Div,
                Some(TokenKind::Percent) => BinOpKind::Mod,
                _ => break,
            };
            self.advance();
            let right = self.parse_unary()?;
            left = binop(left, op, right);
        }
        Ok(left)
    }

    // Unary minus binds looser than '**' on its operand, matching the source
    // grammar (-2**2 negates the power).
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        if self.at(&TokenKind::Minus) {
            let start = self.advance().unwrap().start;
            let inner = self.parse_unary()?;
            let span = Span {
                start,
                end: inner.span.end,
            };
            return Ok(Expr {
                kind: ExprKind::UnaryNeg(Box::new(inner)),
                span,
            });
        }
        if self.at(&TokenKind::Plus) {
            self.advance();
            return self.parse_unary();
        }
        self.parse_power()
    }

    fn parse_power(&mut self) -> Result<Expr, ParseError> {
        let base = self.parse_postfix()?;
        if self.at(&TokenKind::DoubleStar) {
            self.advance();
            let exponent = self.parse_unary()?;
            return Ok(binop(base, BinOpKind::Pow, exponent));
        }
        Ok(base)
    }

    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_atom()?;
        loop {
            match self.peek_kind() {
                Some(TokenKind::Dot) => {
                    self.advance();
                    let tok = self.advance().ok_or_else(|| self.eof("attribute name"))?;
                    let attr = match tok.kind {
                        TokenKind::Ident(name) => name,
                        other => {
                            return Err(ParseError::Syntax {
                                position: tok.start,
                                message: format!(
                                    "expected attribute name after '.', found {}",
                                    other.describe()
                                ),
                            })
                        }
                    };
                    let span = Span {
                        start: expr.span.start,
                        end: tok.end,
                    };
                    expr = Expr {
                        kind: ExprKind::Attribute {
                            base: Box::new(expr),
                            attr,
                        },
                        span,
                    };
                }
                Some(TokenKind::LParen) => {
                    self.advance();
                    let (args, kwargs) = self.parse_call_args()?;
                    let close = self.expect(&TokenKind::RParen)?;
                    let span = Span {
                        start: expr.span.start,
                        end: close.end,
                    };
                    expr = Expr {
                        kind: ExprKind::Call {
                            func: Box::new(expr),
                            args,
                            kwargs,
                        },
                        span,
                    };
                }
                Some(TokenKind::LBracket) => {
                    self.advance();
                    let index = self.parse_expr()?;
                    let close = self.expect(&TokenKind::RBracket)?;
                    let span = Span {
                        start: expr.span.start,
                        end: close.end,
                    };
                    expr = Expr {
                        kind: ExprKind::Subscript {
                            base: Box::new(expr),
                            index: Box::new(index),
                        },
                        span,
                    };
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    fn parse_call_args(&mut self) -> Result<(Vec<Expr>, Vec<(String, Expr)>), ParseError> {
        let mut args = Vec::new();
        let mut kwargs: Vec<(String, Expr)> = Vec::new();

        loop {
            if self.at(&TokenKind::RParen) {
                break;
            }
            let is_kwarg = matches!(self.peek_kind(), Some(TokenKind::Ident(_)))
                && self.peek2_kind() == Some(&TokenKind::Eq);
            if is_kwarg {
                let name = match self.advance().unwrap().kind {
                    TokenKind::Ident(name) => name,
                    _ => unreachable!(),
                };
                self.advance(); // '='
                let value = self.parse_expr()?;
                kwargs.push((name, value));
            } else {
                args.push(self.parse_expr()?);
            }
            if self.at(&TokenKind::Comma) {
                self.advance();
            } else {
                break;
            }
        }
        Ok((args, kwargs))
    }

    fn parse_atom(&mut self) -> Result<Expr, ParseError> {
        let tok = self.advance().ok_or_else(|| self.eof("expression"))?;
        let span = Span {
            start: tok.start,
            end: tok.end,
        };
        match tok.kind {
            TokenKind::Int(n) => Ok(Expr {
                kind: ExprKind::Int(n),
                span,
            }),
            TokenKind::Float(f) => Ok(Expr {
                kind: ExprKind::Float(f),
                span,
            }),
            TokenKind::Str(s) => Ok(Expr {
                kind: ExprKind::Str(s),
                span,
            }),
            TokenKind::Ellipsis => Ok(Expr {
                kind: ExprKind::Ellipsis,
                span,
            }),
            TokenKind::Ident(name) => {
                let kind = match name.as_str() {
                    "True" => ExprKind::Bool(true),
                    "False" => ExprKind::Bool(false),
                    "None" => ExprKind::NoneLit,
                    _ => ExprKind::Name(name),
                };
                Ok(Expr { kind, span })
            }
            TokenKind::LBracket => self.parse_list(span.start),
            TokenKind::LBrace => self.parse_dict(span.start),
            TokenKind::LParen => self.parse_paren(span.start),
            other => Err(ParseError::Syntax {
                position: span.start,
                message: format!("unexpected {} at start of expression", other.describe()),
            }),
        }
    }

    fn parse_list(&mut self, start: usize) -> Result<Expr, ParseError> {
        let mut items = Vec::new();
        loop {
            if self.at(&TokenKind::RBracket) {
                break;
            }
            items.push(self.parse_expr()?);
            if self.at(&TokenKind::Comma) {
                self.advance();
            } else {
                break;
            }
        }
        let close = self.expect(&TokenKind::RBracket)?;
        Ok(Expr {
            kind: ExprKind::List(items),
            span: Span {
                start,
                end: close.end,
            },
        })
    }

    fn parse_dict(&mut self, start: usize) -> Result<Expr, ParseError> {
        let mut entries = Vec::new();
        loop {
            if self.at(&TokenKind::RBrace) {
                break;
            }
            let key = self.parse_expr()?;
            self.expect(&TokenKind::Colon)?;
            let value = self.parse_expr()?;
            entries.push((key, value));
            if self.at(&TokenKind::Comma) {
                self.advance();
            } else {
                break;
            }
        }
        let close = self.expect(&TokenKind::RBrace)?;
        Ok(Expr {
            kind: ExprKind::Dict(entries),
            span: Span {
                start,
                end: close.end,
            },
        })
    }

    // '(' ... ')' — grouping when a single element with no trailing comma,
    // tuple otherwise.
    fn parse_paren(&mut self, start: usize) -> Result<Expr, ParseError> {
        if self.at(&TokenKind::RParen) {
            let close = self.advance().unwrap();
            return Ok(Expr {
                kind: ExprKind::Tuple(Vec::new()),
                span: Span {
                    start,
                    end: close.end,
                },
            });
        }
        let mut items = Vec::new();
        let mut saw_comma = false;
        loop {
            items.push(self.parse_expr()?);
            if self.at(&TokenKind::Comma) {
                self.advance();
                saw_comma = true;
                if self.at(&TokenKind::RParen) {
                    break;
                }
            } else {
                break;
            }
        }
        let close = self.expect(&TokenKind::RParen)?;
        if items.len() == 1 && !saw_comma {
            return Ok(items.pop().unwrap());
        }
        Ok(Expr {
            kind: ExprKind::Tuple(items),
            span: Span {
                start,
                end: close.end,
            },
        })
    }
}

fn binop(left: Expr, op: BinOpKind, right: Expr) -> Expr {
    let span = Span {
        start: left.span.start,
        end: right.span.end,
    };
    Expr {
        kind: ExprKind::BinOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        },
        span,
    }
}
