//! Parser for boolean formulas.
//!
//! Precedence, tightest first: `~`/`!`, `&`, `^`, `|`. Binary operators are
//! left-associative.

use crate::ast::Expr;
use crate::error::{FormulaError, FormulaResult};
use crate::lexer::{SpannedToken, Token, tokenize};

/// Parse a formula into an expression tree.
pub fn parse(source: &str) -> FormulaResult<Expr> {
    let mut parser = Parser::new(source)?;
    let expr = parser.parse_expression()?;
    if let Some(t) = parser.tokens.get(parser.pos) {
        return Err(FormulaError::UnexpectedToken {
            position: t.span.start,
            expected: "end of formula".into(),
            found: t.token.to_string(),
        });
    }
    Ok(expr)
}

#[derive(Debug, Clone, Copy)]
enum BinOp {
    Or,
    Xor,
    And,
}

fn op_precedence(op: BinOp) -> u8 {
    match op {
        BinOp::Or => 1,
        BinOp::Xor => 2,
        BinOp::And => 3,
    }
}

/// Parser state.
struct Parser {
    tokens: Vec<SpannedToken>,
    pos: usize,
    end: usize,
}

impl Parser {
    fn new(source: &str) -> FormulaResult<Self> {
        let mut tokens = Vec::new();
        for result in tokenize(source) {
            match result {
                Ok(t) => tokens.push(t),
                Err((span, message)) => {
                    return Err(FormulaError::LexerError {
                        position: span.start,
                        message,
                    });
                }
            }
        }
        Ok(Self {
            tokens,
            pos: 0,
            end: source.len(),
        })
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|t| &t.token)
    }

    fn position(&self) -> usize {
        self.tokens.get(self.pos).map_or(self.end, |t| t.span.start)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos)?.token.clone();
        self.pos += 1;
        Some(token)
    }

    fn expect(&mut self, expected: Token) -> FormulaResult<()> {
        let position = self.position();
        let found = self
            .advance()
            .ok_or_else(|| FormulaError::UnexpectedEof(format!("expected {expected}")))?;
        if found != expected {
            return Err(FormulaError::UnexpectedToken {
                position,
                expected: expected.to_string(),
                found: found.to_string(),
            });
        }
        Ok(())
    }

    fn peek_binary_op(&self) -> Option<BinOp> {
        match self.peek()? {
            Token::Or => Some(BinOp::Or),
            Token::Xor => Some(BinOp::Xor),
            Token::And => Some(BinOp::And),
            _ => None,
        }
    }

    fn parse_expression(&mut self) -> FormulaResult<Expr> {
        self.parse_binary_expr(0)
    }

    /// Precedence climbing.
    fn parse_binary_expr(&mut self, min_prec: u8) -> FormulaResult<Expr> {
        let mut left = self.parse_unary_expr()?;

        while let Some(op) = self.peek_binary_op() {
            let prec = op_precedence(op);
            if prec < min_prec {
                break;
            }
            self.advance();

            let right = Box::new(self.parse_binary_expr(prec + 1)?);
            let l = Box::new(left);
            left = match op {
                BinOp::Or => Expr::Or(l, right),
                BinOp::Xor => Expr::Xor(l, right),
                BinOp::And => Expr::And(l, right),
            };
        }

        Ok(left)
    }

    fn parse_unary_expr(&mut self) -> FormulaResult<Expr> {
        if self.peek() == Some(&Token::Not) {
            self.advance();
            let inner = self.parse_unary_expr()?;
            return Ok(Expr::Not(Box::new(inner)));
        }
        self.parse_primary_expr()
    }

    fn parse_primary_expr(&mut self) -> FormulaResult<Expr> {
        let position = self.position();
        let token = self
            .advance()
            .ok_or_else(|| FormulaError::UnexpectedEof("expected a literal".into()))?;

        match token {
            Token::True => Ok(Expr::Const(true)),
            Token::False => Ok(Expr::Const(false)),
            Token::Ident(name) => Ok(Expr::Var(name)),
            Token::LParen => {
                let inner = self.parse_expression()?;
                self.expect(Token::RParen)?;
                Ok(inner)
            }
            other => Err(FormulaError::UnexpectedToken {
                position,
                expected: "variable, constant or '('".into(),
                found: other.to_string(),
            }),
        }
    }
}
