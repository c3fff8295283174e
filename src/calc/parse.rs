//! Recursive descent parser for calculator expressions.
//!
//! Precedence, lowest first:
//! additive (`+ -`), multiplicative (`* / %`), implicit multiplication by
//! juxtaposition (`2pi`, `2(3)`), unary sign, power (`^`, right
//! associative), primary.
//!
//! Juxtaposition binding tighter than `/` makes `8pi/2pi` read as
//! `(8pi)/(2pi)`. The one exception is a number divided by a number that is
//! immediately followed by a name: `1/2pi` reads as `(1/2)pi`.
//!
//! LIMITS
//! ======
//! Parenthesis, sign and exponent nesting is capped at [`MAX_DEPTH`] and
//! input length at [`MAX_TOKENS`] tokens, so neither parsing nor evaluating
//! the resulting tree can exhaust the stack.

use super::CalcError;
use super::ast::{BinaryOp, Expr, UnaryOp};
use super::token::{Token, TokenKind, tokenize};

/// Deepest allowed nesting of parentheses, signs and exponents.
pub const MAX_DEPTH: usize = 128;

/// Longest accepted expression, in tokens.
pub const MAX_TOKENS: usize = 1024;

/// Parse expression text into an AST.
///
/// # Errors
///
/// Returns a [`CalcError`] describing the first problem found.
pub fn parse(input: &str) -> Result<Expr, CalcError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(CalcError::Empty);
    }
    if tokens.len() > MAX_TOKENS {
        return Err(CalcError::TooLong { max: MAX_TOKENS });
    }
    check_balance(&tokens)?;

    let mut cursor = Cursor { tokens: &tokens, pos: 0, depth: 0 };
    let expr = cursor.additive()?;

    if let Some(tok) = cursor.current() {
        return Err(CalcError::UnexpectedToken { found: tok.kind.describe(), pos: tok.pos });
    }
    Ok(expr)
}

fn check_balance(tokens: &[Token]) -> Result<(), CalcError> {
    let mut depth: i64 = 0;
    for tok in tokens {
        match tok.kind {
            TokenKind::LParen => depth += 1,
            TokenKind::RParen => {
                depth -= 1;
                if depth < 0 {
                    return Err(CalcError::UnbalancedParens);
                }
            }
            _ => {}
        }
    }
    if depth == 0 { Ok(()) } else { Err(CalcError::UnbalancedParens) }
}

fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) }
}

struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl Cursor<'_> {
    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek(&self) -> Option<&TokenKind> {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> Option<&TokenKind> {
        self.tokens.get(self.pos + offset).map(|t| &t.kind)
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    /// Run `f` one nesting level deeper.
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T, CalcError>) -> Result<T, CalcError> {
        if self.depth >= MAX_DEPTH {
            return Err(CalcError::TooDeep { max: MAX_DEPTH });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn additive(&mut self) -> Result<Expr, CalcError> {
        let mut lhs = self.multiplicative()?;
        loop {
            let op = match self.peek() {
                Some(TokenKind::Plus) => BinaryOp::Add,
                Some(TokenKind::Minus) => BinaryOp::Sub,
                _ => break,
            };
            self.bump();
            let rhs = self.multiplicative()?;
            lhs = binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn multiplicative(&mut self) -> Result<Expr, CalcError> {
        let mut lhs = self.implicit()?;
        loop {
            let op = match self.peek() {
                Some(TokenKind::Star) => BinaryOp::Mul,
                Some(TokenKind::Slash) => BinaryOp::Div,
                Some(TokenKind::Percent) => BinaryOp::Rem,
                _ => break,
            };
            self.bump();

            if op == BinaryOp::Div && self.is_number_over_number_name(&lhs) {
                let Some(TokenKind::Number(divisor)) = self.peek().cloned() else {
                    break;
                };
                self.bump();
                let quotient = binary(BinaryOp::Div, lhs, Expr::Number(divisor));
                lhs = self.implicit_tail(quotient)?;
                continue;
            }

            let rhs = self.implicit()?;
            lhs = binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    /// `<number> / <number><name>` with the name not called as a function.
    fn is_number_over_number_name(&self, lhs: &Expr) -> bool {
        matches!(lhs, Expr::Number(_))
            && matches!(self.peek(), Some(TokenKind::Number(_)))
            && matches!(self.peek_at(1), Some(TokenKind::Ident(_)))
            && !matches!(self.peek_at(2), Some(TokenKind::LParen))
    }

    fn implicit(&mut self) -> Result<Expr, CalcError> {
        let lhs = self.unary()?;
        self.implicit_tail(lhs)
    }

    /// Juxtaposed operands: `2pi`, `2(3)`, `(1)(2)`. A following sign is
    /// subtraction/addition, never an implicit operand.
    fn implicit_tail(&mut self, mut lhs: Expr) -> Result<Expr, CalcError> {
        while matches!(self.peek(), Some(TokenKind::Number(_) | TokenKind::Ident(_) | TokenKind::LParen)) {
            let rhs = self.power()?;
            lhs = binary(BinaryOp::Mul, lhs, rhs);
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Expr, CalcError> {
        let op = match self.peek() {
            Some(TokenKind::Plus) => UnaryOp::Plus,
            Some(TokenKind::Minus) => UnaryOp::Minus,
            _ => return self.power(),
        };
        self.bump();
        let operand = self.nested(Self::unary)?;
        Ok(Expr::Unary { op, operand: Box::new(operand) })
    }

    fn power(&mut self) -> Result<Expr, CalcError> {
        let base = self.primary()?;
        if matches!(self.peek(), Some(TokenKind::Caret)) {
            self.bump();
            // Exponent may carry its own sign: `2^-1`.
            let exponent = self.nested(Self::unary)?;
            return Ok(binary(BinaryOp::Pow, base, exponent));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Expr, CalcError> {
        let Some(Token { kind, pos }) = self.current().cloned() else {
            return Err(CalcError::UnexpectedEnd);
        };

        match kind {
            TokenKind::Number(value) => {
                self.bump();
                Ok(Expr::Number(value))
            }
            TokenKind::Ident(name) => {
                self.bump();
                if matches!(self.peek(), Some(TokenKind::LParen)) {
                    self.bump();
                    let args = self.nested(Self::args)?;
                    Ok(Expr::Call { name, args })
                } else {
                    Ok(Expr::Constant(name))
                }
            }
            TokenKind::LParen => {
                self.bump();
                let inner = self.nested(Self::additive)?;
                self.expect_rparen()?;
                Ok(inner)
            }
            other => Err(CalcError::UnexpectedToken { found: other.describe(), pos }),
        }
    }

    /// Comma-separated argument list after the opening paren.
    fn args(&mut self) -> Result<Vec<Expr>, CalcError> {
        let mut args = Vec::new();
        if matches!(self.peek(), Some(TokenKind::RParen)) {
            self.bump();
            return Ok(args);
        }
        loop {
            args.push(self.additive()?);
            if matches!(self.peek(), Some(TokenKind::Comma)) {
                self.bump();
                continue;
            }
            self.expect_rparen()?;
            return Ok(args);
        }
    }

    fn expect_rparen(&mut self) -> Result<(), CalcError> {
        match self.current() {
            Some(Token { kind: TokenKind::RParen, .. }) => {
                self.bump();
                Ok(())
            }
            Some(tok) => Err(CalcError::UnexpectedToken { found: tok.kind.describe(), pos: tok.pos }),
            None => Err(CalcError::UnbalancedParens),
        }
    }
}
