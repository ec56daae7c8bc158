use crate::config::Config;
use crate::error::{ParseErr, ParseErrKind};
use crate::expr::*;
use crate::native::NativeCall;
use crate::registry::{Declaration, Registry};
use crate::token::*;
use crate::value::Val;

use log::trace;
use std::rc::Rc;

type ExprResult = Result<ExprRef, ParseErr>;

/// Parses one statement.
///
/// `function` and `const` declarations are collected while parsing and only
/// written to the registry once the whole statement has parsed.
pub struct Parser<'a> {
    tokens: &'a [Token],
    index: usize,
    registry: &'a mut Registry,
    pending: Vec<Declaration>,
    depth: usize,
    max_depth: usize,
    eof: Token,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token], registry: &'a mut Registry, config: &Config) -> Parser<'a> {
        let (line, column) = tokens.last().map_or((1, 1), |t| (t.line, t.column));
        Parser {
            tokens,
            index: 0,
            registry,
            pending: vec![],
            depth: 0,
            max_depth: config.max_depth,
            eof: Token::new(TokenType::Eof, "", line, column),
        }
    }

    fn match_next_lits<const N: usize>(&mut self, ttypes: [TokenType; N]) -> bool {
        let res = ttypes.contains(&self.peek().data);
        if res {
            self.index += 1;
        }
        res
    }

    fn peek(&self) -> &Token {
        self.tokens.get(self.index).unwrap_or(&self.eof)
    }

    fn advance(&mut self) -> Token {
        let tok = self.peek().clone();
        if tok.data != TokenType::Eof {
            self.index += 1;
        }
        tok
    }

    fn check(&self, tok: TokenType) -> bool {
        self.peek().data == tok
    }

    fn error(&self, kind: ParseErrKind) -> ParseErr {
        ParseErr::new(kind, self.peek())
    }

    fn consume(&mut self, tok: TokenType) -> Result<Token, ParseErr> {
        if !self.check(tok) {
            return Err(self.error(ParseErrKind::ExpectedToken(tok)));
        }
        Ok(self.advance())
    }

    fn consume_identifier(&mut self) -> Result<Rc<str>, ParseErr> {
        Ok(self.consume(TokenType::Identifier)?.text)
    }

    fn consume_pair(&mut self, tok: TokenType, other: &Token) -> Result<(), ParseErr> {
        if !self.check(tok) {
            return Err(self.error(ParseErrKind::Unclosed(tok, other.data, other.line)));
        }
        self.index += 1;
        Ok(())
    }

    fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseErr>,
    ) -> Result<T, ParseErr> {
        if self.depth >= self.max_depth {
            return Err(self.error(ParseErrKind::TooDeep(self.max_depth)));
        }
        self.depth += 1;
        let res = f(self);
        self.depth -= 1;
        res
    }

    fn is_function(&self, name: &str) -> bool {
        self.registry.has_function(name) || self.pending_arity(name).is_some()
    }

    fn pending_arity(&self, name: &str) -> Option<usize> {
        self.pending.iter().find_map(|decl| match decl {
            Declaration::Function(fun) if &*fun.name == name => Some(fun.params.len()),
            _ => None,
        })
    }

    fn user_arity(&self, name: &str) -> Option<usize> {
        self.registry
            .function(name)
            .map(|fun| fun.params.len())
            .or_else(|| self.pending_arity(name))
    }

    // Parsing the actual grammar.
    pub fn parse(mut self) -> Result<Expr, ParseErr> {
        let expr = self.expression()?;
        self.match_next_lits([TokenType::Semicolon]);
        if !self.check(TokenType::Eof) {
            return Err(self.error(ParseErrKind::UnexpectedToken));
        }

        for decl in self.pending.drain(..) {
            trace!("commit declaration {}", decl.name());
            self.registry.commit(decl);
        }
        Ok(*expr)
    }

    fn expression(&mut self) -> ExprResult {
        self.nested(Self::term)
    }

    fn term(&mut self) -> ExprResult {
        let mut expr = self.factor()?;

        while self.match_next_lits([TokenType::Plus, TokenType::Minus]) {
            let op = self.binary_op()?;
            let right = self.factor()?;
            expr = Box::new(Expr::Binary(expr, op, right));
        }

        Ok(expr)
    }

    fn factor(&mut self) -> ExprResult {
        let mut expr = self.power()?;

        while self.match_next_lits([TokenType::Star, TokenType::Slash]) {
            let op = self.binary_op()?;
            let right = self.power()?;
            expr = Box::new(Expr::Binary(expr, op, right));
        }

        Ok(expr)
    }

    fn power(&mut self) -> ExprResult {
        let mut expr = self.primary()?;

        while self.match_next_lits([TokenType::Caret]) {
            let op = self.binary_op()?;
            let right = self.primary()?;
            expr = Box::new(Expr::Binary(expr, op, right));
        }

        Ok(expr)
    }

    // Operator of the token just matched.
    fn binary_op(&self) -> Result<BinOp, ParseErr> {
        let tok = &self.tokens[self.index - 1];
        BinOp::from_token(tok.data).ok_or_else(|| ParseErr::new(ParseErrKind::UnexpectedToken, tok))
    }

    fn primary(&mut self) -> ExprResult {
        let tok = self.advance();
        let res = match tok.data {
            TokenType::LeftParen => {
                let expr = *self.expression()?;
                self.consume_pair(TokenType::RightParen, &tok)?;
                expr
            }
            TokenType::Minus => {
                let operand = self.nested(Self::primary)?;
                Expr::Binary(Box::new(Expr::Literal(Val::Num(0.0))), BinOp::Sub, operand)
            }
            TokenType::Number => match tok.text.parse() {
                Ok(num) => Expr::Literal(Val::Num(num)),
                Err(_) => {
                    return Err(ParseErr::new(
                        ParseErrKind::InvalidNumber(tok.text.clone()),
                        &tok,
                    ))
                }
            },
            TokenType::String => Expr::Literal(Val::String(tok.text.clone())),
            TokenType::Identifier => {
                if self.check(TokenType::LeftParen) {
                    self.call(&tok)?
                } else {
                    Expr::Identifier(tok.text.clone())
                }
            }
            TokenType::Let => *self.let_expr()?,
            TokenType::If => *self.if_expr()?,
            TokenType::Function => {
                self.function()?;
                Expr::End
            }
            TokenType::Const => {
                self.constant()?;
                Expr::End
            }
            TokenType::Print => {
                self.print()?;
                Expr::End
            }
            _ => return Err(ParseErr::new(ParseErrKind::UnexpectedToken, &tok)),
        };

        Ok(Box::new(res))
    }

    fn call(&mut self, callee: &Token) -> Result<Expr, ParseErr> {
        let left = self.consume(TokenType::LeftParen)?;
        let mut args = vec![];
        if !self.check(TokenType::RightParen) {
            args.push(*self.expression()?);
            while self.match_next_lits([TokenType::Comma]) {
                args.push(*self.expression()?);
            }
        }
        self.consume_pair(TokenType::RightParen, &left)?;

        let name = &callee.text;
        let arity_err = |expected: String| {
            ParseErr::new(
                ParseErrKind::ArityMismatch {
                    name: name.clone(),
                    expected,
                    got: args.len(),
                },
                callee,
            )
        };

        if let Some(nc) = NativeCall::from_name(name) {
            if !nc.accepts(args.len()) {
                return Err(arity_err(nc.arity().to_string()));
            }
            Ok(Expr::CallNative(nc, args))
        } else if let Some(arity) = self.user_arity(name) {
            if arity != args.len() {
                return Err(arity_err(arity.to_string()));
            }
            Ok(Expr::CallUser(name.clone(), args))
        } else {
            Err(ParseErr::new(
                ParseErrKind::UndefinedFunction(name.clone()),
                callee,
            ))
        }
    }

    // let x = v in body
    // let -> { a = v, b = w } in body
    fn let_expr(&mut self) -> ExprResult {
        if self.match_next_lits([TokenType::Arrow]) {
            let left_brace = self.consume(TokenType::LeftBrace)?;
            let mut bindings = vec![];
            while !self.check(TokenType::RightBrace) && !self.check(TokenType::Eof) {
                let id = self.consume_identifier()?;
                self.consume(TokenType::Equal)?;
                let val = self.expression()?;
                bindings.push((id, *val));
                self.match_next_lits([TokenType::Comma]);
            }
            self.consume_pair(TokenType::RightBrace, &left_brace)?;
            self.consume(TokenType::In)?;
            let body = self.expression()?;
            Ok(Box::new(Expr::LetGroup(bindings, body)))
        } else {
            let id = self.consume_identifier()?;
            self.consume(TokenType::Equal)?;
            let val = self.expression()?;
            self.consume(TokenType::In)?;
            let body = self.expression()?;
            Ok(Box::new(Expr::Let(id, val, body)))
        }
    }

    // if (a <cmp> b) then x else y
    fn if_expr(&mut self) -> ExprResult {
        let left_paren = self.consume(TokenType::LeftParen)?;
        let left = self.expression()?;
        if !self.peek().data.is_comparison() {
            return Err(self.error(ParseErrKind::ExpectedComparison));
        }
        let op = self.advance();
        let op = BinOp::from_token(op.data)
            .ok_or_else(|| ParseErr::new(ParseErrKind::ExpectedComparison, &op))?;
        let right = self.expression()?;
        self.consume_pair(TokenType::RightParen, &left_paren)?;
        let cond = Box::new(Expr::Binary(left, op, right));

        self.consume(TokenType::Then)?;
        let then = self.expression()?;
        self.consume(TokenType::Else)?;
        let other = self.expression()?;
        Ok(Box::new(Expr::If(cond, then, other)))
    }

    fn function(&mut self) -> Result<(), ParseErr> {
        let name_tok = self.consume(TokenType::FunctionName)?;
        let name = name_tok.text.clone();
        if NativeCall::from_name(&name).is_some() {
            return Err(ParseErr::new(ParseErrKind::ReservedName(name), &name_tok));
        }
        if self.is_function(&name) {
            return Err(ParseErr::new(ParseErrKind::AlreadyDefined(name), &name_tok));
        }

        let left = self.consume(TokenType::LeftParen)?;
        let mut params = vec![];
        if !self.check(TokenType::RightParen) {
            params.push(self.consume(TokenType::Parameter)?.text);
            while self.match_next_lits([TokenType::Comma]) {
                params.push(self.consume(TokenType::Parameter)?.text);
            }
        }
        self.consume_pair(TokenType::RightParen, &left)?;
        self.consume(TokenType::FatArrow)?;

        let body = *self.expression()?;
        self.pending
            .push(Declaration::Function(FunctionDecl { name, params, body }));
        Ok(())
    }

    fn constant(&mut self) -> Result<(), ParseErr> {
        let id = self.consume_identifier()?;
        self.consume(TokenType::Equal)?;
        let value = *self.expression()?;
        self.pending.push(Declaration::Constant(id, value));
        Ok(())
    }

    // The printed expression is parsed for errors and then dropped.
    fn print(&mut self) -> Result<(), ParseErr> {
        let left = self.consume(TokenType::LeftParen)?;
        self.expression()?;
        self.consume_pair(TokenType::RightParen, &left)?;
        Ok(())
    }
}
