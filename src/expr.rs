use std::rc::Rc;

use log::trace;
use rand::rngs::StdRng;

use crate::config::Config;
use crate::error::EvalError;
use crate::native::NativeCall;
use crate::registry::Registry;
use crate::scope::Scope;
use crate::token::TokenType;
use crate::value::Val;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    Equal,
    NotEqual,
}

impl BinOp {
    pub fn from_token(data: TokenType) -> Option<Self> {
        let op = match data {
            TokenType::Plus => Self::Add,
            TokenType::Minus => Self::Sub,
            TokenType::Star => Self::Mul,
            TokenType::Slash => Self::Div,
            TokenType::Caret => Self::Pow,
            TokenType::Less => Self::Less,
            TokenType::Greater => Self::Greater,
            TokenType::LessEqual => Self::LessEqual,
            TokenType::GreaterEqual => Self::GreaterEqual,
            TokenType::EqualEqual => Self::Equal,
            TokenType::BangEqual => Self::NotEqual,
            _ => return None,
        };
        Some(op)
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "^",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::Equal => "==",
            Self::NotEqual => "!=",
        }
    }

    pub fn apply(&self, l: Val, r: Val) -> Result<Val, EvalError> {
        match (self, l, r) {
            (Self::Add, Val::String(a), Val::String(b)) => {
                let mut c = a.to_string();
                c.push_str(&b);
                Ok(Val::String(c.into()))
            }
            (Self::Equal, Val::String(a), Val::String(b)) => Ok(Val::Bool(a == b)),
            (Self::NotEqual, Val::String(a), Val::String(b)) => Ok(Val::Bool(a != b)),

            (Self::Add, Val::Num(a), Val::Num(b)) => Ok(Val::Num(a + b)),
            (Self::Sub, Val::Num(a), Val::Num(b)) => Ok(Val::Num(a - b)),
            (Self::Mul, Val::Num(a), Val::Num(b)) => Ok(Val::Num(a * b)),
            (Self::Div, Val::Num(a), Val::Num(b)) => Ok(Val::Num(a / b)),
            (Self::Pow, Val::Num(a), Val::Num(b)) => Ok(Val::Num(a.powf(b))),

            (Self::Less, Val::Num(a), Val::Num(b)) => Ok(Val::Bool(a < b)),
            (Self::Greater, Val::Num(a), Val::Num(b)) => Ok(Val::Bool(a > b)),
            (Self::LessEqual, Val::Num(a), Val::Num(b)) => Ok(Val::Bool(a <= b)),
            (Self::GreaterEqual, Val::Num(a), Val::Num(b)) => Ok(Val::Bool(a >= b)),
            (Self::Equal, Val::Num(a), Val::Num(b)) => Ok(Val::Bool(a == b)),
            (Self::NotEqual, Val::Num(a), Val::Num(b)) => Ok(Val::Bool(a != b)),

            (op, l, r) => Err(EvalError::TypeError {
                op: op.symbol(),
                left: l.type_name(),
                right: r.type_name(),
            }),
        }
    }
}

/// `function name(params) => body`, as stored in the function registry.
#[derive(Debug, PartialEq, Clone)]
pub struct FunctionDecl {
    pub name: Rc<str>,
    pub params: Vec<Rc<str>>,
    pub body: Expr,
}

pub type ExprRef = Box<Expr>;

#[derive(Debug, PartialEq, Clone)]
pub enum Expr {
    Literal(Val),
    Identifier(Rc<str>),
    Binary(ExprRef, BinOp, ExprRef),
    If(ExprRef, ExprRef, ExprRef),
    Let(Rc<str>, ExprRef, ExprRef),
    /// `let -> { a = .., b = .. } in body`. Bound in order; duplicates overwrite.
    LetGroup(Vec<(Rc<str>, Expr)>, ExprRef),
    CallUser(Rc<str>, Vec<Expr>),
    CallNative(NativeCall, Vec<Expr>),
    /// Produced by declaration-only statements.
    End,
}

/// State threaded through one top-level evaluation.
pub struct EvalContext<'a> {
    pub scope: Scope,
    registry: &'a Registry,
    rng: &'a mut StdRng,
    depth: usize,
    max_depth: usize,
    frames: usize,
    max_frames: usize,
}

impl<'a> EvalContext<'a> {
    pub fn new(registry: &'a Registry, rng: &'a mut StdRng, config: &Config) -> Self {
        EvalContext {
            scope: Scope::new(),
            registry,
            rng,
            depth: 0,
            max_depth: config.max_depth,
            frames: 0,
            max_frames: config.max_eval_depth,
        }
    }

    // Bounds recursion through names: user calls and constant expansion.
    fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, EvalError>,
    ) -> Result<T, EvalError> {
        if self.depth >= self.max_depth {
            return Err(EvalError::DepthExceeded(self.max_depth));
        }
        self.depth += 1;
        let res = f(self);
        self.depth -= 1;
        res
    }
}

impl Expr {
    /// Evaluates `self`. Every node counts against the context's frame
    /// budget, so the total recursion depth stays bounded even when a deep
    /// constant body is expanded many times.
    pub fn eval(&self, ctx: &mut EvalContext) -> Result<Val, EvalError> {
        if ctx.frames >= ctx.max_frames {
            return Err(EvalError::DepthExceeded(ctx.max_frames));
        }
        ctx.frames += 1;
        let res = self.eval_node(ctx);
        ctx.frames -= 1;
        res
    }

    fn eval_node(&self, ctx: &mut EvalContext) -> Result<Val, EvalError> {
        match self {
            Self::End => Ok(Val::None),
            Self::Literal(v) => Ok(v.clone()),
            Self::Binary(x, op, y) => {
                let l = x.eval(ctx)?;
                let r = y.eval(ctx)?;
                op.apply(l, r)
            }
            Self::If(cond, then, other) => match cond.eval(ctx)? {
                Val::Bool(true) => then.eval(ctx),
                Val::Bool(false) => other.eval(ctx),
                v => Err(EvalError::NonBooleanCondition(v.type_name())),
            },
            Self::Identifier(id) => {
                if let Some(val) = ctx.scope.get(id) {
                    return Ok(val);
                }
                let registry = ctx.registry;
                match registry.constant(id) {
                    // Constants are stored unevaluated and see the live scope.
                    Some(konst) => ctx.nested(|ctx| konst.eval(ctx)),
                    None => Err(EvalError::UndefinedVariable(id.clone())),
                }
            }
            Self::Let(id, val, body) => {
                let val = val.eval(ctx)?;
                ctx.scope.declare(id.clone(), val);
                body.eval(ctx)
            }
            Self::LetGroup(bindings, body) => {
                for (id, val) in bindings {
                    let val = val.eval(ctx)?;
                    ctx.scope.declare(id.clone(), val);
                }
                body.eval(ctx)
            }
            Self::CallNative(nc, args) => {
                let mut evaluated = Vec::with_capacity(args.len());
                for arg in args {
                    match arg.eval(ctx)? {
                        Val::Num(x) => evaluated.push(x),
                        v => return Err(EvalError::ExpectedNumber(nc.name(), v.type_name())),
                    }
                }
                nc.call(&evaluated, &mut *ctx.rng).map(Val::Num)
            }
            Self::CallUser(name, args) => {
                let registry = ctx.registry;
                let fun = registry
                    .function(name)
                    .ok_or_else(|| EvalError::UndefinedFunction(name.clone()))?;
                if args.len() != fun.params.len() {
                    return Err(EvalError::Arity {
                        name: name.clone(),
                        expected: fun.params.len().to_string(),
                        got: args.len(),
                    });
                }

                trace!("call {name} at depth {}", ctx.depth);
                let saved = ctx.scope.snapshot();
                // Each argument is bound as soon as it is evaluated, so later
                // arguments already see earlier parameters.
                let res = ctx.nested(|ctx| {
                    for (param, arg) in fun.params.iter().zip(args) {
                        let val = arg.eval(ctx)?;
                        ctx.scope.declare(param.clone(), val);
                    }
                    fun.body.eval(ctx)
                });
                ctx.scope.restore(saved);
                res
            }
        }
    }
}
