use crate::config::Config;
use crate::error::{EvalError, InterpretErr};
use crate::expr::{EvalContext, Expr};
use crate::parser::Parser;
use crate::registry::Registry;
use crate::scanner::scan;
use crate::value::Val;

use log::{debug, warn};
use rand::{rngs::StdRng, SeedableRng};

/// One interpreter session. Declared functions and constants persist across
/// statements; variables live only for a single statement.
pub struct Interpreter {
    registry: Registry,
    config: Config,
    rng: StdRng,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Interpreter {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Interpreter {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Interpreter {
            registry: Registry::new(),
            config,
            rng,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Scans, parses and evaluates a single statement.
    pub fn evaluate(&mut self, statement: &str) -> Result<Val, InterpretErr> {
        let ast = self.parse(statement)?;
        Ok(self.eval(&ast)?)
    }

    /// Scans and parses a single statement, committing its declarations.
    pub fn parse(&mut self, statement: &str) -> Result<Expr, InterpretErr> {
        let tokens = scan(statement)?;
        debug!("{:?}: {} tokens", statement, tokens.len());
        let ast = Parser::new(&tokens, &mut self.registry, &self.config).parse()?;
        debug!("parsed {:?}", ast);
        Ok(ast)
    }

    /// Evaluates an already parsed statement in a fresh scope.
    pub fn eval(&mut self, ast: &Expr) -> Result<Val, EvalError> {
        let mut ctx = EvalContext::new(&self.registry, &mut self.rng, &self.config);
        ast.eval(&mut ctx)
    }

    /// Splits `program` on the configured terminator and evaluates every
    /// non-blank statement in order. A failing statement does not stop the
    /// ones after it.
    pub fn run(&mut self, program: &str) -> Vec<Result<Val, InterpretErr>> {
        let terminator = self.config.terminator.clone();
        program
            .split(terminator.as_str())
            .filter(|stmt| !stmt.trim().is_empty())
            .map(|stmt| {
                let res = self.evaluate(stmt);
                if let Err(err) = &res {
                    warn!("skipping statement {:?}: {}", stmt, err);
                }
                res
            })
            .collect()
    }

    /// Like [`run`](Self::run), rendered as output lines. Statements without a
    /// printable value produce no line.
    pub fn interpret(&mut self, program: &str) -> Vec<String> {
        self.run(program)
            .into_iter()
            .filter_map(|res| match res {
                Ok(val) => Some(val.to_string()).filter(|line| !line.is_empty()),
                Err(err) => Some(format!("error: {}", err)),
            })
            .collect()
    }
}
