use std::{f64::consts, rc::Rc};

use log::trace;
use rustc_hash::FxHashMap;

use crate::expr::{Expr, FunctionDecl};
use crate::value::Val;

/// A declaration made by a statement, applied once the statement has parsed.
#[derive(Debug, PartialEq, Clone)]
pub enum Declaration {
    Function(FunctionDecl),
    Constant(Rc<str>, Expr),
}

impl Declaration {
    pub fn name(&self) -> &Rc<str> {
        match self {
            Self::Function(decl) => &decl.name,
            Self::Constant(name, _) => name,
        }
    }
}

/// Functions and constants declared during a session.
#[derive(Debug, Clone)]
pub struct Registry {
    functions: FxHashMap<Rc<str>, FunctionDecl>,
    constants: FxHashMap<Rc<str>, Expr>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// A registry holding only the predefined constants `PI`, `E` and `G`.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.define_constant("PI".into(), Expr::Literal(Val::Num(consts::PI)));
        registry.define_constant("E".into(), Expr::Literal(Val::Num(consts::E)));
        registry.define_constant("G".into(), Expr::Literal(Val::Num(6.67430)));
        registry
    }

    pub fn empty() -> Self {
        Registry {
            functions: Default::default(),
            constants: Default::default(),
        }
    }

    pub fn function(&self, name: &str) -> Option<&FunctionDecl> {
        self.functions.get(name)
    }

    pub fn constant(&self, name: &str) -> Option<&Expr> {
        self.constants.get(name)
    }

    pub fn has_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Callers must have rejected duplicate names already.
    pub fn define_function(&mut self, decl: FunctionDecl) {
        trace!("define function {}({})", decl.name, decl.params.join(", "));
        self.functions.insert(decl.name.clone(), decl);
    }

    /// Later declarations of the same name win.
    pub fn define_constant(&mut self, name: Rc<str>, value: Expr) {
        trace!("define constant {name}");
        self.constants.insert(name, value);
    }

    pub fn commit(&mut self, decl: Declaration) {
        match decl {
            Declaration::Function(decl) => self.define_function(decl),
            Declaration::Constant(name, value) => self.define_constant(name, value),
        }
    }
}
