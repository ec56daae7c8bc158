use crate::value::Val;
use rustc_hash::FxHashMap;
use std::rc::Rc;

/// Variables of one top-level evaluation.
///
/// There is a single flat scope. Calls to user functions take a
/// [`snapshot`](Scope::snapshot) before binding parameters and
/// [`restore`](Scope::restore) it afterwards, so function bodies see whatever
/// the caller had bound at call time (dynamic scoping).
#[derive(Debug, PartialEq, Default, Clone)]
pub struct Scope {
    stack: FxHashMap<Rc<str>, Val>,
}

impl Scope {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn get(&self, id: &str) -> Option<Val> {
        self.stack.get(id).cloned()
    }

    /// Binds `id`, overwriting any previous binding.
    pub fn declare(&mut self, id: Rc<str>, val: Val) {
        self.stack.insert(id, val);
    }

    pub fn snapshot(&self) -> Scope {
        self.clone()
    }

    pub fn restore(&mut self, saved: Scope) {
        *self = saved;
    }
}
