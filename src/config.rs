/// Session settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Separates statements in a source text.
    pub terminator: String,
    /// Limit for parser nesting and for user calls / constant expansion at
    /// run time. Deeper inputs fail instead of exhausting the stack.
    pub max_depth: usize,
    /// Limit for the nesting of evaluated expression nodes, counted across
    /// calls and constant expansions.
    pub max_eval_depth: usize,
    /// Seed for `Random`. Entropy is used when unset.
    pub seed: Option<u64>,
}

pub const DEFAULT_TERMINATOR: &str = ";\r";
pub const DEFAULT_MAX_DEPTH: usize = 256;
pub const DEFAULT_MAX_EVAL_DEPTH: usize = 512;

impl Default for Config {
    fn default() -> Self {
        Config {
            terminator: DEFAULT_TERMINATOR.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            max_eval_depth: DEFAULT_MAX_EVAL_DEPTH,
            seed: None,
        }
    }
}

impl Config {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_eval_depth(mut self, max_eval_depth: usize) -> Self {
        self.max_eval_depth = max_eval_depth;
        self
    }

    pub fn with_terminator(mut self, terminator: impl Into<String>) -> Self {
        self.terminator = terminator.into();
        self
    }
}
