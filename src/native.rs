use num_traits::ToPrimitive;
use rand::{rngs::StdRng, Rng};

use crate::error::EvalError;

/// Built-in math functions. Names are case-sensitive.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum NativeCall {
    Sin,
    Cos,
    Tan,
    Sqrt,
    Pow,
    Abs,
    Log,
    Log10,
    Exp,
    Fact,
    Random,
}

impl NativeCall {
    pub const ALL: [NativeCall; 11] = [
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Sqrt,
        Self::Pow,
        Self::Abs,
        Self::Log,
        Self::Log10,
        Self::Exp,
        Self::Fact,
        Self::Random,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|nc| nc.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sin => "Sin",
            Self::Cos => "Cos",
            Self::Tan => "Tan",
            Self::Sqrt => "Sqrt",
            Self::Pow => "Pow",
            Self::Abs => "Abs",
            Self::Log => "Log",
            Self::Log10 => "Log10",
            Self::Exp => "Exp",
            Self::Fact => "Fact",
            Self::Random => "Random",
        }
    }

    pub fn accepts(&self, count: usize) -> bool {
        match self {
            Self::Pow | Self::Random => count == 2,
            Self::Log => count == 1 || count == 2,
            _ => count == 1,
        }
    }

    /// Human readable form of the accepted argument counts.
    pub fn arity(&self) -> &'static str {
        match self {
            Self::Pow | Self::Random => "2",
            Self::Log => "1 or 2",
            _ => "1",
        }
    }

    pub fn call(&self, vals: &[f64], rng: &mut StdRng) -> Result<f64, EvalError> {
        if !self.accepts(vals.len()) {
            return Err(EvalError::Arity {
                name: self.name().into(),
                expected: self.arity().to_string(),
                got: vals.len(),
            });
        }

        let res = match (self, vals) {
            (Self::Sin, [x]) => x.sin(),
            (Self::Cos, [x]) => x.cos(),
            (Self::Tan, [x]) => x.tan(),
            (Self::Sqrt, [x]) => x.sqrt(),
            (Self::Pow, [x, y]) => x.powf(*y),
            (Self::Abs, [x]) => x.abs(),
            (Self::Log, [x]) => x.ln(),
            (Self::Log, [x, base]) => x.log(*base),
            (Self::Log10, [x]) => x.log10(),
            (Self::Exp, [x]) => x.exp(),
            (Self::Fact, [n]) => Self::fact(*n)?,
            (Self::Random, [lo, hi]) => Self::random(*lo, *hi, rng)?,
            // accepts() rejected every other shape above.
            _ => unreachable!("{} called with {} arguments", self.name(), vals.len()),
        };
        Ok(res)
    }

    fn integer(&self, x: f64) -> Result<i64, EvalError> {
        x.to_i64().ok_or_else(|| {
            EvalError::InvalidArgument(self.name(), format!("{x} is not representable as an integer"))
        })
    }

    fn fact(n: f64) -> Result<f64, EvalError> {
        let n = Self::Fact.integer(n)?;
        if n < 0 {
            return Err(EvalError::InvalidArgument("Fact", format!("{n} is negative")));
        }
        // 171! is already past f64::MAX.
        if n > 170 {
            return Ok(f64::INFINITY);
        }
        Ok((1..=n).fold(1.0, |acc, k| acc * k as f64))
    }

    fn random(lo: f64, hi: f64, rng: &mut StdRng) -> Result<f64, EvalError> {
        let lo = Self::Random.integer(lo)?;
        let hi = Self::Random.integer(hi)?;
        if lo > hi {
            return Err(EvalError::InvalidArgument(
                "Random",
                format!("lower bound {lo} is greater than upper bound {hi}"),
            ));
        }
        if lo == hi {
            return Ok(lo as f64);
        }
        Ok(rng.gen_range(lo..hi) as f64)
    }
}
