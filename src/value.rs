use std::{fmt, rc::Rc};

#[derive(Debug, PartialEq, Clone)]
pub enum Val {
    Num(f64),
    String(Rc<str>),
    Bool(bool),
    /// Result of declaration-only statements.
    None,
}

impl Val {
    pub fn type_name(&self) -> &'static str {
        match self {
            Val::Num(_) => "number",
            Val::String(_) => "string",
            Val::Bool(_) => "boolean",
            Val::None => "nothing",
        }
    }
}

impl fmt::Display for Val {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Num(x) => fmt_num(*x, f),
            Self::String(x) => write!(f, "{}", x),
            Self::Bool(true) => write!(f, "True"),
            Self::Bool(false) => write!(f, "False"),
            Self::None => Ok(()),
        }
    }
}

// Shortest round-trip digits. Exponents from 15 up or below -4 switch to
// `1E+21` / `1E-05` notation; infinities print as `∞`.
fn fmt_num(x: f64, f: &mut fmt::Formatter) -> fmt::Result {
    if x.is_nan() {
        return f.write_str("NaN");
    }
    if x.is_infinite() {
        return f.write_str(if x > 0.0 { "∞" } else { "-∞" });
    }

    let sci = format!("{:e}", x);
    if let Some((mantissa, exp)) = sci.split_once('e') {
        if let Ok(exp) = exp.parse::<i32>() {
            if !(-4..15).contains(&exp) {
                let sign = if exp < 0 { '-' } else { '+' };
                return write!(f, "{}E{}{:02}", mantissa, sign, exp.abs());
            }
        }
    }
    write!(f, "{}", x)
}
