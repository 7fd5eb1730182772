//! Constant lattice
//!
//! ```text
//!            NAC
//!   ... -1  0  1  2 ...
//!           UNDEF
//! ```
//!
//! `Undef` is the identity of meet, `Nac` absorbs everything, and two
//! different constants meet to `Nac`.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Value {
    /// No definition reaches yet
    #[default]
    Undef,
    Constant(i32),
    /// Not a constant
    Nac,
}

impl Value {
    #[inline]
    pub fn is_undef(self) -> bool {
        matches!(self, Value::Undef)
    }

    #[inline]
    pub fn is_nac(self) -> bool {
        matches!(self, Value::Nac)
    }

    #[inline]
    pub fn as_constant(self) -> Option<i32> {
        match self {
            Value::Constant(c) => Some(c),
            _ => None,
        }
    }

    pub fn meet(self, other: Value) -> Value {
        match (self, other) {
            (Value::Nac, _) | (_, Value::Nac) => Value::Nac,
            (Value::Undef, v) | (v, Value::Undef) => v,
            (Value::Constant(a), Value::Constant(b)) if a == b => Value::Constant(a),
            (Value::Constant(_), Value::Constant(_)) => Value::Nac,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undef => write!(f, "UNDEF"),
            Value::Constant(c) => write!(f, "{}", c),
            Value::Nac => write!(f, "NAC"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meet_table() {
        let c1 = Value::Constant(1);
        let c2 = Value::Constant(2);

        assert_eq!(Value::Undef.meet(c1), c1);
        assert_eq!(c1.meet(Value::Undef), c1);
        assert_eq!(c1.meet(c1), c1);
        assert_eq!(c1.meet(c2), Value::Nac);
        assert_eq!(Value::Nac.meet(Value::Undef), Value::Nac);
        assert_eq!(Value::Undef.meet(Value::Undef), Value::Undef);
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Constant(-3).to_string(), "-3");
        assert_eq!(Value::Nac.to_string(), "NAC");
        assert_eq!(Value::default().to_string(), "UNDEF");
    }
}
