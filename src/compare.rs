//! Equality probes for fuzz-case oracles, in a strict (same kind, same value)
//! and a loose (coerce first) flavor.

use crate::arith::{parse_numeric, Numeric, Value};

fn numeric_eq(l: Numeric, r: Numeric) -> bool {
    match (l, r) {
        (Numeric::Int(l), Numeric::Int(r)) => l == r,
        (l, r) => l.as_f64() == r.as_f64(),
    }
}

impl Value {
    pub fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(l), Value::Bool(r)) => l == r,
            (Value::Int(l), Value::Int(r)) => l == r,
            (Value::Float(l), Value::Float(r)) => l == r,
            (Value::Str(l), Value::Str(r)) => l == r,
            _ => false,
        }
    }

    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Null, Value::Str(s)) | (Value::Str(s), Value::Null) => s.is_empty(),
            (Value::Null | Value::Bool(_), _) | (_, Value::Null | Value::Bool(_)) => {
                self.as_bool() == other.as_bool()
            },
            (Value::Str(l), Value::Str(r)) => match (parse_numeric(l), parse_numeric(r)) {
                (Some(l), Some(r)) => numeric_eq(l, r),
                _ => l == r,
            },
            (Value::Str(s), n) | (n, Value::Str(s)) => match parse_numeric(s) {
                Some(parsed) => numeric_eq(parsed, n.to_numeric()),
                None => n.to_string() == *s,
            },
            (l, r) => numeric_eq(l.to_numeric(), r.to_numeric()),
        }
    }
}

pub fn strict_equal(x: impl Into<Value>, y: impl Into<Value>) -> bool {
    x.into().strict_eq(&y.into())
}

pub fn strict_not_equal(x: impl Into<Value>, y: impl Into<Value>) -> bool {
    !strict_equal(x, y)
}

pub fn loose_equal(x: impl Into<Value>, y: impl Into<Value>) -> bool {
    x.into().loose_eq(&y.into())
}

pub fn loose_not_equal(x: impl Into<Value>, y: impl Into<Value>) -> bool {
    !loose_equal(x, y)
}
