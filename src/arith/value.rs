use derive_more::From;
use super::*;

/// A dynamically-kinded scalar, the operand type of the polymorphic
/// arithmetic and comparison entry points.
#[derive(Debug, Clone, PartialEq, From, Serialize, Deserialize, Arbitrary)]
pub enum Value {
    #[from(ignore)]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

/// A value after numeric coercion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    Int(i64),
    Float(f64),
}

impl Numeric {
    pub fn as_f64(self) -> f64 {
        match self {
            Numeric::Int(n) => n as f64,
            Numeric::Float(n) => n,
        }
    }

    pub fn is_valid_divisor(self) -> bool {
        match self {
            Numeric::Int(n) => n.is_valid_divisor(),
            Numeric::Float(n) => n.is_valid_divisor(),
        }
    }

    /// Truncates toward zero, `None` for NaN, infinities and anything
    /// outside the `i64` range.
    pub fn to_i64(self) -> Option<i64> {
        match self {
            Numeric::Int(n) => Some(n),
            Numeric::Float(n) if n.is_finite() && n >= I64_MIN_F64 && n < I64_END_F64 => {
                Some(n.trunc() as i64)
            },
            Numeric::Float(_) => None,
        }
    }

    /// Division stays integral for two ints when the result is exact,
    /// anything touching a float is done in floats. The remainder always
    /// works on ints.
    pub fn try_op(self, op: ArithOp, rhs: Self) -> ArithResult<Self> {
        match op {
            ArithOp::Div => self.try_quot(rhs),
            ArithOp::Rem => self.try_int_rem(rhs),
        }
    }

    fn try_quot(self, rhs: Self) -> ArithResult<Self> {
        match (self, rhs) {
            (Numeric::Int(l), Numeric::Int(r)) => {
                let quot = l.try_div(r)?;
                if l.checked_rem(r) == Some(0) {
                    Ok(Numeric::Int(quot))
                } else {
                    Ok(Numeric::Float(l as f64 / r as f64))
                }
            },
            (l, r) => l.as_f64().try_div(r.as_f64()).map(Numeric::Float),
        }
    }

    /// Both operands are truncated to ints after the divisor check, so a
    /// divisor such as `0.5` passes the check and then faults as zero.
    fn try_int_rem(self, rhs: Self) -> ArithResult<Self> {
        if !rhs.is_valid_divisor() {
            return Err(ArithErr::InvalidArgument(ArithOp::Rem));
        }
        let fault = ArithErr::Overflow(ArithOp::Rem);
        match (self.to_i64(), rhs.to_i64()) {
            (Some(l), Some(r)) => l.try_rem(r).map(Numeric::Int).map_err(|_| fault),
            _ => Err(fault),
        }
    }
}

impl From<Numeric> for Value {
    fn from(n: Numeric) -> Self {
        match n {
            Numeric::Int(n) => Value::Int(n),
            Numeric::Float(n) => Value::Float(n),
        }
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Float(n.into())
    }
}

impl From<&'_ str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

/// Parses a numeric string: optional surrounding whitespace, then an integer
/// or a decimal/exponent float. Words such as `inf` and hex literals are not
/// numeric.
pub fn parse_numeric(s: &str) -> Option<Numeric> {
    let s = s.trim_matches(|c| matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c'));
    let charset_ok = s
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
    if !charset_ok || !s.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    if let Ok(n) = s.parse::<i64>() {
        return Some(Numeric::Int(n));
    }
    s.parse::<f64>().ok().map(Numeric::Float)
}

const I64_MIN_F64: f64 = -9223372036854775808.0;
const I64_END_F64: f64 = 9223372036854775808.0;

/// Decimal exponents outside `MIN_FIXED_EXP..MAX_FIXED_EXP` print in
/// exponent form, `1.0E+20` style.
const MIN_FIXED_EXP: i32 = -4;
const MAX_FIXED_EXP: i32 = 15;

pub(crate) fn format_float(n: f64) -> String {
    if n.is_nan() {
        return "NAN".to_owned();
    }
    if n.is_infinite() {
        return if n.is_sign_positive() { "INF" } else { "-INF" }.to_owned();
    }
    if n == 0.0 {
        return n.to_string();
    }
    // `{:e}` gives the shortest round-trip digits, e.g. `1.5e-7`.
    let sci = format!("{:e}", n);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((mantissa, exp)) => (mantissa, exp.parse::<i32>().unwrap_or(0)),
        None => return n.to_string(),
    };
    if (MIN_FIXED_EXP..MAX_FIXED_EXP).contains(&exp) {
        return n.to_string();
    }
    let dot = if mantissa.contains('.') { "" } else { ".0" };
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{}{}E{}{}", mantissa, dot, sign, exp.unsigned_abs())
}

impl Value {
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
        }
    }

    pub fn as_bool(&self) -> bool {
        match self {
            Value::Null => false,
            &Value::Bool(b) => b,
            &Value::Int(n) => n != 0,
            &Value::Float(n) => n != 0.0,
            Value::Str(s) => !(s.is_empty() || s == "0"),
        }
    }

    /// Non-numeric strings coerce to zero.
    pub fn to_numeric(&self) -> Numeric {
        match self {
            Value::Null => Numeric::Int(0),
            &Value::Bool(b) => Numeric::Int(b.into()),
            &Value::Int(n) => Numeric::Int(n),
            &Value::Float(n) => Numeric::Float(n),
            Value::Str(s) => parse_numeric(s).unwrap_or(Numeric::Int(0)),
        }
    }

    pub fn is_numeric(&self) -> bool {
        match self {
            Value::Int(_) | Value::Float(_) => true,
            Value::Str(s) => parse_numeric(s).is_some(),
            Value::Null | Value::Bool(_) => false,
        }
    }

    pub fn try_div(&self, rhs: &Value) -> ArithResult<Value> {
        self.try_op(ArithOp::Div, rhs)
    }

    pub fn try_rem(&self, rhs: &Value) -> ArithResult<Value> {
        self.try_op(ArithOp::Rem, rhs)
    }

    pub fn try_op(&self, op: ArithOp, rhs: &Value) -> ArithResult<Value> {
        self.to_numeric().try_op(op, rhs.to_numeric()).map(Value::from)
    }

    /// The typed dump form: `int(5)`, `float(INF)`, `string(3) "abc"`.
    pub fn dump(&self) -> String {
        match self {
            Value::Null => "NULL".to_owned(),
            Value::Bool(b) => format!("bool({})", b),
            Value::Int(n) => format!("int({})", n),
            &Value::Float(n) => format!("float({})", format_float(n)),
            Value::Str(s) => format!("string({}) \"{}\"", s.len(), s),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Value::Null | Value::Bool(false) => Ok(()),
            Value::Bool(true) => f.write_str("1"),
            Value::Int(n) => write!(f, "{}", n),
            &Value::Float(n) => f.write_str(&format_float(n)),
            Value::Str(s) => f.write_str(s),
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}
