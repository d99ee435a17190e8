use itertools::Itertools;
use rand::distributions::{Alphanumeric, Distribution, Standard};
use rand::seq::SliceRandom;
use rand::Rng;
use crate::arith::{Special, SpecialSource, Value};

pub const INT_EDGE_CASES: [i64; 9] = [
    0,
    -1,
    0xff,
    9284128,
    128412288,
    -9284120,
    -0xff,
    i64::MAX,
    i64::MIN,
];

pub const FINITE_FLOAT_EDGE_CASES: [f64; 8] = [
    0.0,
    -1.0,
    2.51,
    329.5,
    0.00043,
    21948.293242,
    -2222.9999,
    2842.6378,
];

pub const STRING_EDGE_CASES: [&str; 19] = [
    "",
    ",",
    " ",
    "``",
    "''",
    "0x1f",
    "000",
    "24",
    "-123",
    "\x00",
    "simple string",
    "ハロー・ワールド",
    "1\n2",
    "<div/>",
    "<h1>ok</h1>",
    "<p>",
    "</p>",
    r#"{"key":1}"#,
    r#"["val"]"#,
];

const MAX_RANDOM_STRING_LEN: usize = 10;

/// Finite edge cases followed by NaN and both infinities, the latter built
/// through `source`.
pub fn float_edge_cases(source: SpecialSource) -> Vec<f64> {
    FINITE_FLOAT_EDGE_CASES
        .iter()
        .copied()
        .chain(Special::ALL.iter().map(|special| special.value(source)))
        .collect()
}

/// Every int and float edge case against every other, mixed kinds included.
pub fn divisor_pairs() -> Vec<(Value, Value)> {
    let values: Vec<Value> = INT_EDGE_CASES
        .iter()
        .map(|&n| Value::Int(n))
        .chain(float_edge_cases(SpecialSource::Constant).into_iter().map(Value::Float))
        .collect();
    values
        .iter()
        .cloned()
        .cartesian_product(values.iter().cloned())
        .collect()
}

/// Draws literal values for generated programs, biased toward the edge-case
/// tables.
#[derive(Debug)]
pub struct FixtureGen<R: Rng> {
    rng: R,
    floats: Vec<f64>,
    edge_case_chance: f64,
}

impl<R: Rng> FixtureGen<R> {
    pub fn new(rng: R) -> Self {
        FixtureGen {
            rng,
            floats: float_edge_cases(SpecialSource::Derived),
            edge_case_chance: 0.5,
        }
    }

    /// Probability of drawing from a table rather than uniformly. Clamped to
    /// `0.0..=1.0`.
    pub fn with_edge_case_chance(mut self, chance: f64) -> Self {
        self.edge_case_chance = if chance.is_nan() { 0.0 } else { chance.clamp(0.0, 1.0) };
        self
    }

    fn pick_edge_case(&mut self) -> bool {
        self.rng.gen_bool(self.edge_case_chance)
    }

    pub fn int_value(&mut self) -> i64 {
        if self.pick_edge_case() {
            *INT_EDGE_CASES.choose(&mut self.rng).unwrap_or(&0)
        } else {
            self.rng.gen_range(-1_000_000..=1_000_000)
        }
    }

    pub fn float_value(&mut self) -> f64 {
        if self.pick_edge_case() {
            *self.floats.choose(&mut self.rng).unwrap_or(&0.0)
        } else {
            self.rng.gen_range(-1e6..1e6)
        }
    }

    pub fn bool_value(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }

    /// A table entry, or random ASCII with table entries spliced in.
    pub fn string_value(&mut self) -> String {
        if self.pick_edge_case() {
            return STRING_EDGE_CASES.choose(&mut self.rng).unwrap_or(&"").to_string();
        }
        let len = self.rng.gen_range(0..=MAX_RANDOM_STRING_LEN);
        let mut s = String::with_capacity(len);
        for _ in 0..len {
            if self.rng.gen_bool(0.1) {
                s.push_str(STRING_EDGE_CASES.choose(&mut self.rng).unwrap_or(&""));
            } else {
                s.push(char::from(Alphanumeric.sample(&mut self.rng)));
            }
        }
        s
    }

    pub fn value(&mut self) -> Value {
        match self.rng.gen_range(0..5) {
            0 => Value::Null,
            1 => Value::Bool(self.bool_value()),
            2 => Value::Int(self.int_value()),
            3 => Value::Float(self.float_value()),
            _ => Value::Str(self.string_value()),
        }
    }
}

impl Distribution<Value> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Value {
        match rng.gen_range(0..4) {
            0 => Value::Null,
            1 => Value::Bool(rng.gen()),
            2 => Value::Int(rng.gen()),
            _ => Value::Float(rng.gen()),
        }
    }
}
