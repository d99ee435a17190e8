use super::*;

/// Where a special float comes from.
///
/// `Constant` uses the compiler's own constants. `Derived` computes the value
/// at run time through IEEE division, which catches targets whose constant
/// folding disagrees with their float unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Arbitrary)]
pub enum SpecialSource {
    #[default]
    Constant,
    Derived,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Arbitrary)]
pub enum Special {
    PositiveInfinity,
    NegativeInfinity,
    Nan,
}

impl Special {
    pub const ALL: [Special; 3] = [
        Special::PositiveInfinity,
        Special::NegativeInfinity,
        Special::Nan,
    ];

    pub fn value(self, source: SpecialSource) -> f64 {
        match source {
            SpecialSource::Constant => match self {
                Special::PositiveInfinity => f64::INFINITY,
                Special::NegativeInfinity => f64::NEG_INFINITY,
                Special::Nan => f64::NAN,
            },
            SpecialSource::Derived => {
                // black_box keeps the division out of the const folder.
                let zero = black_box(0.0_f64);
                match self {
                    Special::PositiveInfinity => black_box(1.0_f64) / zero,
                    Special::NegativeInfinity => black_box(-1.0_f64) / zero,
                    Special::Nan => zero / zero,
                }
            }
        }
    }

    /// Whether `n` belongs to this class. NaN sign bits vary between
    /// platforms, so any NaN matches `Nan`.
    pub fn matches(self, n: f64) -> bool {
        match self {
            Special::PositiveInfinity => n.to_bits() == f64::INFINITY.to_bits(),
            Special::NegativeInfinity => n.to_bits() == f64::NEG_INFINITY.to_bits(),
            Special::Nan => n.is_nan(),
        }
    }
}

impl Display for Special {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        f.write_str(match self {
            Special::PositiveInfinity => "INF",
            Special::NegativeInfinity => "-INF",
            Special::Nan => "NAN",
        })
    }
}

pub fn positive_infinity() -> f64 {
    Special::PositiveInfinity.value(SpecialSource::Constant)
}

pub fn negative_infinity() -> f64 {
    Special::NegativeInfinity.value(SpecialSource::Constant)
}

pub fn nan() -> f64 {
    Special::Nan.value(SpecialSource::Constant)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sources_agree() {
        for special in Special::ALL {
            let constant = special.value(SpecialSource::Constant);
            let derived = special.value(SpecialSource::Derived);
            assert!(special.matches(constant), "{} constant", special);
            assert!(special.matches(derived), "{} derived", special);
        }
        assert_eq!(
            Special::PositiveInfinity.value(SpecialSource::Derived).to_bits(),
            f64::INFINITY.to_bits(),
        );
        assert_eq!(
            Special::NegativeInfinity.value(SpecialSource::Derived).to_bits(),
            f64::NEG_INFINITY.to_bits(),
        );
    }

    #[test]
    fn infinities_bound_finite_numbers() {
        for n in [f64::MAX, f64::MIN, 0.0, -0.0, 1e300, -1e300, f64::MIN_POSITIVE] {
            assert!(positive_infinity() > n);
            assert!(negative_infinity() < n);
        }
        assert_eq!(positive_infinity(), positive_infinity());
        assert_eq!(negative_infinity(), negative_infinity());
    }

    #[test]
    fn nan_is_not_itself() {
        let n = nan();
        assert!(n != n);
        assert!(!Special::Nan.matches(positive_infinity()));
        assert!(!Special::PositiveInfinity.matches(negative_infinity()));
    }
}
