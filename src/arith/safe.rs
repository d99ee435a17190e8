use super::*;

/// The guarded operation a diagnostic refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Arbitrary)]
pub enum ArithOp {
    Div,
    Rem,
}

impl ArithOp {
    pub fn symbol(self) -> &'static str {
        match self {
            ArithOp::Div => "/",
            ArithOp::Rem => "%",
        }
    }
}

impl Display for ArithOp {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArithErr {
    #[error("invalid argument in {0}")]
    InvalidArgument(ArithOp),
    #[error("overflow in {0}")]
    Overflow(ArithOp),
}

impl ArithErr {
    pub fn op(self) -> ArithOp {
        match self {
            ArithErr::InvalidArgument(op) | ArithErr::Overflow(op) => op,
        }
    }
}

pub type ArithResult<T> = Result<T, ArithErr>;

/// Division and remainder that report a bad divisor or an overflowing
/// quotient instead of panicking.
pub trait SafeArith: Copy + PartialOrd {
    const ZERO: Self;

    /// The raw quotient, `None` if it cannot be represented.
    fn checked_quot(self, rhs: Self) -> Option<Self>;

    /// The raw remainder, `None` if it cannot be represented.
    fn checked_rem_by(self, rhs: Self) -> Option<Self>;

    /// Two-sided so that NaN, which is neither above nor below zero, is
    /// rejected along with zero.
    #[inline]
    fn is_valid_divisor(self) -> bool {
        self > Self::ZERO || self < Self::ZERO
    }

    fn try_div(self, rhs: Self) -> ArithResult<Self> {
        self.try_op(ArithOp::Div, rhs)
    }

    fn try_rem(self, rhs: Self) -> ArithResult<Self> {
        self.try_op(ArithOp::Rem, rhs)
    }

    fn try_op(self, op: ArithOp, rhs: Self) -> ArithResult<Self> {
        if !rhs.is_valid_divisor() {
            return Err(ArithErr::InvalidArgument(op));
        }
        let result = match op {
            ArithOp::Div => self.checked_quot(rhs),
            ArithOp::Rem => self.checked_rem_by(rhs),
        };
        result.ok_or(ArithErr::Overflow(op))
    }
}

macro_rules! impl_safe_arith_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl SafeArith for $ty {
                const ZERO: Self = 0;

                #[inline]
                fn checked_quot(self, rhs: Self) -> Option<Self> {
                    self.checked_div(rhs)
                }

                #[inline]
                fn checked_rem_by(self, rhs: Self) -> Option<Self> {
                    self.checked_rem(rhs)
                }
            }
        )*
    };
}

macro_rules! impl_safe_arith_float {
    ($($ty:ty),* $(,)?) => {
        $(
            impl SafeArith for $ty {
                const ZERO: Self = 0.0;

                // IEEE division never traps, it saturates to an infinity.
                #[inline]
                fn checked_quot(self, rhs: Self) -> Option<Self> {
                    Some(self / rhs)
                }

                #[inline]
                fn checked_rem_by(self, rhs: Self) -> Option<Self> {
                    Some(self % rhs)
                }
            }
        )*
    };
}

impl_safe_arith_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_safe_arith_float!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_divisors() {
        assert!(3_i64.is_valid_divisor());
        assert!((-3_i64).is_valid_divisor());
        assert!(!0_i64.is_valid_divisor());
        assert!(1_u8.is_valid_divisor());
        assert!(!0_u8.is_valid_divisor());
        assert!(f64::MIN_POSITIVE.is_valid_divisor());
        assert!(f64::NEG_INFINITY.is_valid_divisor());
        assert!(!0.0_f64.is_valid_divisor());
        assert!(!(-0.0_f64).is_valid_divisor());
        assert!(!f64::NAN.is_valid_divisor());
        assert!(!f32::NAN.is_valid_divisor());
    }

    #[test]
    fn int_division() {
        assert_eq!(10_i64.try_div(2), Ok(5));
        assert_eq!((-7_i64).try_div(2), Ok(-3));
        assert_eq!(10_i64.try_div(0), Err(ArithErr::InvalidArgument(ArithOp::Div)));
        assert_eq!(i64::MIN.try_div(-1), Err(ArithErr::Overflow(ArithOp::Div)));
        assert_eq!(i8::MIN.try_div(-1), Err(ArithErr::Overflow(ArithOp::Div)));
        assert_eq!(200_u8.try_div(7), Ok(28));
    }

    #[test]
    fn int_remainder() {
        assert_eq!(10_i64.try_rem(3), Ok(1));
        assert_eq!((-10_i64).try_rem(3), Ok(-1));
        assert_eq!(10_i32.try_rem(0), Err(ArithErr::InvalidArgument(ArithOp::Rem)));
        assert_eq!(i32::MIN.try_rem(-1), Err(ArithErr::Overflow(ArithOp::Rem)));
        assert_eq!(u64::MAX.try_rem(10), Ok(5));
    }

    #[test]
    fn float_ops() {
        assert_eq!(10.0_f64.try_div(4.0), Ok(2.5));
        assert_eq!(7.5_f64.try_rem(2.0), Ok(1.5));
        assert_eq!(1.0_f64.try_div(0.0), Err(ArithErr::InvalidArgument(ArithOp::Div)));
        assert_eq!(1.0_f64.try_rem(f64::NAN), Err(ArithErr::InvalidArgument(ArithOp::Rem)));
        assert_eq!(f64::MAX.try_div(f64::MIN_POSITIVE), Ok(f64::INFINITY));
        assert!(f64::NAN.try_div(2.0).unwrap().is_nan());
    }

    #[test]
    fn error_messages() {
        assert_eq!(ArithErr::InvalidArgument(ArithOp::Div).to_string(), "invalid argument in /");
        assert_eq!(ArithErr::InvalidArgument(ArithOp::Rem).to_string(), "invalid argument in %");
        assert_eq!(ArithErr::Overflow(ArithOp::Rem).op(), ArithOp::Rem);
    }
}
