#[cfg(target_os = "linux")]
mod everything {
    use arbitrary::Arbitrary;
    use honggfuzz::fuzz;
    use fuzzlib::{Runtime, SafeArith, Value};

    #[derive(Debug, Arbitrary)]
    enum Input {
        Int(i64, i64),
        Float(f64, f64),
        Values(Value, Value),
        Guard(String, u8),
    }

    fn diagnostic_lines(rt: Runtime<Vec<u8>>) -> usize {
        rt.into_writer().iter().filter(|&&b| b == b'\n').count()
    }

    fn fuzz_int(x: i64, y: i64) {
        let mut rt = Runtime::<Vec<u8>>::default();
        let quot = x.checked_div(y);
        let rem = x.checked_rem(y);
        assert_eq!(rt.safe_div(x, y), quot.unwrap_or(0));
        assert_eq!(rt.safe_mod(x, y), rem.unwrap_or(0));
        let failures = [quot.is_none(), rem.is_none()].iter().filter(|&&f| f).count();
        assert_eq!(diagnostic_lines(rt), failures);
    }

    fn fuzz_float(x: f64, y: f64) {
        let mut rt = Runtime::<Vec<u8>>::default();
        let quot = rt.safe_div(x, y);
        let rem = rt.safe_mod(x, y);
        if y.is_valid_divisor() {
            assert!(quot.to_bits() == (x / y).to_bits() || (quot.is_nan() && (x / y).is_nan()));
            assert!(rem.to_bits() == (x % y).to_bits() || (rem.is_nan() && (x % y).is_nan()));
            assert_eq!(diagnostic_lines(rt), 0);
        } else {
            assert_eq!(quot.to_bits(), 0.0_f64.to_bits());
            assert_eq!(rem.to_bits(), 0.0_f64.to_bits());
            assert_eq!(diagnostic_lines(rt), 2);
        }
    }

    fn fuzz_values(x: Value, y: Value) {
        let mut rt = Runtime::<Vec<u8>>::default();
        let quot = rt.safe_div_value(x.clone(), y.clone());
        let rem = rt.safe_mod_value(x.clone(), y.clone());
        assert!(matches!(quot, Value::Int(_) | Value::Float(_)));
        assert!(matches!(rem, Value::Int(_) | Value::Float(_)));
        let divisor_ok = y.to_numeric().is_valid_divisor();
        if !divisor_ok {
            assert_eq!(diagnostic_lines(rt), 2);
        }
        if x.strict_eq(&y) {
            assert!(x.loose_eq(&y));
        }
        assert_eq!(x.loose_eq(&y), y.loose_eq(&x));
        assert_eq!(x.strict_eq(&y), y.strict_eq(&x));
    }

    fn fuzz_guard(name: String, calls: u8) {
        let mut rt = Runtime::<Vec<u8>>::default();
        let limit = rt.calls().limit();
        let admitted = (0..calls).filter(|_| rt.call_guard(&name)).count();
        let expected = u32::from(calls).min(limit) as usize;
        assert_eq!(admitted, expected);
        assert_eq!(rt.calls().count(&name) as usize, expected);
        let out = String::from_utf8(rt.into_writer()).expect("diagnostics are utf-8");
        let refused = calls as usize - expected;
        assert_eq!(out, format!("{} reached call limit\n", name).repeat(refused));
    }

    fn fuzz_inner(input: Input) {
        match input {
            Input::Int(x, y) => fuzz_int(x, y),
            Input::Float(x, y) => fuzz_float(x, y),
            Input::Values(x, y) => fuzz_values(x, y),
            Input::Guard(name, calls) => fuzz_guard(name, calls),
        }
    }

    pub fn main() {
        loop {
            fuzz!(|data: Input| {
                fuzz_inner(data)
            });
        }
    }
}

#[cfg(not(target_os = "linux"))]
mod everything {
    pub fn main() {
        panic!("Gotta compile this on Linux!");
    }
}

fn main() {
    everything::main();
}
