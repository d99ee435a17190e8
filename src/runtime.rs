use std::fmt::Display;
use std::io::{self, Stdout, Write};
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};
use tracing::{debug, warn};
use crate::arith::{ArithErr, ArithOp, SafeArith, Value};
use crate::config::RuntimeOptions;
use crate::guard::CallGuard;

/// Runs guarded operations, turning every failure into one diagnostic line on
/// `out` plus a safe default. Nothing here panics or returns an error.
#[derive(Debug)]
pub struct Runtime<W: Write> {
    out: W,
    calls: CallGuard,
}

impl<W: Write> Runtime<W> {
    pub fn new(out: W, options: RuntimeOptions) -> Self {
        Runtime {
            out,
            calls: CallGuard::new(options.call_limit),
        }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    pub fn into_writer(self) -> W {
        self.out
    }

    pub fn calls(&self) -> &CallGuard {
        &self.calls
    }

    pub fn safe_div<T: SafeArith>(&mut self, x: T, y: T) -> T {
        self.guarded(ArithOp::Div, x, y)
    }

    pub fn safe_mod<T: SafeArith>(&mut self, x: T, y: T) -> T {
        self.guarded(ArithOp::Rem, x, y)
    }

    pub fn safe_div_value(&mut self, x: impl Into<Value>, y: impl Into<Value>) -> Value {
        self.guarded_value(ArithOp::Div, x.into(), y.into())
    }

    pub fn safe_mod_value(&mut self, x: impl Into<Value>, y: impl Into<Value>) -> Value {
        self.guarded_value(ArithOp::Rem, x.into(), y.into())
    }

    fn guarded<T: SafeArith>(&mut self, op: ArithOp, x: T, y: T) -> T {
        match x.try_op(op, y) {
            Ok(n) => n,
            Err(err) => {
                self.arith_failed(err);
                T::ZERO
            },
        }
    }

    fn guarded_value(&mut self, op: ArithOp, x: Value, y: Value) -> Value {
        match x.try_op(op, &y) {
            Ok(v) => v,
            Err(err) => {
                self.arith_failed(err);
                Value::Int(0)
            },
        }
    }

    /// Faults and bad divisors share one message.
    fn arith_failed(&mut self, err: ArithErr) {
        debug!(op = %err.op(), reason = %err, "guarded arithmetic rejected");
        self.diagnostic(format_args!("invalid argument in {}", err.op()));
    }

    /// `true` while `name` is under its call limit. Advisory: the caller is
    /// expected to skip the guarded action on `false`.
    pub fn call_guard(&mut self, name: &str) -> bool {
        match self.calls.enter(name) {
            Ok(count) => {
                debug!(entry = name, count, "call admitted");
                true
            },
            Err(err) => {
                debug!(entry = name, limit = self.calls.limit(), "call refused");
                self.diagnostic(err);
                false
            },
        }
    }

    pub fn reset_call_counts(&mut self) {
        self.calls.reset();
    }

    pub fn dump_with_location(&mut self, file: &str, line: u32, value: impl Into<Value>) {
        let value = value.into();
        self.diagnostic(format_args!("{}:{}: {}", file, line, value.dump()));
    }

    fn diagnostic(&mut self, line: impl Display) {
        if let Err(err) = writeln!(self.out, "{}", line) {
            warn!(%err, "failed to write diagnostic");
        }
    }
}

impl<W: Write + Default> Default for Runtime<W> {
    fn default() -> Self {
        Runtime::new(W::default(), RuntimeOptions::default())
    }
}

static_assertions::assert_impl_all!(Runtime<Stdout>: Send);

fn global() -> MutexGuard<'static, Runtime<Stdout>> {
    static GLOBAL: OnceLock<Mutex<Runtime<Stdout>>> = OnceLock::new();
    GLOBAL
        .get_or_init(|| {
            let options = RuntimeOptions::from_env().unwrap_or_else(|err| {
                warn!(error = ?err, "ignoring runtime options from the environment");
                RuntimeOptions::default()
            });
            Mutex::new(Runtime::new(io::stdout(), options))
        })
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

pub fn safe_div<T: SafeArith>(x: T, y: T) -> T {
    global().safe_div(x, y)
}

pub fn safe_mod<T: SafeArith>(x: T, y: T) -> T {
    global().safe_mod(x, y)
}

pub fn safe_div_value(x: impl Into<Value>, y: impl Into<Value>) -> Value {
    global().safe_div_value(x, y)
}

pub fn safe_mod_value(x: impl Into<Value>, y: impl Into<Value>) -> Value {
    global().safe_mod_value(x, y)
}

pub fn call_guard(name: &str) -> bool {
    global().call_guard(name)
}

pub fn reset_call_counts() {
    global().reset_call_counts();
}

pub fn dump_with_location(file: &str, line: u32, value: impl Into<Value>) {
    global().dump_with_location(file, line, value);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runtime() -> Runtime<Vec<u8>> {
        Runtime::default()
    }

    fn output(rt: &Runtime<Vec<u8>>) -> &str {
        std::str::from_utf8(rt.writer()).unwrap()
    }

    #[test]
    fn divide_by_zero() {
        let mut rt = runtime();
        assert_eq!(rt.safe_div(10, 0), 0);
        assert_eq!(output(&rt), "invalid argument in /\n");
    }

    #[test]
    fn divide_ok_is_silent() {
        let mut rt = runtime();
        assert_eq!(rt.safe_div(10, 2), 5);
        assert_eq!(rt.safe_mod(10_u32, 4), 2);
        assert_eq!(rt.safe_div(-9.0, 2.0), -4.5);
        assert_eq!(output(&rt), "");
    }

    #[test]
    fn modulo_by_zero() {
        let mut rt = runtime();
        assert_eq!(rt.safe_mod(10_i64, 0), 0);
        assert_eq!(rt.safe_mod(1.5_f64, 0.0), 0.0);
        assert_eq!(output(&rt), "invalid argument in %\ninvalid argument in %\n");
    }

    #[test]
    fn nan_divisor() {
        let mut rt = runtime();
        assert_eq!(rt.safe_div(1.0, f64::NAN), 0.0);
        assert_eq!(rt.safe_mod(1.0_f32, f32::NAN), 0.0);
        assert_eq!(output(&rt), "invalid argument in /\ninvalid argument in %\n");
    }

    #[test]
    fn float_modulo_truncates() {
        let mut rt = runtime();
        assert_eq!(rt.safe_mod_value(7.5, 2), Value::Int(1));
        assert_eq!(rt.safe_mod_value("-7.9", 3.2), Value::Int(-1));
        assert_eq!(output(&rt), "");
        assert_eq!(rt.safe_mod_value(7.5, 0.5), Value::Int(0));
        assert_eq!(output(&rt), "invalid argument in %\n");
    }

    #[test]
    fn dump_raw_strings_and_big_floats() {
        let mut rt = runtime();
        rt.dump_with_location("a.php", 3, "1\n2");
        rt.dump_with_location("a.php", 4, 1e20);
        assert_eq!(output(&rt), "a.php:3: string(3) \"1\n2\"\na.php:4: float(1.0E+20)\n");
    }

    #[test]
    fn overflow_is_reported() {
        let mut rt = runtime();
        assert_eq!(rt.safe_div(i64::MIN, -1), 0);
        assert_eq!(rt.safe_mod(i64::MIN, -1), 0);
        assert_eq!(output(&rt), "invalid argument in /\ninvalid argument in %\n");
    }

    #[test]
    fn polymorphic_ops() {
        let mut rt = runtime();
        assert_eq!(rt.safe_div_value(10, 4), Value::Float(2.5));
        assert_eq!(rt.safe_mod_value(10, 4), Value::Int(2));
        assert_eq!(output(&rt), "");
        assert_eq!(rt.safe_div_value("12", Value::Null), Value::Int(0));
        assert_eq!(rt.safe_mod_value(2.5, false), Value::Int(0));
        assert_eq!(output(&rt), "invalid argument in /\ninvalid argument in %\n");
    }

    #[test]
    fn call_limit() {
        let mut rt = runtime();
        let admitted: Vec<bool> = (0..12).map(|_| rt.call_guard("f")).collect();
        assert_eq!(&admitted[..10], [true; 10]);
        assert_eq!(&admitted[10..], [false, false]);
        assert_eq!(output(&rt), "f reached call limit\nf reached call limit\n");
        assert!(rt.call_guard("g"));
        assert_eq!(rt.calls().count("f"), 10);
    }

    #[test]
    fn call_limit_from_options() {
        let mut rt = Runtime::new(Vec::new(), RuntimeOptions { call_limit: 1 });
        assert!(rt.call_guard("f"));
        assert!(!rt.call_guard("f"));
        rt.reset_call_counts();
        assert!(rt.call_guard("f"));
        assert_eq!(output(&rt), "f reached call limit\n");
    }

    #[test]
    fn dump() {
        let mut rt = runtime();
        rt.dump_with_location("gen.php", 12, 5);
        rt.dump_with_location("gen.php", 13, "ok");
        rt.dump_with_location("gen.php", 14, f64::NAN);
        assert_eq!(
            output(&rt),
            "gen.php:12: int(5)\ngen.php:13: string(2) \"ok\"\ngen.php:14: float(NAN)\n",
        );
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn broken_writer_is_not_fatal() {
        let mut rt = Runtime::new(Broken, RuntimeOptions::default());
        assert_eq!(rt.safe_div(1, 0), 0);
        assert!(rt.call_guard("f"));
    }

    #[test]
    fn process_wide_runtime() {
        assert_eq!(safe_div(10, 2), 5);
        assert_eq!(safe_mod(7, 0), 0);
        assert_eq!(safe_div_value(1, 4), Value::Float(0.25));
        assert_eq!(safe_mod_value(9, 4), Value::Int(1));
        let limit = global().calls().limit();
        for _ in 0..limit {
            assert!(call_guard("runtime::tests::process_wide_runtime"));
        }
        assert!(!call_guard("runtime::tests::process_wide_runtime"));
        dump_with_location(file!(), line!(), true);
    }
}
