pub mod arith;
pub mod compare;
pub mod config;
pub mod fixture;
pub mod guard;
pub mod runtime;

pub use arith::{nan, negative_infinity, positive_infinity, SafeArith, Value};
pub use compare::{loose_equal, loose_not_equal, strict_equal, strict_not_equal};
pub use config::RuntimeOptions;
pub use runtime::{
    call_guard,
    dump_with_location,
    reset_call_counts,
    safe_div,
    safe_div_value,
    safe_mod,
    safe_mod_value,
    Runtime,
};
