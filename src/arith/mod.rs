use std::fmt::{Display, Formatter, Result as FmtResult};
use std::hint::black_box;
use arbitrary::Arbitrary;
use serde::{Serialize, Deserialize};
use thiserror::Error;

pub mod safe;
pub mod special;
pub mod value;

pub use safe::*;
pub use special::*;
pub use value::*;
