use std::env;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::guard::DEFAULT_CALL_LIMIT;

pub const CALL_LIMIT_ENV: &str = "FUZZLIB_CALL_LIMIT";

#[derive(Debug, Error)]
pub enum ConfigErr {
    #[error("malformed runtime options: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{var} must be a non-negative integer, got {value:?}")]
    BadEnv {
        var: &'static str,
        value: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeOptions {
    /// How many times one name may pass the call guard.
    pub call_limit: u32,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        RuntimeOptions {
            call_limit: DEFAULT_CALL_LIMIT,
        }
    }
}

impl RuntimeOptions {
    pub fn from_json(s: &str) -> Result<Self, ConfigErr> {
        Ok(serde_json::from_str(s)?)
    }

    /// Defaults overridden by whatever is set in the environment.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    pub(crate) fn from_lookup(
        lookup: impl Fn(&'static str) -> Option<String>,
    ) -> anyhow::Result<Self> {
        let mut options = RuntimeOptions::default();
        if let Some(value) = lookup(CALL_LIMIT_ENV) {
            options.call_limit = value
                .trim()
                .parse()
                .map_err(|_| ConfigErr::BadEnv {
                    var: CALL_LIMIT_ENV,
                    value: value.clone(),
                })
                .context("loading runtime options from the environment")?;
        }
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        assert_eq!(RuntimeOptions::default().call_limit, 10);
        assert_eq!(RuntimeOptions::from_json("{}").unwrap(), RuntimeOptions::default());
    }

    #[test]
    fn json() {
        let options = RuntimeOptions::from_json(r#"{"call_limit": 3}"#).unwrap();
        assert_eq!(options.call_limit, 3);
        assert!(matches!(
            RuntimeOptions::from_json(r#"{"call_limit": -1}"#),
            Err(ConfigErr::Json(_)),
        ));
    }

    #[test]
    fn environment() {
        let options = RuntimeOptions::from_lookup(|_| None).unwrap();
        assert_eq!(options, RuntimeOptions::default());
        let options = RuntimeOptions::from_lookup(|_| Some(" 25 ".to_owned())).unwrap();
        assert_eq!(options.call_limit, 25);
        let err = RuntimeOptions::from_lookup(|_| Some("lots".to_owned())).unwrap_err();
        assert!(format!("{:#}", err).contains("FUZZLIB_CALL_LIMIT"));
    }
}
