use ahash::AHashMap;
use thiserror::Error;

pub const DEFAULT_CALL_LIMIT: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{name} reached call limit")]
pub struct CallLimitErr {
    pub name: String,
}

/// Per-name invocation counter that refuses a name once it has been admitted
/// `limit` times.
#[derive(Debug, Clone)]
pub struct CallGuard {
    counts: AHashMap<String, u32>,
    limit: u32,
}

impl Default for CallGuard {
    fn default() -> Self {
        CallGuard::new(DEFAULT_CALL_LIMIT)
    }
}

impl CallGuard {
    pub fn new(limit: u32) -> Self {
        CallGuard {
            counts: AHashMap::default(),
            limit,
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Admitted calls so far; unknown names have made none.
    pub fn count(&self, name: &str) -> u32 {
        self.counts.get(name).copied().unwrap_or(0)
    }

    /// Admits one more call of `name`, or reports that it is exhausted. A
    /// refused call does not bump the counter.
    pub fn enter(&mut self, name: &str) -> Result<u32, CallLimitErr> {
        let exhausted = || CallLimitErr {
            name: name.to_owned(),
        };
        if let Some(count) = self.counts.get_mut(name) {
            if *count >= self.limit {
                return Err(exhausted());
            }
            *count += 1;
            return Ok(*count);
        }
        if self.limit == 0 {
            return Err(exhausted());
        }
        self.counts.insert(name.to_owned(), 1);
        Ok(1)
    }

    pub fn reset(&mut self) {
        self.counts.clear();
    }
}

static_assertions::assert_impl_all!(CallGuard: Send, Sync);
