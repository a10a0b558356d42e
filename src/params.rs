use serde::{Deserialize, Serialize};

/// Number of destinations returned by a default query.
pub const TOP_K: usize = 5;

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Params {
    pub k: usize,
}

impl Default for Params {
    fn default() -> Self {
        Self { k: TOP_K }
    }
}
