//! Collection overview used by the `collections` command.

use derive_getters::Getters;
use serde::Serialize;

/// Record count and sample titles of one collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct CollectionSummary {
    name: String,
    count: u64,
    titles: Vec<String>,
}

impl CollectionSummary {
    /// Create a summary.
    pub fn new(name: String, count: u64, titles: Vec<String>) -> Self {
        Self {
            name,
            count,
            titles,
        }
    }
}
