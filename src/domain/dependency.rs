//! Vendored dependency descriptors

use serde::{Deserialize, Serialize};
use std::fmt;

/// A third-party source repository cloned into the vendor directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencySpec {
    /// Directory name under the vendor directory
    pub name: String,
    /// Git remote URL
    pub url: String,
    /// Branch (or tag) checked out on clone
    pub branch: String,
    /// Clone the entire history instead of a depth-1 snapshot
    #[serde(default)]
    pub full_clone: bool,
}

impl DependencySpec {
    /// Creates a new shallow-cloned dependency
    pub fn new(name: impl Into<String>, url: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            branch: branch.into(),
            full_clone: false,
        }
    }

    /// Marks this dependency as requiring the full history (builder pattern)
    pub fn with_full_clone(mut self, full_clone: bool) -> Self {
        self.full_clone = full_clone;
        self
    }
}

impl fmt::Display for DependencySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let depth = if self.full_clone { "full" } else { "shallow" };
        write!(f, "{}@{} ({}) [{}]", self.name, self.branch, self.url, depth)
    }
}
