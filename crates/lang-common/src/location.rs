//! Source locations attached to syntax nodes for diagnostics.

use std::fmt;
use std::sync::Arc;

/// A position in a source file, used exclusively for diagnostics.
///
/// The core never compares locations for type-identity purposes; two
/// identically-typed nodes at different locations are still unified freely.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Location {
    pub file: Arc<str>,
    pub line: u32,
    pub column: u32,
}

impl Location {
    pub fn new(file: impl Into<Arc<str>>, line: u32, column: u32) -> Self {
        Location { file: file.into(), line, column }
    }

    /// A placeholder location for synthetic nodes (intrinsics, builder
    /// defaults) that were never lexed from source text.
    pub fn synthetic() -> Self {
        Location { file: Arc::from("<synthetic>"), line: 0, column: 0 }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}
