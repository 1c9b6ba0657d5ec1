//! Source locations for declarations and diagnostics

use serde::Serialize;
use std::fmt;
use std::panic::Location;

/// A file/line pair identifying a source position.
///
/// Declaration locations are captured when a case/group/module is
/// constructed; diagnostic origins are captured at the assertion call
/// site. Both come from `#[track_caller]`, so callers never pass
/// file/line by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
    /// Source file path as recorded by the compiler
    pub file: &'static str,
    /// 1-based line number
    pub line: u32,
}

impl SourceLocation {
    /// Capture the location of the caller.
    #[must_use]
    #[track_caller]
    pub fn caller() -> Self {
        Location::caller().into()
    }
}

impl From<&'static Location<'static>> for SourceLocation {
    fn from(location: &'static Location<'static>) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}
