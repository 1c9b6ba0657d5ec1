//! Report renderers
//!
//! Console summary/detail and the static HTML document. Both are driven
//! off the same registry traversal and statistics rollup, are read-only
//! with respect to test state, and may be invoked repeatedly.

pub mod console;
pub mod html;

pub use console::ConsoleReport;
pub use html::HtmlReport;

use chrono::{DateTime, Utc};

/// Format a run timestamp as ISO 8601, e.g. `2026-08-06T10:32:00+0000`.
pub fn timestamp_string(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:%S%z").to_string()
}
