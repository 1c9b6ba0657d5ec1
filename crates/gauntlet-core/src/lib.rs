//! Gauntlet Core - test execution and reporting engine
//!
//! This library provides the complete Gauntlet engine including:
//! - The test entity model (cases, groups, modules, the root registry)
//! - Assertion evaluation with per-case abort semantics
//! - Sequential execution of the entity tree
//! - Statistics rollup and the console/HTML report renderers
//!
//! Test bodies are ordinary sequential closures. The first failing
//! assertion records a diagnostic and aborts that case only; sibling
//! cases keep running. The engine requires the default `unwind` panic
//! strategy for the case-abort boundary.
//!
//! # Example
//!
//! ```
//! use gauntlet_core::{RootRegistry, Runner, TestCase};
//!
//! let case = TestCase::new("math_still_works", |cx| {
//!     cx.check_int_eq(4, 2 + 2);
//! });
//!
//! let mut registry = RootRegistry::new("demo");
//! registry.push(case.clone()).unwrap();
//! Runner::new().with_quiet(true).run_case(&case);
//!
//! assert!(registry.stats().all_passed());
//! ```

use thiserror::Error;

/// Gauntlet framework version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Public API modules
pub mod assert;
pub mod case;
pub mod limits;
pub mod location;
pub mod registry;
pub mod report;
pub mod runner;
pub mod stats;

/// Configuration faults: defects in test-run setup, never test outcomes.
///
/// Assertion failures are recorded as data on the failing case and do not
/// appear here. A configuration fault must stop the run; it is never
/// downgraded to a silent truncation.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("group '{group}' was given {count} cases, capacity is {capacity}")]
    GroupCapacityExceeded {
        group: String,
        count: usize,
        capacity: usize,
    },

    #[error("module '{module}' was given {count} groups, capacity is {capacity}")]
    ModuleCapacityExceeded {
        module: String,
        count: usize,
        capacity: usize,
    },

    #[error("root registry is full ({capacity} entries)")]
    RegistryFull { capacity: usize },
}

/// Result type for registration operations
pub type HarnessResult<T> = Result<T, ConfigError>;

// Re-export commonly used types
pub use assert::CaseContext;
pub use case::{CaseHandle, Outcome, TestCase};
pub use location::SourceLocation;
pub use registry::{GroupHandle, ModuleHandle, RootEntry, RootRegistry, TestGroup, TestModule};
pub use report::{timestamp_string, ConsoleReport, HtmlReport};
pub use runner::Runner;
pub use stats::RunStats;
