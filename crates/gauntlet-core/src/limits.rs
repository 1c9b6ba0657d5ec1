//! Capacity configuration for the bounded containers
//!
//! Every container in the entity model is strictly bounded. These values
//! are the configuration surface for those bounds; exceeding one is a
//! configuration fault surfaced as [`crate::ConfigError`], never a silent
//! truncation.

/// Max. test cases per group
pub const MAX_CASES_PER_GROUP: usize = 256;

/// Max. groups per module
pub const MAX_GROUPS_PER_MODULE: usize = 128;

/// Max. entries in the root registry
pub const MAX_ROOT_ITEMS: usize = 32;

/// Max. formatted diagnostic message length in bytes
pub const MAX_MESSAGE_LEN: usize = 256;
