//! Assertion evaluation
//!
//! Each evaluator records its verdict on the executing case. A passing
//! evaluation returns normally so the body continues; a failing one
//! formats a diagnostic, records the call site as the message origin and
//! aborts the rest of the body. The abort unwinds with a private payload
//! that the runner catches exactly at the case-run boundary, so a failure
//! never escapes the executing case.

use crate::case::TestCase;
use crate::location::SourceLocation;
use std::panic::panic_any;

/// Unwind payload distinguishing an assertion abort from a genuine panic.
pub(crate) struct AssertAbort;

/// Mutable handle passed to a test body.
///
/// All assertion methods are `#[track_caller]`: the failing call site is
/// recorded automatically as the diagnostic origin.
pub struct CaseContext<'a> {
    case: &'a TestCase,
}

impl<'a> CaseContext<'a> {
    pub(crate) fn new(case: &'a TestCase) -> Self {
        Self { case }
    }

    /// Name of the executing case.
    pub fn name(&self) -> &str {
        self.case.name()
    }

    fn passed(&mut self) {
        self.case.record_pass();
    }

    fn failed(&mut self, message: &str, origin: SourceLocation) -> ! {
        self.case.record_fail(message, origin);
        panic_any(AssertAbort);
    }

    /// Record an unconditional pass.
    #[track_caller]
    pub fn pass(&mut self) {
        self.check(true, "");
    }

    /// Fail the case with `message`.
    #[track_caller]
    pub fn fail(&mut self, message: &str) {
        self.check(false, message);
    }

    /// Evaluate a generic condition.
    ///
    /// An empty `message` substitutes the default diagnostic.
    #[track_caller]
    pub fn check(&mut self, condition: bool, message: &str) {
        if condition {
            self.passed();
        } else {
            let text = if message.is_empty() {
                "assert failed."
            } else {
                message
            };
            self.failed(text, SourceLocation::caller());
        }
    }

    /// Evaluate signed integers for equality, at maximal integer width.
    #[track_caller]
    pub fn check_int_eq(&mut self, expected: impl Into<i128>, actual: impl Into<i128>) {
        let (expected, actual) = (expected.into(), actual.into());
        if actual == expected {
            self.passed();
        } else {
            let message = format!("expected <{expected}>, but was <{actual}>");
            self.failed(&message, SourceLocation::caller());
        }
    }

    /// Evaluate floating-point values for equality within a tolerance
    /// band.
    ///
    /// `tolerance` must not be NaN; that is a caller contract, not a
    /// runtime condition.
    #[track_caller]
    pub fn check_float_eq(&mut self, expected: f64, actual: f64, tolerance: f64) {
        assert!(!tolerance.is_nan(), "tolerance must not be NaN");

        let deviation = (actual - expected).abs();
        if deviation > tolerance {
            let message = format!(
                "expected <{expected:.6}>, but was <{actual:.6}> \
                 (deviation <{deviation:.6}> exceeds <{tolerance:.6}>)"
            );
            self.failed(&message, SourceLocation::caller());
        } else {
            self.passed();
        }
    }

    /// Evaluate reference identity: both absent, or both denoting the
    /// same object.
    #[track_caller]
    pub fn check_ref_eq<T: ?Sized>(&mut self, expected: Option<&T>, actual: Option<&T>) {
        match (expected, actual) {
            (None, None) => self.passed(),
            (Some(e), Some(a)) if std::ptr::eq(e, a) => self.passed(),
            (None, Some(a)) => {
                let message = format!("expected <NULL>, but was <{a:p}>");
                self.failed(&message, SourceLocation::caller());
            }
            (Some(e), None) => {
                let message = format!("expected <{e:p}>, but was <NULL>");
                self.failed(&message, SourceLocation::caller());
            }
            (Some(e), Some(a)) => {
                let message = format!("expected <{e:p}>, but was <{a:p}>");
                self.failed(&message, SourceLocation::caller());
            }
        }
    }

    /// Evaluate a reference for presence.
    #[track_caller]
    pub fn check_ref_some<T: ?Sized>(&mut self, actual: Option<&T>) {
        if actual.is_some() {
            self.passed();
        } else {
            self.failed("<NULL> unexpected", SourceLocation::caller());
        }
    }

    /// Evaluate strings for byte-for-byte equality.
    ///
    /// The expected string is always present; absence on the actual side
    /// is an ordinary failure, reported with the `NULL` literal.
    #[track_caller]
    pub fn check_str_eq(&mut self, expected: &str, actual: Option<&str>) {
        match actual {
            Some(actual) if actual == expected => self.passed(),
            Some(actual) => {
                let message = format!("expected <{expected}>, but was <{actual}>");
                self.failed(&message, SourceLocation::caller());
            }
            None => {
                let message = format!("expected <{expected}>, but was <NULL>");
                self.failed(&message, SourceLocation::caller());
            }
        }
    }

    /// Evaluate byte ranges for equality, reporting the first
    /// mismatching offset.
    ///
    /// Slices carry their own lengths, so a length difference after a
    /// matching common prefix is reported as a mismatch at the shorter
    /// length.
    #[track_caller]
    pub fn check_bytes_eq(&mut self, expected: &[u8], actual: &[u8]) {
        if let Some(offset) = expected.iter().zip(actual).position(|(e, a)| e != a) {
            let message = format!(
                "mismatch at offset <{offset}>: expected <{:#04X}>, but was <{:#04X}>",
                expected[offset], actual[offset]
            );
            self.failed(&message, SourceLocation::caller());
        }
        if expected.len() != actual.len() {
            let message = format!(
                "length mismatch: expected <{}> bytes, but was <{}>",
                expected.len(),
                actual.len()
            );
            self.failed(&message, SourceLocation::caller());
        }
        self.passed();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::{Outcome, TestCase};
    use crate::runner::Runner;
    use proptest::prelude::*;

    /// Run a single body under the real case boundary and return the
    /// recorded outcome and message.
    fn eval(body: impl Fn(&mut CaseContext<'_>) + 'static) -> (Outcome, String) {
        let case = TestCase::new("probe", body);
        Runner::new().with_quiet(true).run_case(&case);
        (case.outcome(), case.message())
    }

    #[test]
    fn test_pass_and_fail() {
        let (outcome, message) = eval(|cx| cx.pass());
        assert_eq!(outcome, Outcome::Pass);
        assert_eq!(message, "");

        let (outcome, message) = eval(|cx| cx.fail("always fails"));
        assert_eq!(outcome, Outcome::Fail);
        assert_eq!(message, "always fails");
    }

    #[test]
    fn test_check_default_message() {
        let (outcome, message) = eval(|cx| cx.check(false, ""));
        assert_eq!(outcome, Outcome::Fail);
        insta::assert_snapshot!(message, @"assert failed.");
    }

    #[test]
    fn test_int_equality() {
        let (outcome, _) = eval(|cx| cx.check_int_eq(7, 7));
        assert_eq!(outcome, Outcome::Pass);

        let (outcome, message) = eval(|cx| cx.check_int_eq(5, 3));
        assert_eq!(outcome, Outcome::Fail);
        insta::assert_snapshot!(message, @"expected <5>, but was <3>");
    }

    #[test]
    fn test_int_equality_negative_and_wide() {
        let (outcome, message) = eval(|cx| cx.check_int_eq(-1i64, u64::MAX));
        assert_eq!(outcome, Outcome::Fail);
        assert!(message.contains("<-1>"));
        assert!(message.contains(&u64::MAX.to_string()));
    }

    #[test]
    fn test_float_within_tolerance() {
        let (outcome, _) = eval(|cx| cx.check_float_eq(10.0, 10.5, 0.5));
        assert_eq!(outcome, Outcome::Pass);
    }

    #[test]
    fn test_float_beyond_tolerance() {
        let (outcome, message) = eval(|cx| cx.check_float_eq(10.0, 10.6, 0.5));
        assert_eq!(outcome, Outcome::Fail);
        insta::assert_snapshot!(
            message,
            @"expected <10.000000>, but was <10.600000> (deviation <0.600000> exceeds <0.500000>)"
        );
    }

    #[test]
    fn test_ref_identity() {
        let value = 17u32;
        let other = 17u32;

        let (outcome, _) = eval(move |cx| cx.check_ref_eq(Some(&value), Some(&value)));
        assert_eq!(outcome, Outcome::Pass);

        let (outcome, _) = eval(|cx| cx.check_ref_eq::<u32>(None, None));
        assert_eq!(outcome, Outcome::Pass);

        let (outcome, message) = eval(move |cx| cx.check_ref_eq(Some(&value), Some(&other)));
        assert_eq!(outcome, Outcome::Fail);
        assert!(message.starts_with("expected <0x"));
        assert!(message.contains(", but was <0x"));
    }

    #[test]
    fn test_ref_identity_none_wording() {
        let value = 1u8;

        let (_, message) = eval(move |cx| cx.check_ref_eq(None, Some(&value)));
        assert!(message.starts_with("expected <NULL>, but was <0x"));

        let (_, message) = eval(move |cx| cx.check_ref_eq(Some(&value), None));
        assert!(message.ends_with(", but was <NULL>"));
    }

    #[test]
    fn test_ref_some() {
        let value = 3i32;
        let (outcome, _) = eval(move |cx| cx.check_ref_some(Some(&value)));
        assert_eq!(outcome, Outcome::Pass);

        let (outcome, message) = eval(|cx| cx.check_ref_some::<i32>(None));
        assert_eq!(outcome, Outcome::Fail);
        insta::assert_snapshot!(message, @"<NULL> unexpected");
    }

    #[test]
    fn test_str_equality() {
        let (outcome, _) = eval(|cx| cx.check_str_eq("same", Some("same")));
        assert_eq!(outcome, Outcome::Pass);

        let (outcome, message) = eval(|cx| cx.check_str_eq("left", Some("right")));
        assert_eq!(outcome, Outcome::Fail);
        insta::assert_snapshot!(message, @"expected <left>, but was <right>");

        let (outcome, message) = eval(|cx| cx.check_str_eq("left", None));
        assert_eq!(outcome, Outcome::Fail);
        insta::assert_snapshot!(message, @"expected <left>, but was <NULL>");
    }

    #[test]
    fn test_bytes_equal() {
        let (outcome, _) = eval(|cx| {
            cx.check_bytes_eq(&[1, 2, 3, 4, 5, 6, 7, 8], &[1, 2, 3, 4, 5, 6, 7, 8]);
        });
        assert_eq!(outcome, Outcome::Pass);
    }

    #[test]
    fn test_bytes_mismatch_reports_offset_and_values() {
        let (outcome, message) = eval(|cx| {
            cx.check_bytes_eq(&[1, 2, 3, 0xAB, 5, 6, 7, 8], &[1, 2, 3, 0xCD, 5, 6, 7, 8]);
        });
        assert_eq!(outcome, Outcome::Fail);
        insta::assert_snapshot!(
            message,
            @"mismatch at offset <3>: expected <0xAB>, but was <0xCD>"
        );
    }

    #[test]
    fn test_bytes_length_mismatch_after_matching_prefix() {
        let (outcome, message) = eval(|cx| cx.check_bytes_eq(&[1, 2, 3], &[1, 2]));
        assert_eq!(outcome, Outcome::Fail);
        insta::assert_snapshot!(
            message,
            @"length mismatch: expected <3> bytes, but was <2>"
        );
    }

    #[test]
    fn test_empty_byte_ranges_pass() {
        let (outcome, _) = eval(|cx| cx.check_bytes_eq(&[], &[]));
        assert_eq!(outcome, Outcome::Pass);
    }

    proptest! {
        #[test]
        fn prop_byte_mismatch_reports_first_offset(
            prefix in proptest::collection::vec(any::<u8>(), 0..16),
            a in any::<u8>(),
            b in any::<u8>(),
        ) {
            prop_assume!(a != b);
            let mut expected = prefix.clone();
            expected.push(a);
            let mut actual = prefix;
            actual.push(b);

            let offset = expected.len() - 1;
            let (outcome, message) = eval(move |cx| cx.check_bytes_eq(&expected, &actual));
            prop_assert_eq!(outcome, Outcome::Fail);
            let needle = format!("offset <{offset}>");
            prop_assert!(message.contains(&needle));
        }
    }
}
