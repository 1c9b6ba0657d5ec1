//! Bundled demonstration suite
//!
//! Exercises every assertion kind. The deliberately failing case and the
//! never-asserting case exist so a demo run shows each reportable
//! outcome; because of them the demo verdict is always FAIL.

use anyhow::Result;
use gauntlet_core::{RootRegistry, Runner, TestCase, TestGroup, TestModule};

/// Register the demonstration entities and run them in order.
pub fn register_and_run(registry: &mut RootRegistry, runner: &Runner) -> Result<()> {
    let arithmetic = TestGroup::new(
        "arithmetic",
        vec![
            TestCase::new("int_equality", |cx| {
                cx.check_int_eq(4, 2 + 2);
            }),
            TestCase::new("float_tolerance", |cx| {
                cx.check_float_eq(1.0, 0.999_9, 0.001);
            }),
            TestCase::new("always_fails", |cx| {
                cx.fail("always fails");
            }),
        ],
    )?;

    let memory = TestGroup::new(
        "memory",
        vec![
            TestCase::new("str_equality", |cx| {
                cx.check_str_eq("gauntlet", Some("gauntlet"));
            }),
            TestCase::new("bytes_equality", |cx| {
                cx.check_bytes_eq(&[0xDE, 0xAD, 0xBE, 0xEF], &[0xDE, 0xAD, 0xBE, 0xEF]);
            }),
            TestCase::new("ref_identity", |cx| {
                static VALUE: u32 = 7;
                cx.check_ref_eq(Some(&VALUE), Some(&VALUE));
                cx.check_ref_some(Some(&VALUE));
            }),
        ],
    )?;

    let self_check = TestModule::new("self_check", vec![arithmetic, memory])?;
    registry.push(self_check.clone())?;
    runner.run_module(&self_check);

    let not_evaluated = TestCase::new("no_assertions", |_| {});
    registry.push(not_evaluated.clone())?;
    runner.run_case(&not_evaluated);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_suite_outcome_counts() {
        let mut registry = RootRegistry::new("demo");
        let runner = Runner::new().with_quiet(true);
        register_and_run(&mut registry, &runner).unwrap();

        let stats = registry.stats();
        assert_eq!(stats.total, 7);
        assert_eq!(stats.passed, 5);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.invalid(), 1);
        assert!(!stats.all_passed());
    }
}
