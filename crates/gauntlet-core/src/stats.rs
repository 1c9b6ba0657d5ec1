//! Statistics rollup over the entity tree

use crate::case::{Outcome, TestCase};
use crate::registry::{RootEntry, RootRegistry, TestGroup, TestModule};
use serde::Serialize;
use std::ops::{Add, AddAssign};
use std::process::ExitCode;

/// Aggregate counters for any subtree of the registry.
///
/// The "not evaluated" count is derived, never stored; see
/// [`RunStats::invalid`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Cases visited
    pub total: u32,
    /// Cases whose outcome is Pass
    pub passed: u32,
    /// Cases whose outcome is Fail
    pub failed: u32,
}

impl RunStats {
    /// Cases that ran without evaluating any assertion.
    pub fn invalid(&self) -> u32 {
        self.total - self.passed - self.failed
    }

    /// True when every visited case passed.
    pub fn all_passed(&self) -> bool {
        self.passed == self.total
    }
}

impl Add for RunStats {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            total: self.total + other.total,
            passed: self.passed + other.passed,
            failed: self.failed + other.failed,
        }
    }
}

impl AddAssign for RunStats {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl TestCase {
    /// Contribution of this case to the rollup.
    pub fn stats(&self) -> RunStats {
        RunStats {
            total: 1,
            passed: u32::from(self.outcome() == Outcome::Pass),
            failed: u32::from(self.outcome() == Outcome::Fail),
        }
    }
}

impl TestGroup {
    /// Sum of the group's case contributions.
    pub fn stats(&self) -> RunStats {
        self.cases()
            .iter()
            .fold(RunStats::default(), |acc, case| acc + case.stats())
    }
}

impl TestModule {
    /// Sum of the module's group contributions.
    pub fn stats(&self) -> RunStats {
        self.groups()
            .iter()
            .fold(RunStats::default(), |acc, group| acc + group.stats())
    }
}

impl RootEntry {
    /// Contribution of this entry's subtree.
    pub fn stats(&self) -> RunStats {
        match self {
            RootEntry::Case(case) => case.stats(),
            RootEntry::Group(group) => group.stats(),
            RootEntry::Module(module) => module.stats(),
        }
    }
}

impl RootRegistry {
    /// Aggregate counts over the whole run.
    pub fn stats(&self) -> RunStats {
        self.entries()
            .iter()
            .fold(RunStats::default(), |acc, entry| acc + entry.stats())
    }

    /// Overall verdict: Pass iff every registered case passed.
    pub fn outcome(&self) -> Outcome {
        if self.stats().all_passed() {
            Outcome::Pass
        } else {
            Outcome::Fail
        }
    }

    /// Process exit convention: success iff the run passed.
    pub fn exit_code(&self) -> ExitCode {
        match self.outcome() {
            Outcome::Pass => ExitCode::SUCCESS,
            _ => ExitCode::FAILURE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::{CaseHandle, TestCase};
    use crate::registry::TestGroup;
    use crate::runner::Runner;
    use pretty_assertions::assert_eq;

    fn passing(name: &str) -> CaseHandle {
        TestCase::new(name, |cx| cx.pass())
    }

    fn failing(name: &str) -> CaseHandle {
        TestCase::new(name, |cx| cx.fail("deliberate"))
    }

    #[test]
    fn test_case_contribution() {
        let case = passing("unit");
        assert_eq!(
            case.stats(),
            RunStats {
                total: 1,
                passed: 0,
                failed: 0
            }
        );

        Runner::new().with_quiet(true).run_case(&case);
        assert_eq!(
            case.stats(),
            RunStats {
                total: 1,
                passed: 1,
                failed: 0
            }
        );
    }

    #[test]
    fn test_group_rollup_with_two_failures() {
        let group = TestGroup::new(
            "five",
            vec![
                passing("one"),
                failing("two"),
                passing("three"),
                failing("four"),
                passing("five"),
            ],
        )
        .unwrap();

        Runner::new().with_quiet(true).run_group(&group);

        let stats = group.stats();
        assert_eq!(
            stats,
            RunStats {
                total: 5,
                passed: 3,
                failed: 2
            }
        );
        assert_eq!(stats.invalid(), 0);
        assert!(!stats.all_passed());
    }

    #[test]
    fn test_invalid_is_derived() {
        let group = TestGroup::new(
            "mixed",
            vec![passing("ran"), TestCase::new("never_asserts", |_| {})],
        )
        .unwrap();

        Runner::new().with_quiet(true).run_group(&group);

        let stats = group.stats();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.passed, 1);
        assert_eq!(stats.failed, 0);
        assert_eq!(stats.invalid(), 1);
    }

    #[test]
    fn test_registry_verdict() {
        let mut registry = RootRegistry::new("proj");
        let good = passing("good");
        let bad = failing("bad");
        registry.push(good.clone()).unwrap();
        registry.push(bad.clone()).unwrap();

        let runner = Runner::new().with_quiet(true);
        runner.run_registry(&registry);

        assert_eq!(registry.outcome(), Outcome::Fail);
        assert_eq!(
            registry.stats(),
            RunStats {
                total: 2,
                passed: 1,
                failed: 1
            }
        );
    }

    #[test]
    fn test_empty_registry_passes() {
        let registry = RootRegistry::new("empty");
        assert!(registry.stats().all_passed());
        assert_eq!(registry.outcome(), Outcome::Pass);
    }

    #[test]
    fn test_stats_addition() {
        let mut acc = RunStats {
            total: 2,
            passed: 1,
            failed: 1,
        };
        acc += RunStats {
            total: 3,
            passed: 3,
            failed: 0,
        };
        assert_eq!(
            acc,
            RunStats {
                total: 5,
                passed: 4,
                failed: 1
            }
        );
    }
}
