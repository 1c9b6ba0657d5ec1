//! Test execution
//!
//! Establishes the abort boundary around a single case body and walks
//! groups, modules and the root registry strictly in sequence. The
//! boundary is scoped to one case: a failing case never prevents its
//! siblings from running.

use crate::assert::{AssertAbort, CaseContext};
use crate::case::{CaseHandle, Outcome, TestCase};
use crate::registry::{GroupHandle, ModuleHandle, RootEntry, RootRegistry};
use colored::Colorize;
use std::panic::{self, AssertUnwindSafe};
use std::sync::OnceLock;

static ABORT_HOOK: OnceLock<()> = OnceLock::new();

/// Chain a panic hook that stays silent for assertion aborts.
///
/// The abort payload is an implementation detail of the boundary; only
/// genuine panics reach the previously installed hook.
fn install_abort_hook() {
    ABORT_HOOK.get_or_init(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if info.payload().downcast_ref::<AssertAbort>().is_none() {
                previous(info);
            }
        }));
    });
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(text) = payload.downcast_ref::<&str>() {
        text
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text
    } else {
        "non-string panic payload"
    }
}

/// Sequential test executor.
#[derive(Default, Clone, Copy)]
pub struct Runner {
    quiet: bool,
}

impl Runner {
    /// Create a runner with per-case echo lines enabled.
    pub fn new() -> Self {
        Self { quiet: false }
    }

    /// Suppress per-case echo lines regardless of each case's flag.
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Run a single case inside its abort boundary.
    ///
    /// The case's result and message are reset first, then the body runs
    /// to completion or to its first failing assertion. A panic that is
    /// not an assertion abort is recorded as a failure with the panic
    /// text as diagnostic.
    pub fn run_case(&self, case: &CaseHandle) {
        install_abort_hook();
        case.reset();

        let body = case.body();
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let mut cx = CaseContext::new(case);
            body(&mut cx);
        }));

        if let Err(payload) = result {
            if payload.downcast_ref::<AssertAbort>().is_none() {
                let message = format!("test body panicked: {}", panic_message(payload.as_ref()));
                case.record_fail(&message, case.location());
            }
        }

        if case.echo() && !self.quiet {
            self.echo_result(case);
        }
    }

    /// Run every case in a group, in order.
    pub fn run_group(&self, group: &GroupHandle) {
        for case in group.cases() {
            self.run_case(case);
        }
    }

    /// Run every group in a module, in order.
    pub fn run_module(&self, module: &ModuleHandle) {
        for group in module.groups() {
            self.run_group(group);
        }
    }

    /// Run every registered root entry, in registration order.
    pub fn run_registry(&self, registry: &RootRegistry) {
        for entry in registry.entries() {
            match entry {
                RootEntry::Case(case) => self.run_case(case),
                RootEntry::Group(group) => self.run_group(group),
                RootEntry::Module(module) => self.run_module(module),
            }
        }
    }

    /// One compiler-style result line, parseable by IDE error parsers.
    fn echo_result(&self, case: &TestCase) {
        let location = case.location();
        match case.outcome() {
            Outcome::Pass => println!(
                "{}:{}:0: {}: {} passed.",
                location.file,
                location.line,
                "info".green(),
                case.name()
            ),
            Outcome::Fail => {
                let origin = case.message_origin();
                println!(
                    "{}:{}:0: {}: {} failed.",
                    location.file,
                    location.line,
                    "error".red().bold(),
                    case.name()
                );
                println!(
                    "{}:{}:0: {}: {}",
                    origin.file,
                    origin.line,
                    "error".red().bold(),
                    case.message()
                );
            }
            Outcome::Undefined => println!(
                "{}:{}:0: {}: {} not evaluated.",
                location.file,
                location.line,
                "warning".yellow(),
                case.name()
            ),
        }
    }
}
