//! Test case record and run outcome

use crate::assert::CaseContext;
use crate::limits::MAX_MESSAGE_LEN;
use crate::location::SourceLocation;
use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Run outcome of a single test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The body executed zero assertions (or the case has not run yet)
    Undefined,
    /// The most recently evaluated assertion passed
    Pass,
    /// An assertion failed and aborted the body
    Fail,
}

/// Shared handle to a test case.
///
/// Cases may appear in several groups; groups reference, never own.
pub type CaseHandle = Rc<TestCase>;

/// Body procedure of a test case
pub(crate) type TestBody = Rc<dyn Fn(&mut CaseContext<'_>)>;

/// Interior run state, rewritten on every execution.
struct CaseState {
    outcome: Outcome,
    message: String,
    origin: SourceLocation,
}

/// The smallest unit of test logic: a named body plus its last recorded
/// outcome and diagnostic.
///
/// Created once at registration time and shared through [`CaseHandle`];
/// the run state is mutated only by the assertion evaluator while the
/// case's own body executes.
pub struct TestCase {
    name: String,
    location: SourceLocation,
    body: TestBody,
    echo: Cell<bool>,
    state: RefCell<CaseState>,
}

impl TestCase {
    /// Create a case bound to its body procedure.
    ///
    /// The declaration location is captured from the caller. Per-case
    /// console echo is on by default; see [`TestCase::set_echo`].
    #[track_caller]
    pub fn new(name: impl Into<String>, body: impl Fn(&mut CaseContext<'_>) + 'static) -> CaseHandle {
        let location = SourceLocation::caller();
        Rc::new(Self {
            name: name.into(),
            location,
            body: Rc::new(body),
            echo: Cell::new(true),
            state: RefCell::new(CaseState {
                outcome: Outcome::Undefined,
                message: String::new(),
                origin: location,
            }),
        })
    }

    /// Name of the case.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declaration location.
    pub fn location(&self) -> SourceLocation {
        self.location
    }

    /// Last recorded outcome.
    pub fn outcome(&self) -> Outcome {
        self.state.borrow().outcome
    }

    /// Last recorded diagnostic message (empty unless the case failed).
    pub fn message(&self) -> String {
        self.state.borrow().message.clone()
    }

    /// Origin of the diagnostic: the failing assertion's call site, or
    /// the declaration location while no failure has been recorded.
    pub fn message_origin(&self) -> SourceLocation {
        self.state.borrow().origin
    }

    /// Whether the runner echoes a one-line result for this case.
    pub fn echo(&self) -> bool {
        self.echo.get()
    }

    /// Toggle the per-case console echo line.
    pub fn set_echo(&self, echo: bool) {
        self.echo.set(echo);
    }

    pub(crate) fn body(&self) -> TestBody {
        Rc::clone(&self.body)
    }

    /// Clear run state ahead of an execution.
    pub(crate) fn reset(&self) {
        let mut state = self.state.borrow_mut();
        state.outcome = Outcome::Undefined;
        state.message.clear();
        state.origin = self.location;
    }

    pub(crate) fn record_pass(&self) {
        self.state.borrow_mut().outcome = Outcome::Pass;
    }

    pub(crate) fn record_fail(&self, message: &str, origin: SourceLocation) {
        let mut state = self.state.borrow_mut();
        state.outcome = Outcome::Fail;
        state.message.clear();
        state.message.push_str(truncate_message(message, MAX_MESSAGE_LEN));
        state.origin = origin;
    }
}

/// Truncate to at most `max` bytes without splitting a UTF-8 character.
fn truncate_message(message: &str, max: usize) -> &str {
    if message.len() <= max {
        return message;
    }
    let mut end = max;
    while !message.is_char_boundary(end) {
        end -= 1;
    }
    &message[..end]
}
