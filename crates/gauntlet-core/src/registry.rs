//! Test groups, modules and the run root registry

use crate::case::{CaseHandle, TestCase};
use crate::limits;
use crate::location::SourceLocation;
use crate::{ConfigError, HarnessResult};
use std::rc::Rc;

/// Shared handle to a test group
pub type GroupHandle = Rc<TestGroup>;

/// Shared handle to a test module
pub type ModuleHandle = Rc<TestModule>;

/// An ordered, capacity-bounded collection of test cases.
///
/// Groups reference their cases; a case may belong to several groups.
/// The child list is fixed at construction.
pub struct TestGroup {
    name: String,
    location: SourceLocation,
    cases: Vec<CaseHandle>,
}

impl std::fmt::Debug for TestGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestGroup")
            .field("name", &self.name)
            .field("location", &self.location)
            .field("cases", &self.cases.len())
            .finish()
    }
}

impl TestGroup {
    /// Construct a group from an ordered case list.
    ///
    /// Fails with [`ConfigError::GroupCapacityExceeded`] when the list is
    /// longer than [`limits::MAX_CASES_PER_GROUP`].
    #[track_caller]
    pub fn new(name: impl Into<String>, cases: Vec<CaseHandle>) -> HarnessResult<GroupHandle> {
        let name = name.into();
        if cases.len() > limits::MAX_CASES_PER_GROUP {
            return Err(ConfigError::GroupCapacityExceeded {
                group: name,
                count: cases.len(),
                capacity: limits::MAX_CASES_PER_GROUP,
            });
        }
        Ok(Rc::new(Self {
            name,
            location: SourceLocation::caller(),
            cases,
        }))
    }

    /// Name of the group.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declaration location.
    pub fn location(&self) -> SourceLocation {
        self.location
    }

    /// Cases in declaration order.
    pub fn cases(&self) -> &[CaseHandle] {
        &self.cases
    }
}

/// An ordered, capacity-bounded collection of test groups.
pub struct TestModule {
    name: String,
    location: SourceLocation,
    groups: Vec<GroupHandle>,
}

impl TestModule {
    /// Construct a module from an ordered group list.
    ///
    /// Fails with [`ConfigError::ModuleCapacityExceeded`] when the list
    /// is longer than [`limits::MAX_GROUPS_PER_MODULE`].
    #[track_caller]
    pub fn new(name: impl Into<String>, groups: Vec<GroupHandle>) -> HarnessResult<ModuleHandle> {
        let name = name.into();
        if groups.len() > limits::MAX_GROUPS_PER_MODULE {
            return Err(ConfigError::ModuleCapacityExceeded {
                module: name,
                count: groups.len(),
                capacity: limits::MAX_GROUPS_PER_MODULE,
            });
        }
        Ok(Rc::new(Self {
            name,
            location: SourceLocation::caller(),
            groups,
        }))
    }

    /// Name of the module.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declaration location.
    pub fn location(&self) -> SourceLocation {
        self.location
    }

    /// Groups in declaration order.
    pub fn groups(&self) -> &[GroupHandle] {
        &self.groups
    }
}

/// A top-level entity registered for one run.
pub enum RootEntry {
    /// A bare case run at root level
    Case(CaseHandle),
    /// A case group
    Group(GroupHandle),
    /// A module of groups
    Module(ModuleHandle),
}

impl RootEntry {
    /// Visit every case under this entry in declaration order.
    pub fn for_each_case(&self, f: &mut dyn FnMut(&TestCase)) {
        match self {
            RootEntry::Case(case) => f(case),
            RootEntry::Group(group) => {
                for case in group.cases() {
                    f(case);
                }
            }
            RootEntry::Module(module) => {
                for group in module.groups() {
                    for case in group.cases() {
                        f(case);
                    }
                }
            }
        }
    }
}

impl From<CaseHandle> for RootEntry {
    fn from(case: CaseHandle) -> Self {
        RootEntry::Case(case)
    }
}

impl From<GroupHandle> for RootEntry {
    fn from(group: GroupHandle) -> Self {
        RootEntry::Group(group)
    }
}

impl From<ModuleHandle> for RootEntry {
    fn from(module: ModuleHandle) -> Self {
        RootEntry::Module(module)
    }
}

/// Ordered record of the top-level entities executed in one run.
///
/// Built append-only during a run and consumed by the aggregator and the
/// report renderers once the run is finished.
pub struct RootRegistry {
    name: String,
    entries: Vec<RootEntry>,
}

impl RootRegistry {
    /// Create an empty registry for the named project.
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            name: project_name.into(),
            entries: Vec::new(),
        }
    }

    /// Project name shown in report headers.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a top-level entity.
    ///
    /// Fails with [`ConfigError::RegistryFull`] once
    /// [`limits::MAX_ROOT_ITEMS`] entries have been registered.
    pub fn push(&mut self, entry: impl Into<RootEntry>) -> HarnessResult<()> {
        if self.entries.len() >= limits::MAX_ROOT_ITEMS {
            return Err(ConfigError::RegistryFull {
                capacity: limits::MAX_ROOT_ITEMS,
            });
        }
        self.entries.push(entry.into());
        Ok(())
    }

    /// Registered entries in registration order.
    pub fn entries(&self) -> &[RootEntry] {
        &self.entries
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether anything has been registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Visit every case in the registry in traversal order.
    pub fn for_each_case(&self, mut f: impl FnMut(&TestCase)) {
        for entry in &self.entries {
            entry.for_each_case(&mut f);
        }
    }
}
