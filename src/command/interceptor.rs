// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Priority-ordered hook lists.
//!
//! Higher priorities run first; hooks sharing a priority run in registration order. The same
//! ordering backs command interceptors, gesture start hooks and rule providers.

use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;

use super::{Command, CommandError, CommandName, CommandStack};

pub const DEFAULT_PRIORITY: i32 = 1000;
pub const HIGH_PRIORITY: i32 = 1500;
pub const LOW_PRIORITY: i32 = 250;

/// Which command names a hook wants to see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandFilter {
    Any,
    Names(SmallVec<[CommandName; 2]>),
}

impl CommandFilter {
    pub fn names(names: impl IntoIterator<Item = CommandName>) -> Self {
        Self::Names(names.into_iter().collect())
    }

    pub fn matches(&self, name: CommandName) -> bool {
        match self {
            Self::Any => true,
            Self::Names(names) => names.contains(&name),
        }
    }
}

impl From<CommandName> for CommandFilter {
    fn from(name: CommandName) -> Self {
        Self::names([name])
    }
}

struct Entry<H> {
    priority: i32,
    filter: CommandFilter,
    hook: H,
}

pub struct PriorityHooks<H> {
    entries: Vec<Entry<H>>,
}

impl<H> Default for PriorityHooks<H> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<H> fmt::Debug for PriorityHooks<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|e| (e.priority, &e.filter)))
            .finish()
    }
}

impl<H> PriorityHooks<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, priority: i32, filter: CommandFilter, hook: H) {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.priority < priority)
            .unwrap_or(self.entries.len());
        self.entries.insert(
            index,
            Entry {
                priority,
                filter,
                hook,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Hooks in firing order, regardless of filter.
    pub fn iter(&self) -> impl Iterator<Item = &H> {
        self.entries.iter().map(|entry| &entry.hook)
    }

    /// Hooks in firing order whose filter admits `name`.
    pub fn matching(&self, name: CommandName) -> impl Iterator<Item = &H> {
        self.entries
            .iter()
            .filter(move |entry| entry.filter.matches(name))
            .map(|entry| &entry.hook)
    }
}

/// Lifecycle points at which command hooks fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Before the handler runs; hooks may rewrite the command or issue nested commands.
    PreExecute,
    /// Right after the handler mutated the graph, and again for every redone step.
    Executed,
    /// After the handler's own follow-up work.
    PostExecute,
    /// After a step was undone.
    Reverted,
}

pub type CommandHook = Rc<dyn Fn(&mut CommandStack, &mut Command) -> Result<(), CommandError>>;

/// Command hooks of one [`CommandStack`], one priority list per [`Phase`].
#[derive(Debug, Default)]
pub struct Interceptor {
    pre_execute: PriorityHooks<CommandHook>,
    executed: PriorityHooks<CommandHook>,
    post_execute: PriorityHooks<CommandHook>,
    reverted: PriorityHooks<CommandHook>,
}

impl Interceptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on<F>(&mut self, phase: Phase, filter: impl Into<CommandFilter>, priority: i32, hook: F)
    where
        F: Fn(&mut CommandStack, &mut Command) -> Result<(), CommandError> + 'static,
    {
        self.phase_mut(phase)
            .add(priority, filter.into(), Rc::new(hook));
    }

    pub fn pre_execute<F>(&mut self, filter: impl Into<CommandFilter>, hook: F)
    where
        F: Fn(&mut CommandStack, &mut Command) -> Result<(), CommandError> + 'static,
    {
        self.on(Phase::PreExecute, filter, DEFAULT_PRIORITY, hook);
    }

    pub fn post_execute<F>(&mut self, filter: impl Into<CommandFilter>, hook: F)
    where
        F: Fn(&mut CommandStack, &mut Command) -> Result<(), CommandError> + 'static,
    {
        self.on(Phase::PostExecute, filter, DEFAULT_PRIORITY, hook);
    }

    /// Snapshot of the hooks to fire, so they can borrow the stack mutably while running.
    pub(crate) fn hooks(&self, phase: Phase, name: CommandName) -> SmallVec<[CommandHook; 4]> {
        self.phase(phase).matching(name).cloned().collect()
    }

    fn phase(&self, phase: Phase) -> &PriorityHooks<CommandHook> {
        match phase {
            Phase::PreExecute => &self.pre_execute,
            Phase::Executed => &self.executed,
            Phase::PostExecute => &self.post_execute,
            Phase::Reverted => &self.reverted,
        }
    }

    fn phase_mut(&mut self, phase: Phase) -> &mut PriorityHooks<CommandHook> {
        match phase {
            Phase::PreExecute => &mut self.pre_execute,
            Phase::Executed => &mut self.executed,
            Phase::PostExecute => &mut self.post_execute,
            Phase::Reverted => &mut self.reverted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CommandFilter, PriorityHooks, DEFAULT_PRIORITY, HIGH_PRIORITY, LOW_PRIORITY};
    use crate::command::CommandName;

    #[test]
    fn higher_priority_first_then_registration_order() {
        let mut hooks = PriorityHooks::new();
        hooks.add(DEFAULT_PRIORITY, CommandFilter::Any, "default-1");
        hooks.add(LOW_PRIORITY, CommandFilter::Any, "low");
        hooks.add(HIGH_PRIORITY, CommandFilter::Any, "high");
        hooks.add(DEFAULT_PRIORITY, CommandFilter::Any, "default-2");

        let order: Vec<_> = hooks.iter().copied().collect();
        assert_eq!(order, vec!["high", "default-1", "default-2", "low"]);
    }

    #[test]
    fn filters_select_by_command_name() {
        let mut hooks = PriorityHooks::new();
        hooks.add(DEFAULT_PRIORITY, CommandName::ShapesMove.into(), "move");
        hooks.add(DEFAULT_PRIORITY, CommandFilter::Any, "any");

        let on_move: Vec<_> = hooks.matching(CommandName::ShapesMove).copied().collect();
        let on_attach: Vec<_> = hooks.matching(CommandName::ShapeAttach).copied().collect();
        assert_eq!(on_move, vec!["move", "any"]);
        assert_eq!(on_attach, vec!["any"]);
    }
}
