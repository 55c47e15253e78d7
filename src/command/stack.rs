// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::VecDeque;
use std::mem;

use log::{debug, warn};

use super::handlers::{self, Step};
use super::interceptor::{Interceptor, Phase};
use super::{Command, CommandError, CommandName};
use crate::canvas::Canvas;
use crate::config::EditorConfig;
use crate::model::{ElementFactory, Graph};
use crate::modeling::Modeling;

/// Steps of one top-level command (or explicit transaction), undone and redone as a unit.
#[derive(Debug, Clone)]
struct UndoRecord {
    name: CommandName,
    steps: Vec<Step>,
}

#[derive(Debug, Clone)]
struct RedoRecord {
    name: CommandName,
    commands: Vec<Command>,
}

/// Owns the graph and is the only way to change it once editing starts.
///
/// Every [`execute`](Self::execute) runs inside a transaction. Commands issued while one is
/// open (from hooks, handlers, or an explicit [`transaction`](Self::transaction)) join it, and
/// the whole group becomes a single undo record once the outermost scope succeeds.
pub struct CommandStack {
    graph: Graph,
    canvas: Box<dyn Canvas>,
    interceptor: Interceptor,
    factory: ElementFactory,
    undo_stack: VecDeque<UndoRecord>,
    redo_stack: Vec<RedoRecord>,
    pending: Vec<Step>,
    pending_name: Option<CommandName>,
    depth: usize,
    max_undo: usize,
    replaying: bool,
}

impl CommandStack {
    pub fn new(graph: Graph, canvas: impl Canvas + 'static) -> Self {
        Self::with_config(graph, canvas, &EditorConfig::default())
    }

    /// Takes ownership of `graph` and draws every element already in it.
    pub fn with_config(graph: Graph, canvas: impl Canvas + 'static, config: &EditorConfig) -> Self {
        let mut canvas: Box<dyn Canvas> = Box::new(canvas);
        for element in graph.walk() {
            if element.is_root() {
                continue;
            }
            if element.is_connection() {
                canvas.add_connection(element, element.parent());
            } else {
                canvas.add_shape(element, element.parent());
            }
        }

        Self {
            graph,
            canvas,
            interceptor: Interceptor::new(),
            factory: ElementFactory::new(),
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            pending: Vec::new(),
            pending_name: None,
            depth: 0,
            max_undo: config.max_undo,
            replaying: false,
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn canvas(&self) -> &dyn Canvas {
        self.canvas.as_ref()
    }

    pub fn canvas_mut(&mut self) -> &mut dyn Canvas {
        self.canvas.as_mut()
    }

    pub fn interceptor_mut(&mut self) -> &mut Interceptor {
        &mut self.interceptor
    }

    pub fn modeling(&mut self) -> Modeling<'_> {
        Modeling::new(self)
    }

    pub(crate) fn factory_and_graph(&mut self) -> (&mut ElementFactory, &Graph) {
        (&mut self.factory, &self.graph)
    }

    /// Whether a transaction is currently open.
    pub fn in_transaction(&self) -> bool {
        self.depth > 0
    }

    pub fn execute(&mut self, command: Command) -> Result<(), CommandError> {
        if self.replaying {
            return Err(CommandError::ReplayInProgress);
        }
        let name = command.name();
        debug!(command = name.as_str(), depth = self.depth; "Executing command");
        if self.pending_name.is_none() {
            self.pending_name = Some(name);
        }
        self.transaction(|stack| stack.dispatch(command))
    }

    /// Runs `body` as one undoable unit.
    ///
    /// Nested scopes join the outermost one. When `body` fails, the steps it already executed
    /// are reverted in reverse order and dropped, so a failed scope leaves the graph as it
    /// found it and records nothing.
    pub fn transaction<T>(
        &mut self,
        body: impl FnOnce(&mut Self) -> Result<T, CommandError>,
    ) -> Result<T, CommandError> {
        if self.replaying {
            return Err(CommandError::ReplayInProgress);
        }
        let mark = self.pending.len();
        self.depth += 1;
        let result = body(self);
        self.depth -= 1;

        match result {
            Ok(value) => {
                if self.depth == 0 {
                    self.commit();
                }
                Ok(value)
            }
            Err(err) => {
                self.rollback(mark);
                if self.depth == 0 {
                    self.pending_name = None;
                }
                Err(err)
            }
        }
    }

    fn dispatch(&mut self, mut command: Command) -> Result<(), CommandError> {
        self.fire(Phase::PreExecute, &mut command)?;
        handlers::pre_execute(self, &command)?;
        let step = handlers::execute(&mut self.graph, self.canvas.as_mut(), &command)?;
        self.pending.push(step);
        self.fire(Phase::Executed, &mut command)?;
        handlers::post_execute(self, &command)?;
        self.fire(Phase::PostExecute, &mut command)
    }

    fn fire(&mut self, phase: Phase, command: &mut Command) -> Result<(), CommandError> {
        for hook in self.interceptor.hooks(phase, command.name()) {
            hook(self, command)?;
        }
        Ok(())
    }

    fn commit(&mut self) {
        let steps = mem::take(&mut self.pending);
        let Some(name) = self.pending_name.take() else {
            return;
        };
        if steps.is_empty() {
            return;
        }
        debug!(command = name.as_str(), steps = steps.len(); "Recorded command");
        self.undo_stack.push_back(UndoRecord { name, steps });
        while self.undo_stack.len() > self.max_undo {
            self.undo_stack.pop_front();
        }
        self.redo_stack.clear();
    }

    fn rollback(&mut self, mark: usize) {
        let steps = self.pending.split_off(mark);
        if steps.is_empty() {
            return;
        }
        warn!(steps = steps.len(), depth = self.depth; "Rolling back failed transaction");
        for step in steps.into_iter().rev() {
            let name = step.name();
            if let Err(err) = step.revert(&mut self.graph, self.canvas.as_mut()) {
                warn!(command = name.as_str(), error:% = err; "Rollback step failed");
            }
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Names of the recorded commands, oldest first.
    pub fn history(&self) -> impl Iterator<Item = CommandName> + '_ {
        self.undo_stack.iter().map(|record| record.name)
    }

    /// Drops all undo and redo history; the graph is left as it is.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Reverts the newest record, step by step in reverse order.
    pub fn undo(&mut self) -> Result<(), CommandError> {
        self.ensure_idle()?;
        let record = self.undo_stack.pop_back().ok_or(CommandError::NothingToUndo)?;
        debug!(command = record.name.as_str(), steps = record.steps.len(); "Undoing command");

        self.replaying = true;
        let result = self.revert_record(record);
        self.replaying = false;
        result
    }

    fn revert_record(&mut self, record: UndoRecord) -> Result<(), CommandError> {
        let mut commands = Vec::with_capacity(record.steps.len());
        for step in record.steps.into_iter().rev() {
            let mut command = step.command();
            step.revert(&mut self.graph, self.canvas.as_mut())?;
            self.fire(Phase::Reverted, &mut command)?;
            commands.push(command);
        }
        commands.reverse();
        self.redo_stack.push(RedoRecord {
            name: record.name,
            commands,
        });
        Ok(())
    }

    /// Re-executes the most recently undone record without re-running pre/post hooks; nested
    /// commands were recorded as their own steps.
    pub fn redo(&mut self) -> Result<(), CommandError> {
        self.ensure_idle()?;
        let record = self.redo_stack.pop().ok_or(CommandError::NothingToRedo)?;
        debug!(command = record.name.as_str(), steps = record.commands.len(); "Redoing command");

        self.replaying = true;
        let result = self.replay_record(&record);
        self.replaying = false;

        match result {
            Ok(steps) => {
                self.undo_stack.push_back(UndoRecord {
                    name: record.name,
                    steps,
                });
                while self.undo_stack.len() > self.max_undo {
                    self.undo_stack.pop_front();
                }
                Ok(())
            }
            Err(err) => {
                self.redo_stack.push(record);
                Err(err)
            }
        }
    }

    fn replay_record(&mut self, record: &RedoRecord) -> Result<Vec<Step>, CommandError> {
        let mut steps = Vec::with_capacity(record.commands.len());
        for command in &record.commands {
            let replayed = handlers::execute(&mut self.graph, self.canvas.as_mut(), command)
                .and_then(|step| {
                    steps.push(step);
                    self.fire(Phase::Executed, &mut command.clone())
                });
            if let Err(err) = replayed {
                warn!(command = command.name().as_str(), error:% = err; "Redo failed, restoring");
                for step in steps.into_iter().rev() {
                    if let Err(revert_err) = step.revert(&mut self.graph, self.canvas.as_mut()) {
                        warn!(error:% = revert_err; "Restoring after failed redo failed");
                    }
                }
                return Err(err);
            }
        }
        Ok(steps)
    }

    fn ensure_idle(&self) -> Result<(), CommandError> {
        if self.replaying {
            return Err(CommandError::ReplayInProgress);
        }
        if self.depth > 0 {
            return Err(CommandError::TransactionOpen);
        }
        Ok(())
    }
}
