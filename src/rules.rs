// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Rule oracle consulted by the gesture workflows.

use std::rc::Rc;

use crate::command::{CommandFilter, CommandName, PriorityHooks};
use crate::model::{Element, ElementId, Graph, Point};

/// Classification of a proposed edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Allowed,
    Disallowed,
    /// Allowed, and the target becomes the host of the dropped shape.
    Attach,
    /// No opinion; the hover target is ignored.
    Indeterminate,
}

impl Verdict {
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed | Self::Attach)
    }
}

impl From<bool> for Verdict {
    fn from(allowed: bool) -> Self {
        if allowed {
            Self::Allowed
        } else {
            Self::Disallowed
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum RuleContext<'a> {
    ShapeCreate {
        shape: &'a Element,
        target: &'a ElementId,
        position: Point,
    },
    ShapeAppend {
        source: &'a ElementId,
        shape: &'a Element,
        target: &'a ElementId,
    },
    ShapesMove {
        shapes: &'a [ElementId],
        target: &'a ElementId,
        delta: Point,
    },
}

impl RuleContext<'_> {
    pub fn name(&self) -> CommandName {
        match self {
            Self::ShapeCreate { .. } => CommandName::ShapeCreate,
            Self::ShapeAppend { .. } => CommandName::ShapeAppend,
            Self::ShapesMove { .. } => CommandName::ShapesMove,
        }
    }

    pub fn target(&self) -> &ElementId {
        match self {
            Self::ShapeCreate { target, .. }
            | Self::ShapeAppend { target, .. }
            | Self::ShapesMove { target, .. } => target,
        }
    }
}

pub trait Rules {
    fn allowed(&self, graph: &Graph, context: &RuleContext<'_>) -> Verdict;
}

pub type Rule = Rc<dyn Fn(&Graph, &RuleContext<'_>) -> Option<Verdict>>;

/// Rules registered per command name and priority. The first rule returning a verdict wins;
/// when none has an opinion the edit is allowed.
#[derive(Debug, Default)]
pub struct RuleSet {
    rules: PriorityHooks<Rule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_rule<F>(&mut self, names: impl Into<CommandFilter>, priority: i32, rule: F)
    where
        F: Fn(&Graph, &RuleContext<'_>) -> Option<Verdict> + 'static,
    {
        self.rules.add(priority, names.into(), Rc::new(rule));
    }
}

impl Rules for RuleSet {
    fn allowed(&self, graph: &Graph, context: &RuleContext<'_>) -> Verdict {
        self.rules
            .matching(context.name())
            .find_map(|rule| rule(graph, context))
            .unwrap_or(Verdict::Allowed)
    }
}

#[cfg(test)]
mod tests {
    use super::{RuleContext, RuleSet, Rules, Verdict};
    use crate::command::{CommandName, DEFAULT_PRIORITY, HIGH_PRIORITY};
    use crate::model::fixtures::{attach_scene, eid};
    use crate::model::Point;

    #[test]
    fn no_opinion_means_allowed() {
        let graph = attach_scene();
        let rules = RuleSet::new();
        let shapes = [eid("attacher")];
        let target = eid("host2");
        let context = RuleContext::ShapesMove {
            shapes: &shapes,
            target: &target,
            delta: Point::ZERO,
        };
        assert_eq!(rules.allowed(&graph, &context), Verdict::Allowed);
    }

    #[test]
    fn first_opinion_in_priority_order_wins() {
        let graph = attach_scene();
        let mut rules = RuleSet::new();
        rules.add_rule(CommandName::ShapesMove, DEFAULT_PRIORITY, |_, _| {
            Some(Verdict::Disallowed)
        });
        rules.add_rule(CommandName::ShapesMove, HIGH_PRIORITY, |_, context| {
            (context.target().as_str() == "host2").then_some(Verdict::Attach)
        });

        let shapes = [eid("attacher")];
        let (host, host2) = (eid("host"), eid("host2"));
        let onto_host2 = RuleContext::ShapesMove {
            shapes: &shapes,
            target: &host2,
            delta: Point::ZERO,
        };
        let onto_host = RuleContext::ShapesMove {
            shapes: &shapes,
            target: &host,
            delta: Point::ZERO,
        };
        assert_eq!(rules.allowed(&graph, &onto_host2), Verdict::Attach);
        assert_eq!(rules.allowed(&graph, &onto_host), Verdict::Disallowed);
    }

    #[test]
    fn attach_and_allowed_are_truthy() {
        assert!(Verdict::Attach.is_allowed());
        assert!(Verdict::Allowed.is_allowed());
        assert!(!Verdict::Disallowed.is_allowed());
        assert!(!Verdict::Indeterminate.is_allowed());
    }
}
