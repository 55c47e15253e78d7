// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;

use super::moving::MoveWorkflow;
use crate::command::HIGH_PRIORITY;
use crate::model::{ElementId, Graph};

/// Labels follow their target; a label selected together with its target is not moved on its
/// own.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelSupport;

impl LabelSupport {
    pub fn install(moves: &mut MoveWorkflow) {
        moves.on_start(HIGH_PRIORITY, |graph, context| {
            context.shapes = remove_labels(graph, &context.shapes);
        });
    }
}

pub fn remove_labels(graph: &Graph, elements: &[ElementId]) -> Vec<ElementId> {
    let selected: BTreeSet<&ElementId> = elements.iter().collect();
    elements
        .iter()
        .filter(|id| {
            !graph
                .get(id)
                .and_then(|element| element.label_target())
                .is_some_and(|target| selected.contains(target))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::remove_labels;
    use crate::model::fixtures::{container_scene, eid};

    #[test]
    fn label_with_selected_target_is_dropped() {
        let graph = container_scene();
        let kept = remove_labels(&graph, &[eid("child_a"), eid("child_a_label")]);
        assert_eq!(kept, vec![eid("child_a")]);
    }

    #[test]
    fn label_alone_is_kept() {
        let graph = container_scene();
        let kept = remove_labels(&graph, &[eid("child_a_label"), eid("child_b")]);
        assert_eq!(kept, vec![eid("child_a_label"), eid("child_b")]);
    }
}
