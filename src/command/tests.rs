// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::cell::RefCell;
use std::rc::Rc;

use rstest::{fixture, rstest};

use super::{
    Command, CommandError, CommandName, CommandStack, Phase, DEFAULT_PRIORITY, HIGH_PRIORITY,
    LOW_PRIORITY,
};
use crate::canvas::SceneCanvas;
use crate::config::EditorConfig;
use crate::features::{AttachSupport, MoveWorkflow};
use crate::model::fixtures::{attach_scene, container_scene, eid};
use crate::model::{Bounds, Element, ElementId, Graph, Point, Violation};

#[fixture]
fn stack() -> CommandStack {
    CommandStack::new(attach_scene(), SceneCanvas::new())
}

fn children(graph: &Graph, id: &str) -> Vec<ElementId> {
    graph.element(&eid(id)).unwrap().children().to_vec()
}

fn host_of(graph: &Graph, id: &str) -> Option<ElementId> {
    graph.element(&eid(id)).unwrap().host().cloned()
}

#[rstest]
fn attach_undo_redo_round_trips(mut stack: CommandStack) {
    let before = stack.graph().clone();
    stack
        .modeling()
        .attach_shape(&eid("attacher"), Some(&eid("host2")))
        .unwrap();
    let after = stack.graph().clone();

    assert_eq!(host_of(&after, "attacher"), Some(eid("host2")));
    assert!(after.element(&eid("host")).unwrap().attachers().is_empty());
    assert_eq!(
        after.element(&eid("host2")).unwrap().attachers(),
        &[eid("attacher")]
    );

    stack.undo().unwrap();
    assert_eq!(stack.graph(), &before);
    stack.redo().unwrap();
    assert_eq!(stack.graph(), &after);
    assert!(stack.graph().violations().is_empty());
}

#[rstest]
fn detach_clears_host_and_undo_restores_index(mut stack: CommandStack) {
    stack
        .modeling()
        .attach_shape(&eid("host2"), Some(&eid("host")))
        .unwrap();
    stack.modeling().attach_shape(&eid("attacher"), None).unwrap();
    assert_eq!(
        stack.graph().element(&eid("host")).unwrap().attachers(),
        &[eid("host2")]
    );

    stack.undo().unwrap();
    assert_eq!(
        stack.graph().element(&eid("host")).unwrap().attachers(),
        &[eid("attacher"), eid("host2")]
    );
}

#[rstest]
#[case("attacher", "attacher", Violation::SelfHosted { id: eid("attacher") })]
#[case("host", "attacher", Violation::HostCycle { shape: eid("host"), host: eid("attacher") })]
fn invalid_attach_is_rejected_before_mutation(
    mut stack: CommandStack,
    #[case] shape: &str,
    #[case] host: &str,
    #[case] expected: Violation,
) {
    let before = stack.graph().clone();
    let err = stack
        .modeling()
        .attach_shape(&eid(shape), Some(&eid(host)))
        .unwrap_err();

    assert_eq!(err, CommandError::Invariant(expected));
    assert_eq!(stack.graph(), &before);
    assert!(!stack.can_undo());
}

#[rstest]
fn containers_cannot_attach_to_or_move_into_what_they_own() {
    let mut stack = CommandStack::new(container_scene(), SceneCanvas::new());
    let before = stack.graph().clone();

    let err = stack
        .modeling()
        .attach_shape(&eid("container"), Some(&eid("child_a")))
        .unwrap_err();
    assert_eq!(
        err,
        CommandError::Invariant(Violation::HostCycle {
            shape: eid("container"),
            host: eid("child_a"),
        })
    );

    let err = stack
        .modeling()
        .move_shapes(&[eid("container")], Point::new(5.0, 5.0), Some(&eid("child_b")), false)
        .unwrap_err();
    assert!(matches!(
        err,
        CommandError::Invariant(Violation::ParentCycle { .. })
    ));
    assert_eq!(stack.graph(), &before);
    assert!(!stack.can_undo());
}

#[rstest]
fn delete_cascades_and_undo_restores_everything() {
    let mut stack = CommandStack::new(container_scene(), SceneCanvas::new());
    let before = stack.graph().clone();

    stack.modeling().remove_shape(&eid("container")).unwrap();
    let graph = stack.graph();
    for gone in ["container", "child_a", "child_b", "flow", "exit", "child_a_label"] {
        assert!(!graph.contains(&eid(gone)), "{gone} should be removed");
        assert!(stack.canvas().graphics(&eid(gone)).is_none());
    }
    assert!(graph.element(&eid("outside")).unwrap().incoming().is_empty());
    assert_eq!(children(graph, "root"), vec![eid("outside")]);
    assert!(graph.violations().is_empty());
    assert_eq!(stack.history().collect::<Vec<_>>(), vec![CommandName::ShapeDelete]);

    stack.undo().unwrap();
    assert_eq!(stack.graph(), &before);
    assert!(stack.canvas().graphics(&eid("flow")).is_some());
    assert!(stack.canvas().graphics(&eid("child_a_label")).is_some());

    stack.redo().unwrap();
    assert!(!stack.graph().contains(&eid("child_b")));
}

#[rstest]
fn deleting_a_host_cascades_to_its_attachers_and_undo_redraws_them(mut stack: CommandStack) {
    stack
        .modeling()
        .create_label(
            &eid("attacher"),
            Point::new(600.0, 100.0),
            Element::label(eid("attacher_label"), Bounds::new(0.0, 0.0, 60.0, 20.0)),
            None,
        )
        .unwrap();
    stack
        .modeling()
        .create_connection(
            &eid("host2"),
            &eid("attacher"),
            Element::connection(eid("feed"), []),
            None,
        )
        .unwrap();
    let before = stack.graph().clone();
    let cascaded = ["host", "attacher", "attacher_label", "feed"];

    stack.modeling().remove_shape(&eid("host")).unwrap();
    let graph = stack.graph();
    for gone in cascaded {
        assert!(!graph.contains(&eid(gone)), "{gone} should be removed");
        assert!(stack.canvas().graphics(&eid(gone)).is_none());
    }
    assert!(graph.element(&eid("host2")).unwrap().outgoing().is_empty());
    assert_eq!(children(graph, "root"), vec![eid("host2")]);
    assert!(graph.violations().is_empty());

    stack.undo().unwrap();
    assert_eq!(stack.graph(), &before);
    for back in cascaded {
        assert!(stack.canvas().graphics(&eid(back)).is_some(), "{back} should be redrawn");
    }

    stack.redo().unwrap();
    for gone in cascaded {
        assert!(!stack.graph().contains(&eid(gone)));
    }
    stack.undo().unwrap();
    assert_eq!(stack.graph(), &before);
}

#[rstest]
fn removing_the_root_is_rejected(mut stack: CommandStack) {
    let err = stack.modeling().remove_shape(&eid("root")).unwrap_err();
    assert_eq!(
        err,
        CommandError::Invariant(Violation::RootRemoval { id: eid("root") })
    );
}

#[rstest]
fn batch_removal_skips_elements_already_cascaded() {
    let mut stack = CommandStack::new(container_scene(), SceneCanvas::new());
    stack
        .modeling()
        .remove_elements(&[eid("flow"), eid("child_a"), eid("container"), eid("exit")])
        .unwrap();

    assert_eq!(children(stack.graph(), "root"), vec![eid("outside")]);
    assert_eq!(stack.undo_count(), 1);
}

#[rstest]
fn failed_transaction_rolls_back_and_records_nothing(mut stack: CommandStack) {
    let before = stack.graph().clone();
    let result = stack.transaction(|stack| {
        stack
            .modeling()
            .attach_shape(&eid("attacher"), Some(&eid("host2")))?;
        stack.modeling().reorder(&eid("host2"), 0)?;
        stack
            .modeling()
            .attach_shape(&eid("host2"), Some(&eid("host2")))
    });

    assert!(matches!(
        result,
        Err(CommandError::Invariant(Violation::SelfHosted { .. }))
    ));
    assert_eq!(stack.graph(), &before);
    assert!(!stack.can_undo());
    assert!(!stack.in_transaction());
}

#[rstest]
fn transaction_is_one_undo_record(mut stack: CommandStack) {
    let before = stack.graph().clone();
    stack
        .transaction(|stack| {
            stack.modeling().reorder(&eid("host2"), 0)?;
            stack.modeling().attach_shape(&eid("attacher"), None)
        })
        .unwrap();

    assert_eq!(stack.undo_count(), 1);
    assert_eq!(stack.history().collect::<Vec<_>>(), vec![CommandName::ElementReorder]);
    stack.undo().unwrap();
    assert_eq!(stack.graph(), &before);
}

#[rstest]
fn undo_is_refused_inside_a_transaction(mut stack: CommandStack) {
    stack.modeling().reorder(&eid("host2"), 0).unwrap();
    let err = stack.transaction(|stack| stack.undo()).unwrap_err();
    assert_eq!(err, CommandError::TransactionOpen);
    assert_eq!(stack.undo_count(), 1);
}

#[rstest]
fn empty_history_reports_nothing_to_do(mut stack: CommandStack) {
    assert_eq!(stack.undo(), Err(CommandError::NothingToUndo));
    assert_eq!(stack.redo(), Err(CommandError::NothingToRedo));
}

#[rstest]
fn hooks_cannot_issue_commands_while_replaying(mut stack: CommandStack) {
    let seen = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&seen);
    stack.interceptor_mut().on(
        Phase::Reverted,
        CommandName::ElementReorder,
        DEFAULT_PRIORITY,
        move |stack, _| {
            let result = stack.modeling().attach_shape(&eid("attacher"), None);
            *sink.borrow_mut() = Some(result);
            Ok(())
        },
    );

    stack.modeling().reorder(&eid("host2"), 0).unwrap();
    stack.undo().unwrap();

    assert_eq!(*seen.borrow(), Some(Err(CommandError::ReplayInProgress)));
    assert_eq!(host_of(stack.graph(), "attacher"), Some(eid("host")));
}

#[rstest]
fn hooks_fire_by_priority_then_registration(mut stack: CommandStack) {
    let order = Rc::new(RefCell::new(Vec::new()));
    for (priority, name) in [
        (LOW_PRIORITY, "low"),
        (DEFAULT_PRIORITY, "default-1"),
        (HIGH_PRIORITY, "high"),
        (DEFAULT_PRIORITY, "default-2"),
    ] {
        let order = Rc::clone(&order);
        stack.interceptor_mut().on(
            Phase::PreExecute,
            CommandName::ElementReorder,
            priority,
            move |_, _| {
                order.borrow_mut().push(name);
                Ok(())
            },
        );
    }

    stack.modeling().reorder(&eid("host2"), 0).unwrap();
    assert_eq!(*order.borrow(), vec!["high", "default-1", "default-2", "low"]);
}

#[rstest]
fn pre_execute_rewrite_is_recorded_for_redo(mut stack: CommandStack) {
    stack
        .interceptor_mut()
        .pre_execute(CommandName::ShapeAttach, |_, command| {
            if let Command::AttachShape(input) = command {
                if input.new_host.is_some() {
                    input.new_host = Some(eid("host2"));
                }
            }
            Ok(())
        });

    stack
        .modeling()
        .attach_shape(&eid("attacher"), Some(&eid("host")))
        .unwrap();
    assert_eq!(host_of(stack.graph(), "attacher"), Some(eid("host2")));

    stack.undo().unwrap();
    assert_eq!(host_of(stack.graph(), "attacher"), Some(eid("host")));
    stack.redo().unwrap();
    assert_eq!(host_of(stack.graph(), "attacher"), Some(eid("host2")));
}

#[rstest]
fn nested_commands_from_hooks_share_the_undo_record(mut stack: CommandStack) {
    let before = stack.graph().clone();
    stack
        .interceptor_mut()
        .post_execute(CommandName::ShapeAttach, |stack, command| {
            let Command::AttachShape(input) = command else {
                return Ok(());
            };
            let shape = input.shape.clone();
            stack.modeling().reorder(&shape, usize::MAX)
        });

    stack
        .modeling()
        .attach_shape(&eid("attacher"), Some(&eid("host2")))
        .unwrap();
    assert_eq!(
        children(stack.graph(), "root"),
        vec![eid("host"), eid("host2"), eid("attacher")]
    );
    assert_eq!(stack.history().collect::<Vec<_>>(), vec![CommandName::ShapeAttach]);

    stack.undo().unwrap();
    assert_eq!(stack.graph(), &before);
}

#[rstest]
fn reorder_moves_within_parent_and_reverts(mut stack: CommandStack) {
    stack.modeling().reorder(&eid("host2"), 0).unwrap();
    assert_eq!(
        children(stack.graph(), "root"),
        vec![eid("host2"), eid("host"), eid("attacher")]
    );
    stack.undo().unwrap();
    assert_eq!(
        children(stack.graph(), "root"),
        vec![eid("host"), eid("attacher"), eid("host2")]
    );
}

#[rstest]
fn new_command_clears_redo(mut stack: CommandStack) {
    stack.modeling().reorder(&eid("host2"), 0).unwrap();
    stack.undo().unwrap();
    assert!(stack.can_redo());

    stack.modeling().reorder(&eid("host"), 2).unwrap();
    assert!(!stack.can_redo());
}

#[rstest]
fn undo_history_is_bounded() {
    let config = EditorConfig {
        max_undo: 2,
        ..EditorConfig::default()
    };
    let mut stack = CommandStack::with_config(attach_scene(), SceneCanvas::new(), &config);
    for index in [0, 1, 2] {
        stack.modeling().reorder(&eid("host2"), index).unwrap();
    }

    assert_eq!(stack.undo_count(), 2);
    stack.undo().unwrap();
    stack.undo().unwrap();
    assert_eq!(stack.undo(), Err(CommandError::NothingToUndo));
    assert_eq!(
        children(stack.graph(), "root"),
        vec![eid("host2"), eid("host"), eid("attacher")]
    );
}

#[rstest]
fn clear_drops_history_but_keeps_graph(mut stack: CommandStack) {
    stack.modeling().reorder(&eid("host2"), 0).unwrap();
    let graph = stack.graph().clone();
    stack.clear();
    assert!(!stack.can_undo());
    assert_eq!(stack.graph(), &graph);
}

#[rstest]
fn moving_a_host_carries_its_attacher_and_undo_puts_it_back(mut stack: CommandStack) {
    let mut moves = MoveWorkflow::new(&EditorConfig::default());
    AttachSupport::install(&mut stack, &mut moves);

    stack
        .modeling()
        .move_shape(&eid("host"), Point::new(200.0, 200.0), None, false)
        .unwrap();
    let attacher = stack.graph().element(&eid("attacher")).unwrap();
    assert_eq!(attacher.position(), Some(Point::new(775.0, 275.0)));
    assert_eq!(attacher.host(), Some(&eid("host")));

    stack.undo().unwrap();
    let attacher = stack.graph().element(&eid("attacher")).unwrap();
    assert_eq!(attacher.position(), Some(Point::new(575.0, 75.0)));
}

#[rstest]
fn reconnect_moves_the_docked_end_and_reverts() {
    let mut stack = CommandStack::new(container_scene(), SceneCanvas::new());
    let before = stack.graph().clone();

    stack
        .modeling()
        .reconnect_end(&eid("exit"), &eid("child_a"))
        .unwrap();
    let graph = stack.graph();
    let exit = graph.element(&eid("exit")).unwrap();
    assert_eq!(exit.target(), Some(&eid("child_a")));
    assert_eq!(exit.waypoints().last(), Some(&Point::new(145.0, 145.0)));
    assert!(graph.element(&eid("outside")).unwrap().incoming().is_empty());
    assert_eq!(
        graph.element(&eid("child_a")).unwrap().incoming(),
        &[eid("exit")]
    );
    assert!(graph.violations().is_empty());

    stack.undo().unwrap();
    assert_eq!(stack.graph(), &before);
}

#[rstest]
fn deleting_a_labelled_connection_removes_the_label() {
    let mut stack = CommandStack::new(container_scene(), SceneCanvas::new());
    stack
        .modeling()
        .create_label(
            &eid("exit"),
            Point::new(475.0, 310.0),
            Element::label(eid("exit_label"), Bounds::new(0.0, 0.0, 60.0, 20.0)),
            None,
        )
        .unwrap();
    let labelled = stack.graph().clone();

    stack.modeling().remove_connection(&eid("exit")).unwrap();
    assert!(!stack.graph().contains(&eid("exit_label")));
    assert!(stack.graph().violations().is_empty());

    stack.undo().unwrap();
    assert_eq!(stack.graph(), &labelled);
    assert!(stack.canvas().graphics(&eid("exit_label")).is_some());
}
