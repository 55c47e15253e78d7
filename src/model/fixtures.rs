// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde_json::{Map, Value};

use super::element::Element;
use super::geometry::{Bounds, Point};
use super::graph::Graph;
use super::ids::ElementId;

pub(crate) fn eid(value: &str) -> ElementId {
    ElementId::new(value).expect("element id")
}

pub(crate) fn attrs(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

/// Root with `host` (500,100 100x100), `attacher` docked on its top edge and hosted by it,
/// and a free `host2` (500,300 100x100).
pub(crate) fn attach_scene() -> Graph {
    let root = eid("root");
    let mut graph = Graph::new(root.clone());
    graph
        .add(Element::shape(eid("host"), Bounds::new(500.0, 100.0, 100.0, 100.0)), &root)
        .expect("host");
    graph
        .add(
            Element::shape(eid("attacher"), Bounds::new(575.0, 75.0, 50.0, 50.0))
                .with_host(eid("host")),
            &root,
        )
        .expect("attacher");
    graph
        .add(Element::shape(eid("host2"), Bounds::new(500.0, 300.0, 100.0, 100.0)), &root)
        .expect("host2");
    graph
}

/// `container` (100,100 300x300) holding `child_a` and `child_b` joined by `flow`, plus an
/// `outside` shape connected from `child_b` by `exit`. `child_a` carries `child_a_label`.
pub(crate) fn container_scene() -> Graph {
    let root = eid("root");
    let mut graph = Graph::new(root.clone());
    graph
        .add(Element::shape(eid("container"), Bounds::new(100.0, 100.0, 300.0, 300.0)), &root)
        .expect("container");
    graph
        .add(Element::shape(eid("child_a"), Bounds::new(120.0, 120.0, 50.0, 50.0)), &eid("container"))
        .expect("child_a");
    graph
        .add(Element::shape(eid("child_b"), Bounds::new(300.0, 300.0, 50.0, 50.0)), &eid("container"))
        .expect("child_b");
    graph
        .add(
            Element::connection(eid("flow"), [Point::new(145.0, 145.0), Point::new(325.0, 325.0)])
                .with_source(eid("child_a"))
                .with_target(eid("child_b")),
            &eid("container"),
        )
        .expect("flow");
    graph
        .add(Element::shape(eid("outside"), Bounds::new(600.0, 300.0, 50.0, 50.0)), &root)
        .expect("outside");
    graph
        .add(
            Element::connection(eid("exit"), [Point::new(325.0, 325.0), Point::new(625.0, 325.0)])
                .with_source(eid("child_b"))
                .with_target(eid("outside")),
            &root,
        )
        .expect("exit");
    graph
        .add(
            Element::label(eid("child_a_label"), Bounds::new(110.0, 175.0, 70.0, 20.0))
                .with_label_target(eid("child_a")),
            &eid("container"),
        )
        .expect("label");
    graph
}
