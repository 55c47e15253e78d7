// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use proteus::{Bounds, Element, ElementId, Graph, Point};

#[derive(Debug, Clone, Copy)]
pub enum Case {
    Small,
    Medium,
    Large,
}

impl Case {
    pub const ALL: [Case; 3] = [Case::Small, Case::Medium, Case::Large];

    pub fn id(self) -> &'static str {
        match self {
            Case::Small => "small",
            Case::Medium => "medium",
            Case::Large => "large",
        }
    }

    fn size(self) -> usize {
        match self {
            Case::Small => 8,
            Case::Medium => 64,
            Case::Large => 256,
        }
    }
}

pub fn id(value: impl AsRef<str>) -> ElementId {
    ElementId::new(value).expect("element id")
}

/// One `board` holding a row of `task_N` hosts, each carrying an `event_N` attacher, chained
/// `task_N -> task_N+1` by `edge_N`.
pub fn board(case: Case) -> Graph {
    let root = id("root");
    let board = id("board");
    let mut graph = Graph::new(root.clone());
    let size = case.size();
    graph
        .add(
            Element::shape(board.clone(), Bounds::new(0.0, 0.0, 160.0 * size as f64, 400.0)),
            &root,
        )
        .expect("board");

    for index in 0..size {
        let x = 40.0 + 160.0 * index as f64;
        graph
            .add(
                Element::shape(id(format!("task_{index}")), Bounds::new(x, 100.0, 100.0, 80.0)),
                &board,
            )
            .expect("task");
        graph
            .add(
                Element::shape(id(format!("event_{index}")), Bounds::new(x + 70.0, 160.0, 36.0, 36.0))
                    .with_host(id(format!("task_{index}"))),
                &board,
            )
            .expect("event");
    }
    for index in 1..size {
        let from = 40.0 + 160.0 * (index - 1) as f64 + 100.0;
        graph
            .add(
                Element::connection(
                    id(format!("edge_{index}")),
                    [Point::new(from, 140.0), Point::new(from + 60.0, 140.0)],
                )
                .with_source(id(format!("task_{}", index - 1)))
                .with_target(id(format!("task_{index}"))),
                &board,
            )
            .expect("edge");
    }
    graph
}

pub fn tasks(case: Case) -> Vec<ElementId> {
    (0..case.size()).map(|index| id(format!("task_{index}"))).collect()
}
