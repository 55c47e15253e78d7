// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};

use proteus::features::{AttachSupport, MoveWorkflow};
use proteus::{CommandStack, EditorConfig, Graph, Point, SceneCanvas};

mod profiler;
mod scenes;

// Group names (`commands.*`) and case ids (`small`, `medium`, `large`) stay stable so results
// remain comparable across refactors.

fn editor(graph: Graph) -> CommandStack {
    let config = EditorConfig::default();
    let mut stack = CommandStack::with_config(graph, SceneCanvas::new(), &config);
    let mut moves = MoveWorkflow::new(&config);
    AttachSupport::install(&mut stack, &mut moves);
    stack
}

fn checksum(stack: &CommandStack) -> u64 {
    let graph = stack.graph();
    let mut acc = graph.len() as u64;
    acc = acc.wrapping_mul(131).wrapping_add(stack.undo_count() as u64);
    acc.wrapping_mul(131).wrapping_add(stack.redo_count() as u64)
}

fn benches_delete(c: &mut Criterion) {
    let mut group = c.benchmark_group("commands.delete");
    for case in scenes::Case::ALL {
        let template = scenes::board(case);
        group.throughput(Throughput::Elements(template.len() as u64));
        group.bench_function(case.id(), |b| {
            b.iter_batched(
                || editor(template.clone()),
                |mut stack| {
                    stack
                        .modeling()
                        .remove_shape(black_box(&scenes::id("board")))
                        .expect("remove board");
                    black_box(checksum(&stack))
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn benches_undo_redo(c: &mut Criterion) {
    let mut group = c.benchmark_group("commands.undo_redo");
    for case in scenes::Case::ALL {
        let mut prepared = editor(scenes::board(case));
        prepared
            .modeling()
            .remove_shape(&scenes::id("board"))
            .expect("remove board");
        group.bench_function(case.id(), |b| {
            b.iter(|| {
                prepared.undo().expect("undo");
                prepared.redo().expect("redo");
                black_box(checksum(&prepared))
            })
        });
    }
    group.finish();
}

fn benches_move_hosts(c: &mut Criterion) {
    let mut group = c.benchmark_group("commands.move_hosts");
    for case in scenes::Case::ALL {
        let template = scenes::board(case);
        let tasks = scenes::tasks(case);
        group.throughput(Throughput::Elements(tasks.len() as u64));
        group.bench_function(case.id(), |b| {
            b.iter_batched(
                || editor(template.clone()),
                |mut stack| {
                    stack
                        .modeling()
                        .move_shapes(black_box(&tasks), Point::new(10.0, 25.0), None, false)
                        .expect("move tasks");
                    black_box(checksum(&stack))
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_delete, benches_undo_redo, benches_move_hosts
}
criterion_main!(benches);
