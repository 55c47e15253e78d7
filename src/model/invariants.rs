// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Structural invariants of the element graph.
//!
//! Handlers return a [`Violation`] before mutating anything when a request would break one of
//! these rules. [`check`] and [`check_stacking`] validate a whole graph after the fact.

use std::collections::BTreeSet;

use thiserror::Error;

use super::collections::index_of;
use super::element::{Element, ElementKind};
use super::graph::Graph;
use super::ids::ElementId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("shape cannot host itself (id={id})")]
    SelfHosted { id: ElementId },
    #[error("attaching {shape} to {host} would create a host cycle")]
    HostCycle { shape: ElementId, host: ElementId },
    #[error("moving {element} into {parent} would create a parent cycle")]
    ParentCycle {
        element: ElementId,
        parent: ElementId,
    },
    #[error("unexpected element kind '{}' (id={id})", .kind.as_str())]
    WrongKind { id: ElementId, kind: ElementKind },
    #[error("element must be detached before insertion (id={id})")]
    NotDetached { id: ElementId },
    #[error("element already has a label (id={id})")]
    LabelAlreadySet { id: ElementId },
    #[error("the root element cannot be removed (id={id})")]
    RootRemoval { id: ElementId },
    #[error("parent/children mismatch (id={id})")]
    ParentMismatch { id: ElementId },
    #[error("child listed more than once (parent={parent}, child={child})")]
    DuplicateChild { parent: ElementId, child: ElementId },
    #[error("host/attachers mismatch (id={id})")]
    HostMismatch { id: ElementId },
    #[error("attacher listed more than once (host={host}, attacher={attacher})")]
    DuplicateAttacher { host: ElementId, attacher: ElementId },
    #[error("connection endpoint mismatch (connection={connection}, endpoint={endpoint})")]
    ConnectionEndpoint {
        connection: ElementId,
        endpoint: ElementId,
    },
    #[error("label pairing mismatch (id={id})")]
    LabelMismatch { id: ElementId },
    #[error("attacher {attacher} is stacked below its host {host}")]
    AttacherBelowHost { attacher: ElementId, host: ElementId },
    #[error("label {label} is stacked below its attacher {attacher}")]
    LabelBelowAttacher { label: ElementId, attacher: ElementId },
    #[error("element {id} contains or hosts itself")]
    OwnershipCycle { id: ElementId },
    #[error("dangling reference from {id} to {reference}")]
    DanglingReference { id: ElementId, reference: ElementId },
}

/// Relational invariants: containment, hosting, connection lists, label pairing, and that
/// every referenced id resolves.
pub fn check(graph: &Graph) -> Vec<Violation> {
    let mut found = Vec::new();
    for element in graph.elements() {
        check_references(graph, element, &mut found);
        check_containment(graph, element, &mut found);
        check_hosting(graph, element, &mut found);
        check_connections(graph, element, &mut found);
        check_labels(graph, element, &mut found);
    }
    found
}

/// Z-order rules between hosts, attachers and attacher labels sharing a parent.
pub fn check_stacking(graph: &Graph) -> Vec<Violation> {
    let mut found = Vec::new();
    for attacher in graph.elements() {
        let Some(host_id) = attacher.host.as_ref() else {
            continue;
        };
        let Some(parent) = attacher.parent.as_ref().and_then(|p| graph.get(p)) else {
            continue;
        };
        let Some(attacher_index) = index_of(&parent.children, &attacher.id) else {
            continue;
        };
        if let Some(host_index) = index_of(&parent.children, host_id) {
            if host_index > attacher_index {
                found.push(Violation::AttacherBelowHost {
                    attacher: attacher.id.clone(),
                    host: host_id.clone(),
                });
            }
        }
        if let Some(label_id) = attacher.label.as_ref() {
            if let Some(label_index) = index_of(&parent.children, label_id) {
                if label_index < attacher_index {
                    found.push(Violation::LabelBelowAttacher {
                        label: label_id.clone(),
                        attacher: attacher.id.clone(),
                    });
                }
            }
        }
    }
    found
}

/// Whether making `host` the host of `shape` would close a loop in the host chain.
pub fn would_create_host_cycle(graph: &Graph, shape: &ElementId, host: &ElementId) -> bool {
    let mut seen = BTreeSet::new();
    let mut next = Some(host);
    while let Some(id) = next {
        if id == shape || !seen.insert(id) {
            return true;
        }
        next = graph.get(id).and_then(|e| e.host.as_ref());
    }
    false
}

/// Whether deleting `owner` would cascade to `id`, following `children` and `attachers`.
pub fn owns(graph: &Graph, owner: &ElementId, id: &ElementId) -> bool {
    let mut seen = BTreeSet::new();
    let mut pending = vec![owner];
    while let Some(next) = pending.pop() {
        if !seen.insert(next) {
            continue;
        }
        let Some(element) = graph.get(next) else {
            continue;
        };
        for owned in element.children.iter().chain(&element.attachers) {
            if owned == id {
                return true;
            }
            pending.push(owned);
        }
    }
    false
}

fn check_references(graph: &Graph, element: &Element, found: &mut Vec<Violation>) {
    let singles = [
        &element.parent,
        &element.source,
        &element.target,
        &element.host,
        &element.label,
        &element.label_target,
    ];
    let lists = [
        &element.children,
        &element.incoming,
        &element.outgoing,
        &element.attachers,
    ];
    let referenced = singles
        .into_iter()
        .flatten()
        .chain(lists.into_iter().flatten());
    for reference in referenced {
        if !graph.contains(reference) {
            found.push(Violation::DanglingReference {
                id: element.id.clone(),
                reference: reference.clone(),
            });
        }
    }
}

fn check_containment(graph: &Graph, element: &Element, found: &mut Vec<Violation>) {
    match element.parent.as_ref().and_then(|p| graph.get(p)) {
        Some(parent) => {
            if count(&parent.children, &element.id) != 1 {
                found.push(Violation::ParentMismatch {
                    id: element.id.clone(),
                });
            }
        }
        None if !element.is_root() => found.push(Violation::ParentMismatch {
            id: element.id.clone(),
        }),
        None => {}
    }

    let mut seen = BTreeSet::new();
    for child in &element.children {
        if !seen.insert(child) {
            found.push(Violation::DuplicateChild {
                parent: element.id.clone(),
                child: child.clone(),
            });
        }
        let listed_parent = graph.get(child).and_then(|c| c.parent.as_ref());
        if listed_parent.is_some() && listed_parent != Some(&element.id) {
            found.push(Violation::ParentMismatch { id: child.clone() });
        }
    }

    if owns(graph, &element.id, &element.id) {
        found.push(Violation::OwnershipCycle {
            id: element.id.clone(),
        });
    }

    let mut chain = BTreeSet::new();
    for ancestor in graph.ancestors(&element.id) {
        if ancestor.id == element.id || !chain.insert(&ancestor.id) {
            found.push(Violation::ParentCycle {
                element: element.id.clone(),
                parent: ancestor.id.clone(),
            });
            break;
        }
    }
}

fn check_hosting(graph: &Graph, element: &Element, found: &mut Vec<Violation>) {
    if let Some(host_id) = element.host.as_ref() {
        if host_id == &element.id {
            found.push(Violation::SelfHosted {
                id: element.id.clone(),
            });
        } else if let Some(host) = graph.get(host_id) {
            if count(&host.attachers, &element.id) != 1 {
                found.push(Violation::HostMismatch {
                    id: element.id.clone(),
                });
            }
            if host.host.as_ref().is_some_and(|next| {
                would_create_host_cycle(graph, &element.id, next)
            }) {
                found.push(Violation::HostCycle {
                    shape: element.id.clone(),
                    host: host_id.clone(),
                });
            }
        }
    }

    let mut seen = BTreeSet::new();
    for attacher in &element.attachers {
        if !seen.insert(attacher) {
            found.push(Violation::DuplicateAttacher {
                host: element.id.clone(),
                attacher: attacher.clone(),
            });
        }
        let listed_host = graph.get(attacher).and_then(|a| a.host.as_ref());
        if listed_host.is_some() && listed_host != Some(&element.id) {
            found.push(Violation::HostMismatch {
                id: attacher.clone(),
            });
        }
    }
}

fn check_connections(graph: &Graph, element: &Element, found: &mut Vec<Violation>) {
    if element.is_connection() {
        let ends = [
            (element.source.as_ref(), true),
            (element.target.as_ref(), false),
        ];
        for (end, is_source) in ends {
            let Some(end_id) = end else {
                found.push(Violation::ConnectionEndpoint {
                    connection: element.id.clone(),
                    endpoint: element.id.clone(),
                });
                continue;
            };
            let Some(endpoint) = graph.get(end_id) else {
                continue;
            };
            let list = if is_source {
                &endpoint.outgoing
            } else {
                &endpoint.incoming
            };
            if count(list, &element.id) != 1 {
                found.push(Violation::ConnectionEndpoint {
                    connection: element.id.clone(),
                    endpoint: end_id.clone(),
                });
            }
        }
    }

    for connection_id in &element.outgoing {
        let source = graph.get(connection_id).and_then(|c| c.source.as_ref());
        if source.is_some() && source != Some(&element.id) {
            found.push(Violation::ConnectionEndpoint {
                connection: connection_id.clone(),
                endpoint: element.id.clone(),
            });
        }
    }
    for connection_id in &element.incoming {
        let target = graph.get(connection_id).and_then(|c| c.target.as_ref());
        if target.is_some() && target != Some(&element.id) {
            found.push(Violation::ConnectionEndpoint {
                connection: connection_id.clone(),
                endpoint: element.id.clone(),
            });
        }
    }
}

fn check_labels(graph: &Graph, element: &Element, found: &mut Vec<Violation>) {
    if let Some(label) = element.label.as_ref().and_then(|l| graph.get(l)) {
        if label.label_target.as_ref() != Some(&element.id) {
            found.push(Violation::LabelMismatch {
                id: element.id.clone(),
            });
        }
    }
    if let Some(target) = element.label_target.as_ref().and_then(|t| graph.get(t)) {
        if target.label.as_ref() != Some(&element.id) {
            found.push(Violation::LabelMismatch {
                id: element.id.clone(),
            });
        }
    }
}

fn count(list: &[ElementId], item: &ElementId) -> usize {
    list.iter().filter(|candidate| *candidate == item).count()
}
