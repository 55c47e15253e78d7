// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Element graph data model.
//!
//! A [`Graph`] is an arena of [`Element`]s rooted at a single root element. Containment,
//! hosting, connections and labels are all expressed as ids into that arena.

pub mod collections;
pub mod element;
pub mod factory;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod geometry;
pub mod graph;
pub mod ids;
pub mod invariants;

pub use element::{Attrs, Element, ElementKind, Waypoints};
pub use factory::ElementFactory;
pub use geometry::{bottom_right, mid, top_left, Bounds, Point};
pub use graph::{Graph, GraphError};
pub use ids::{ElementId, Id, IdError};
pub use invariants::Violation;
