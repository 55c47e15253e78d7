// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Proteus: the transactional editing core of a diagram editor.
//!
//! A [`Graph`] of shapes, labels and connections is handed to a [`CommandStack`], which from
//! then on applies every edit as a reversible command. [`Modeling`] is the coarse API features
//! call; [`features`] holds the move and create gestures and the attach/label behaviors that
//! hook into them.

pub mod canvas;
pub mod command;
pub mod config;
pub mod features;
pub mod model;
pub mod modeling;
pub mod rules;

pub use canvas::{Canvas, Marker, SceneCanvas};
pub use command::{Command, CommandError, CommandName, CommandStack};
pub use config::EditorConfig;
pub use model::{Bounds, Element, ElementFactory, ElementId, ElementKind, Graph, GraphError, Point};
pub use modeling::Modeling;
pub use rules::{RuleContext, RuleSet, Rules, Verdict};
