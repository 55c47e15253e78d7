// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::canvas::{Canvas, Marker};
use crate::model::{ElementId, Point};
use crate::rules::Verdict;

/// One pointer sample in canvas-local coordinates, with the element under the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureEvent {
    pub position: Point,
    pub hover: Option<ElementId>,
}

impl GestureEvent {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            position: Point::new(x, y),
            hover: None,
        }
    }

    pub fn over(mut self, hover: ElementId) -> Self {
        self.hover = Some(hover);
        self
    }
}

/// The single drop-feedback marker a workflow keeps on its current target.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct DropMarker {
    active: Option<(ElementId, Marker)>,
}

impl DropMarker {
    pub(crate) fn show(&mut self, canvas: &mut dyn Canvas, target: &ElementId, verdict: Verdict) {
        self.clear(canvas);
        let marker = match verdict {
            Verdict::Attach => Marker::AttachOk,
            Verdict::Allowed => Marker::DropOk,
            Verdict::Disallowed => Marker::DropNotOk,
            Verdict::Indeterminate => return,
        };
        canvas.add_marker(target, marker);
        self.active = Some((target.clone(), marker));
    }

    pub(crate) fn clear(&mut self, canvas: &mut dyn Canvas) {
        if let Some((target, marker)) = self.active.take() {
            canvas.remove_marker(&target, marker);
        }
    }
}
