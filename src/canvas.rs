// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Rendering collaborator.
//!
//! The editing core never draws anything itself; it tells a [`Canvas`] which elements exist,
//! which markers they carry, and where the drag preview is. [`SceneCanvas`] keeps that state in
//! memory and is what the tests and benches inspect.

use std::collections::{BTreeMap, BTreeSet};

use crate::model::{Element, ElementId, ElementKind, Point};

/// Visual state flags toggled on element graphics during gestures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Marker {
    AttachOk,
    DropOk,
    DropNotOk,
    Dragging,
}

impl Marker {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AttachOk => "attach-ok",
            Self::DropOk => "drop-ok",
            Self::DropNotOk => "drop-not-ok",
            Self::Dragging => "djs-dragging",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GraphicsHandle(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PreviewHandle(u64);

pub trait Canvas {
    fn add_shape(&mut self, element: &Element, parent: Option<&ElementId>);
    fn add_connection(&mut self, element: &Element, parent: Option<&ElementId>);
    fn remove_shape(&mut self, id: &ElementId);
    fn remove_connection(&mut self, id: &ElementId);

    fn add_marker(&mut self, id: &ElementId, marker: Marker);
    fn remove_marker(&mut self, id: &ElementId, marker: Marker);
    fn has_marker(&self, id: &ElementId, marker: Marker) -> bool;

    /// Handle of the drawn visual, if `id` is currently on the canvas.
    fn graphics(&self, id: &ElementId) -> Option<GraphicsHandle>;

    /// Draws a drag preview of a not yet persisted element in the default layer.
    fn create_preview(&mut self, element: &Element) -> PreviewHandle;
    /// Centers the preview on `position`.
    fn translate_preview(&mut self, preview: PreviewHandle, position: Point);
    fn remove_preview(&mut self, preview: PreviewHandle);
    /// Where the preview currently sits; `None` once removed or before its first translation.
    fn preview_position(&self, preview: PreviewHandle) -> Option<Point>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Visual {
    pub handle: GraphicsHandle,
    pub kind: ElementKind,
    pub parent: Option<ElementId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub element: ElementId,
    pub position: Option<Point>,
}

/// In-memory [`Canvas`] keeping visuals, markers and previews in ordered maps.
#[derive(Debug, Clone, Default)]
pub struct SceneCanvas {
    next_handle: u64,
    visuals: BTreeMap<ElementId, Visual>,
    markers: BTreeMap<ElementId, BTreeSet<Marker>>,
    previews: BTreeMap<PreviewHandle, Preview>,
}

impl SceneCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visual(&self, id: &ElementId) -> Option<&Visual> {
        self.visuals.get(id)
    }

    pub fn visual_count(&self) -> usize {
        self.visuals.len()
    }

    pub fn markers(&self, id: &ElementId) -> impl Iterator<Item = Marker> + '_ {
        self.markers.get(id).into_iter().flatten().copied()
    }

    pub fn preview(&self, preview: PreviewHandle) -> Option<&Preview> {
        self.previews.get(&preview)
    }

    pub fn preview_count(&self) -> usize {
        self.previews.len()
    }

    fn draw(&mut self, element: &Element, parent: Option<&ElementId>) {
        self.next_handle += 1;
        let visual = Visual {
            handle: GraphicsHandle(self.next_handle),
            kind: element.kind(),
            parent: parent.cloned(),
        };
        self.visuals.insert(element.id().clone(), visual);
    }

    fn erase(&mut self, id: &ElementId) {
        self.visuals.remove(id);
        self.markers.remove(id);
    }
}

impl Canvas for SceneCanvas {
    fn add_shape(&mut self, element: &Element, parent: Option<&ElementId>) {
        self.draw(element, parent);
    }

    fn add_connection(&mut self, element: &Element, parent: Option<&ElementId>) {
        self.draw(element, parent);
    }

    fn remove_shape(&mut self, id: &ElementId) {
        self.erase(id);
    }

    fn remove_connection(&mut self, id: &ElementId) {
        self.erase(id);
    }

    fn add_marker(&mut self, id: &ElementId, marker: Marker) {
        self.markers.entry(id.clone()).or_default().insert(marker);
    }

    fn remove_marker(&mut self, id: &ElementId, marker: Marker) {
        if let Some(set) = self.markers.get_mut(id) {
            set.remove(&marker);
            if set.is_empty() {
                self.markers.remove(id);
            }
        }
    }

    fn has_marker(&self, id: &ElementId, marker: Marker) -> bool {
        self.markers
            .get(id)
            .is_some_and(|set| set.contains(&marker))
    }

    fn graphics(&self, id: &ElementId) -> Option<GraphicsHandle> {
        self.visuals.get(id).map(|visual| visual.handle)
    }

    fn create_preview(&mut self, element: &Element) -> PreviewHandle {
        self.next_handle += 1;
        let handle = PreviewHandle(self.next_handle);
        self.previews.insert(
            handle,
            Preview {
                element: element.id().clone(),
                position: None,
            },
        );
        handle
    }

    fn translate_preview(&mut self, preview: PreviewHandle, position: Point) {
        if let Some(entry) = self.previews.get_mut(&preview) {
            entry.position = Some(position);
        }
    }

    fn remove_preview(&mut self, preview: PreviewHandle) {
        self.previews.remove(&preview);
    }

    fn preview_position(&self, preview: PreviewHandle) -> Option<Point> {
        self.previews.get(&preview).and_then(|entry| entry.position)
    }
}

#[cfg(test)]
mod tests {
    use super::{Canvas, Marker, SceneCanvas};
    use crate::model::fixtures::eid;
    use crate::model::{Bounds, Element, Point};

    #[test]
    fn removing_a_shape_drops_its_markers() {
        let mut canvas = SceneCanvas::new();
        let shape = Element::shape(eid("a"), Bounds::default());
        canvas.add_shape(&shape, None);
        canvas.add_marker(shape.id(), Marker::DropOk);
        assert!(canvas.has_marker(shape.id(), Marker::DropOk));

        canvas.remove_shape(shape.id());
        assert!(canvas.graphics(shape.id()).is_none());
        assert!(!canvas.has_marker(shape.id(), Marker::DropOk));
    }

    #[test]
    fn previews_are_tracked_until_removed() {
        let mut canvas = SceneCanvas::new();
        let draft = Element::shape(eid("draft"), Bounds::default());
        let preview = canvas.create_preview(&draft);
        canvas.translate_preview(preview, Point::new(5.0, 6.0));

        assert_eq!(
            canvas.preview(preview).and_then(|p| p.position),
            Some(Point::new(5.0, 6.0))
        );
        canvas.remove_preview(preview);
        assert_eq!(canvas.preview_count(), 0);
    }
}
