// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Plain geometry in canvas-local coordinates.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn round(self) -> Self {
        Self::new(self.x.round(), self.y.round())
    }

    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Axis-aligned box of a shape or label; `(x, y)` is the top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bounds of the given extent whose center lands on `center`.
    ///
    /// Half extents are rounded so integral centers keep integral corners.
    pub fn centered_at(center: Point, width: f64, height: f64) -> Self {
        Self::new(
            center.x - (width / 2.0).round(),
            center.y - (height / 2.0).round(),
            width,
            height,
        )
    }

    pub fn translated(self, delta: Point) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y, self.width, self.height)
    }

    pub fn top_left(&self) -> Point {
        top_left(self)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

pub fn top_left(bounds: &Bounds) -> Point {
    Point::new(bounds.x, bounds.y)
}

pub fn bottom_right(bounds: &Bounds) -> Point {
    Point::new(bounds.x + bounds.width, bounds.y + bounds.height)
}

/// Rounded center of `bounds`, or `default` when there are no bounds or the corner is NaN.
///
/// Malformed geometry is not reported as an error here; callers pick the fallback.
pub fn mid(bounds: Option<&Bounds>, default: Point) -> Point {
    match bounds {
        Some(b) if !b.x.is_nan() && !b.y.is_nan() => Point::new(
            (b.x + b.width / 2.0).round(),
            (b.y + b.height / 2.0).round(),
        ),
        _ => default,
    }
}
