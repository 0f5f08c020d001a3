//! Axis-aligned rectangle geometry for sprite bounds
//!
//! Screen space: origin top-left, y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Box of `size` centered on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self::new(center.x - size.x / 2.0, center.y - size.y / 2.0, size.x, size.y)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    #[inline]
    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.x = center.x - self.w / 2.0;
        self.y = center.y - self.h / 2.0;
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Move inside `bounds`; a box larger than `bounds` is centered on that axis
    pub fn clamp_within(&mut self, bounds: &Rect) {
        self.x = clamp_axis(self.x, self.w, bounds.x, bounds.w);
        self.y = clamp_axis(self.y, self.h, bounds.y, bounds.h);
    }

    /// True if `other` lies entirely inside this box
    pub fn contains(&self, other: &Rect) -> bool {
        other.left() >= self.left()
            && other.right() <= self.right()
            && other.top() >= self.top()
            && other.bottom() <= self.bottom()
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.left() && point.x < self.right() && point.y >= self.top() && point.y < self.bottom()
    }

    /// Strict overlap; boxes that only share an edge do not collide
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Radius of the circle circumscribing this box
    pub fn bounding_radius(&self) -> f32 {
        self.size().length() / 2.0
    }
}

fn clamp_axis(pos: f32, len: f32, min: f32, span: f32) -> f32 {
    if len >= span {
        min + (span - len) / 2.0
    } else {
        pos.clamp(min, min + span - len)
    }
}
