// src/views/shake_box.rs
//
// The element the demo shakes: a filled box at a fixed base transform.

use std::cell::Cell;

use nannou::prelude::*;

use super::Transform2D;
use crate::animation::TransformTarget;

pub struct ShakeBox {
    base: Transform2D,
    size: Vec2,
    pixels_per_unit: f32,
    shake: Cell<Transform2D>,
}

impl ShakeBox {
    pub fn new(base: Transform2D, size: Vec2, pixels_per_unit: f32) -> Self {
        Self {
            base,
            size,
            pixels_per_unit,
            shake: Cell::new(Transform2D::IDENTITY),
        }
    }

    // shake offsets are in abstract units, scale them to pixels
    fn placed(&self) -> Transform2D {
        let shake = self.shake.get();
        let scaled = Transform2D {
            translation: shake.translation * self.pixels_per_unit,
            ..shake
        };
        self.base.combine(&scaled)
    }

    pub fn screen_center(&self) -> Point2 {
        self.placed().apply_to_point(pt2(0.0, 0.0))
    }

    pub fn draw(&self, draw: &Draw, color: Rgb) {
        let placed = self.placed();
        draw.rect()
            .xy(self.screen_center())
            .wh(self.size * placed.scale)
            .rotate(deg_to_rad(placed.rotation))
            .color(color);
    }
}

impl TransformTarget for ShakeBox {
    fn transform(&self) -> Transform2D {
        self.shake.get()
    }

    fn set_transform(&self, transform: Transform2D) {
        self.shake.set(transform);
    }
}
