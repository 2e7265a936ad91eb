// src/views/transform.rs
//
// 2D transform applied to a shaken element. Rotation is in degrees.

use nannou::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    pub translation: Vec2,
    pub scale: f32,
    pub rotation: f32,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform2D {
    pub const IDENTITY: Transform2D = Transform2D {
        translation: Vec2::ZERO,
        scale: 1.0,
        rotation: 0.0,
    };

    /// Pure translation, no scale or rotation.
    pub fn translation(x: f32, y: f32) -> Self {
        Self {
            translation: vec2(x, y),
            ..Self::IDENTITY
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    // combine two transforms
    pub fn combine(&self, other: &Transform2D) -> Transform2D {
        Transform2D {
            translation: self.translation + other.translation,
            scale: self.scale * other.scale,
            rotation: self.rotation + other.rotation,
        }
    }

    // transform a point: scale, rotate, then translate
    pub fn apply_to_point(&self, point: Point2) -> Point2 {
        let scaled = point * self.scale;

        let rotation = deg_to_rad(self.rotation);
        let cos_rot = rotation.cos();
        let sin_rot = rotation.sin();
        let rotated = pt2(
            scaled.x * cos_rot - scaled.y * sin_rot,
            scaled.x * sin_rot + scaled.y * cos_rot,
        );

        rotated + self.translation
    }

    /// Linear blend toward `target`; `t` is clamped to 0..=1.
    pub fn lerp(&self, target: &Transform2D, t: f32) -> Transform2D {
        let t = t.clamp(0.0, 1.0);
        Transform2D {
            translation: self.translation + (target.translation - self.translation) * t,
            scale: self.scale + (target.scale - self.scale) * t,
            rotation: self.rotation + (target.rotation - self.rotation) * t,
        }
    }
}
