// src/views/mod.rs

pub mod shake_box;
pub mod transform;

pub use shake_box::ShakeBox;
pub use transform::Transform2D;
