pub mod accessibility;
pub mod animation;
pub mod config;
pub mod controllers;
pub mod error;
pub mod logging;
pub mod services;
pub mod views;

pub use error::ShakeError;
