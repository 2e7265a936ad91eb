// src/config/config_types.rs
//
// Config types for the app

use crate::animation::{EasingType, DEFAULT_NUMBER_OF_TIMES, DEFAULT_TOTAL_DURATION};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 450,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub box_width: f32,
    pub box_height: f32,
    pub box_color: (f32, f32, f32),
    pub background_color: (f32, f32, f32),
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            box_width: 240.0,
            box_height: 64.0,
            box_color: (0.82, 0.0, 0.14),
            background_color: (0.05, 0.05, 0.05),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OscConfig {
    pub rx_port: u16,
}

impl Default for OscConfig {
    fn default() -> Self {
        Self { rx_port: 9000 }
    }
}

/************************* Animation Configs ********************/
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShakeConfig {
    pub number_of_times: u32,
    pub total_duration: f32, // seconds, not counting the return step
    pub easing: EasingType,
    pub pixels_per_unit: f32, // screen scale for the ±2 unit offsets
}

impl Default for ShakeConfig {
    fn default() -> Self {
        Self {
            number_of_times: DEFAULT_NUMBER_OF_TIMES,
            total_duration: DEFAULT_TOTAL_DURATION,
            easing: EasingType::Linear,
            pixels_per_unit: 6.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AccessibilityConfig {
    pub screen_reader: bool,        // start with spoken feedback on
    pub announcement_delay_ms: u64, // blank nudge delay
    pub speech_duration: f32,       // simulated speaking time, seconds
    pub message: String,
    pub skip_announcement: String, // spoken instead of a skipped shake
}

impl Default for AccessibilityConfig {
    fn default() -> Self {
        Self {
            screen_reader: false,
            announcement_delay_ms: 10,
            speech_duration: 0.6,
            message: "Saved".to_string(),
            skip_announcement: "Input rejected".to_string(),
        }
    }
}
