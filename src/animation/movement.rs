// src/animation/movement.rs
//
// Frame-driven shake player. Each frame feeds it the elapsed time and gets
// back the transform to draw with.

use serde::Deserialize;
use tracing::{debug, info};

use super::shake::{Completion, ShakeRequest, ShakeSequence, ShakeStep};
use super::shaker::TransformTarget;
use crate::accessibility::AccessibilityStatus;
use crate::views::Transform2D;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    #[default]
    Linear,
    EaseInOut,
    EaseIn,
    EaseOut,
}

impl EasingType {
    pub fn apply(self, t: f32) -> f32 {
        match self {
            EasingType::Linear => t,
            EasingType::EaseInOut => ease_in_out(t),
            EasingType::EaseIn => ease_in(t),
            EasingType::EaseOut => ease_out(t),
        }
    }
}

pub struct ShakeMovement {
    steps: ShakeSequence,
    current: Option<ShakeStep>,
    from: Transform2D,
    frame_timer: f32,
    easing: EasingType,
    completion: Option<Completion>,
}

impl ShakeMovement {
    /// Start a shake. Returns `None` when spoken feedback is active; the
    /// request's completion has already run in that case.
    pub fn begin<A>(mut request: ShakeRequest, easing: EasingType, accessibility: &A) -> Option<Self>
    where
        A: AccessibilityStatus + ?Sized,
    {
        let completion = request.take_completion();
        if accessibility.prefers_spoken_feedback() {
            info!(direction = ?request.direction(), "spoken feedback active, skipping shake");
            if let Some(completion) = completion {
                completion();
            }
            return None;
        }

        info!(
            direction = ?request.direction(),
            times = request.number_of_times(),
            step = request.per_step_duration(),
            "shake started"
        );
        let mut steps = ShakeSequence::from_request(&request);
        let current = steps.next();
        Some(Self {
            steps,
            current,
            from: Transform2D::IDENTITY,
            frame_timer: 0.0,
            easing,
            completion,
        })
    }

    /// Advance by `dt` seconds and return the transform for this frame.
    /// Time left over from a finished step carries into the next one.
    pub fn update(&mut self, dt: f32) -> Transform2D {
        self.frame_timer += dt;
        loop {
            let Some(step) = &self.current else {
                return Transform2D::IDENTITY;
            };
            if self.frame_timer < step.duration {
                let t = self.easing.apply(self.frame_timer / step.duration);
                return self.from.lerp(&step.target, t);
            }

            self.frame_timer -= step.duration;
            self.from = step.target;
            debug!(kind = ?step.kind, "shake step finished");
            self.current = self.steps.next();

            if self.current.is_none() {
                self.frame_timer = 0.0;
                info!("shake finished");
                if let Some(completion) = self.completion.take() {
                    completion();
                }
            }
        }
    }

    pub fn apply_to<T>(&mut self, dt: f32, target: &T)
    where
        T: TransformTarget + ?Sized,
    {
        target.set_transform(self.update(dt));
    }

    pub fn is_complete(&self) -> bool {
        self.current.is_none()
    }

    pub fn current_step(&self) -> Option<&ShakeStep> {
        self.current.as_ref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShakeStart {
    Started,
    /// Spoken feedback is active; completion already ran.
    Skipped,
    /// Another shake is still running and was left alone.
    Busy,
}

/// Owns at most one running shake for one element. Shakes are never
/// cancelled: a request that arrives mid-shake is refused.
pub struct ShakePlayer {
    easing: EasingType,
    movement: Option<ShakeMovement>,
}

impl ShakePlayer {
    pub fn new(easing: EasingType) -> Self {
        Self {
            easing,
            movement: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.movement.is_some()
    }

    /// Skipping is decided before anything else so a skipped request never
    /// disturbs a running shake.
    pub fn start<A>(&mut self, request: ShakeRequest, accessibility: &A) -> ShakeStart
    where
        A: AccessibilityStatus + ?Sized,
    {
        if !accessibility.prefers_spoken_feedback() && self.movement.is_some() {
            debug!(direction = ?request.direction(), "shake already running, ignoring request");
            return ShakeStart::Busy;
        }
        match ShakeMovement::begin(request, self.easing, accessibility) {
            Some(movement) => {
                self.movement = Some(movement);
                ShakeStart::Started
            }
            None => ShakeStart::Skipped,
        }
    }

    /// Advance the running shake, if any, and write its transform to `target`.
    pub fn update<T>(&mut self, dt: f32, target: &T)
    where
        T: TransformTarget + ?Sized,
    {
        let Some(movement) = self.movement.as_mut() else {
            return;
        };
        movement.apply_to(dt, target);
        if movement.is_complete() {
            self.movement = None;
        }
    }
}

fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

fn ease_in(t: f32) -> f32 {
    t * t
}

fn ease_out(t: f32) -> f32 {
    t * (2.0 - t)
}
