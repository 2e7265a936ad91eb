// src/animation/shaker.rs
//
// Async shake driver for hosts whose animation primitive reports
// completion through a future.

use std::future::Future;
use std::rc::Weak;

use tracing::{debug, info};

use super::shake::{ShakeRequest, ShakeSequence};
use crate::accessibility::AccessibilityStatus;
use crate::views::Transform2D;

/// Anything whose transform can be set directly.
pub trait TransformTarget {
    fn transform(&self) -> Transform2D;
    fn set_transform(&self, transform: Transform2D);
}

/// A target the host can animate. The returned future resolves when the
/// animation to `target` has finished.
pub trait AnimatedElement: TransformTarget {
    fn animate_transform(&self, target: Transform2D, duration: f32) -> impl Future<Output = ()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShakeOutcome {
    /// Back at identity, completion called.
    Completed,
    /// Spoken feedback is active; nothing moved, completion called.
    Skipped,
    /// The element was dropped mid-shake; completion not called.
    Abandoned,
}

/// Shake `element` through every step of `request`, one animation at a time.
///
/// The element is held weakly: if it goes away between steps the shake
/// stops quietly. Starting a second shake on the same element before the
/// first finishes gives overlapping transforms; nothing guards against it.
pub async fn shake<E, A>(element: Weak<E>, mut request: ShakeRequest, accessibility: &A) -> ShakeOutcome
where
    E: AnimatedElement,
    A: AccessibilityStatus + ?Sized,
{
    let completion = request.take_completion();

    if accessibility.prefers_spoken_feedback() {
        info!(direction = ?request.direction(), "spoken feedback active, skipping shake");
        if let Some(completion) = completion {
            completion();
        }
        return ShakeOutcome::Skipped;
    }

    info!(
        direction = ?request.direction(),
        times = request.number_of_times(),
        step = request.per_step_duration(),
        "shake started"
    );
    for step in ShakeSequence::from_request(&request) {
        let Some(element) = element.upgrade() else {
            debug!("element dropped, abandoning shake");
            return ShakeOutcome::Abandoned;
        };
        debug!(kind = ?step.kind, duration = step.duration, "shake step");
        element.animate_transform(step.target, step.duration).await;
    }

    if let Some(completion) = completion {
        completion();
    }
    ShakeOutcome::Completed
}
