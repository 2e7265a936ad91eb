// src/animation/shake.rs
//
// Shake data model and the step sequence that drives every shake.
// A shake is N offset steps that alternate sign, followed by one step
// back to the identity transform.

use std::fmt;

use crate::error::{Result, ShakeError};
use crate::views::Transform2D;

pub const DEFAULT_NUMBER_OF_TIMES: u32 = 5;
pub const DEFAULT_TOTAL_DURATION: f32 = 0.5;

/// Called once the element is back at identity.
pub type Completion = Box<dyn FnOnce()>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Horizontal,
    Vertical,
}

impl Direction {
    pub fn start_position(self) -> Position {
        match self {
            Direction::Horizontal => Position::LEFT,
            Direction::Vertical => Position::TOP,
        }
    }
}

/// A signed offset on one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub offset: f32,
    pub direction: Direction,
}

impl Position {
    pub const LEFT: Position = Position::new(1.0, Direction::Horizontal);
    pub const RIGHT: Position = Position::new(-1.0, Direction::Horizontal);
    pub const TOP: Position = Position::new(1.0, Direction::Vertical);
    pub const BOTTOM: Position = Position::new(-1.0, Direction::Vertical);

    pub const fn new(offset: f32, direction: Direction) -> Self {
        Self { offset, direction }
    }

    pub fn opposite(self) -> Position {
        Position::new(-self.offset, self.direction)
    }

    /// Translation for this position: twice the offset on its own axis.
    pub fn translation(self) -> Transform2D {
        let distance = 2.0 * self.offset;
        match self.direction {
            Direction::Horizontal => Transform2D::translation(distance, 0.0),
            Direction::Vertical => Transform2D::translation(0.0, distance),
        }
    }
}

pub(crate) fn validate_number_of_times(number_of_times: u32) -> Result<u32> {
    if number_of_times == 0 {
        return Err(ShakeError::InvalidArgument {
            name: "number_of_times",
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(number_of_times)
}

pub(crate) fn validate_total_duration(total_duration: f32) -> Result<f32> {
    if !total_duration.is_finite() || total_duration <= 0.0 {
        return Err(ShakeError::InvalidArgument {
            name: "total_duration",
            reason: format!("must be a positive number of seconds, got {total_duration}"),
        });
    }
    Ok(total_duration)
}

/// A validated shake. Build one with [`ShakeRequest::builder`].
pub struct ShakeRequest {
    direction: Direction,
    number_of_times: u32,
    total_duration: f32,
    completion: Option<Completion>,
}

impl ShakeRequest {
    pub fn builder(direction: Direction) -> ShakeRequestBuilder {
        ShakeRequestBuilder {
            direction,
            number_of_times: DEFAULT_NUMBER_OF_TIMES,
            total_duration: DEFAULT_TOTAL_DURATION,
            completion: None,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn number_of_times(&self) -> u32 {
        self.number_of_times
    }

    pub fn total_duration(&self) -> f32 {
        self.total_duration
    }

    pub fn per_step_duration(&self) -> f32 {
        self.total_duration / self.number_of_times as f32
    }

    pub fn take_completion(&mut self) -> Option<Completion> {
        self.completion.take()
    }
}

impl fmt::Debug for ShakeRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShakeRequest")
            .field("direction", &self.direction)
            .field("number_of_times", &self.number_of_times)
            .field("total_duration", &self.total_duration)
            .field("completion", &self.completion.is_some())
            .finish()
    }
}

pub struct ShakeRequestBuilder {
    direction: Direction,
    number_of_times: u32,
    total_duration: f32,
    completion: Option<Completion>,
}

impl ShakeRequestBuilder {
    pub fn number_of_times(mut self, number_of_times: u32) -> Self {
        self.number_of_times = number_of_times;
        self
    }

    /// Total shake time in seconds, not counting the return step.
    pub fn total_duration(mut self, total_duration: f32) -> Self {
        self.total_duration = total_duration;
        self
    }

    pub fn on_complete<F>(mut self, completion: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        self.completion = Some(Box::new(completion));
        self
    }

    pub fn build(self) -> Result<ShakeRequest> {
        Ok(ShakeRequest {
            direction: self.direction,
            number_of_times: validate_number_of_times(self.number_of_times)?,
            total_duration: validate_total_duration(self.total_duration)?,
            completion: self.completion,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepKind {
    Offset(Position),
    Return,
}

/// One animation: move to `target` over `duration` seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShakeStep {
    pub kind: StepKind,
    pub target: Transform2D,
    pub duration: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShakePhase {
    Idle,
    /// `remaining` offset steps left, the next one at `position`.
    Shaking { remaining: u32, position: Position },
    Returning,
    Done,
}

/// Yields the steps of one shake in order.
#[derive(Debug, Clone)]
pub struct ShakeSequence {
    phase: ShakePhase,
    direction: Direction,
    number_of_times: u32,
    step_duration: f32,
}

impl ShakeSequence {
    pub fn new(direction: Direction, number_of_times: u32, step_duration: f32) -> Self {
        Self {
            phase: ShakePhase::Idle,
            direction,
            number_of_times,
            step_duration,
        }
    }

    pub fn from_request(request: &ShakeRequest) -> Self {
        Self::new(
            request.direction(),
            request.number_of_times(),
            request.per_step_duration(),
        )
    }

    pub fn phase(&self) -> ShakePhase {
        self.phase
    }
}

impl Iterator for ShakeSequence {
    type Item = ShakeStep;

    fn next(&mut self) -> Option<ShakeStep> {
        loop {
            match self.phase {
                ShakePhase::Idle => {
                    self.phase = if self.number_of_times == 0 {
                        ShakePhase::Returning
                    } else {
                        ShakePhase::Shaking {
                            remaining: self.number_of_times,
                            position: self.direction.start_position(),
                        }
                    };
                }
                ShakePhase::Shaking {
                    remaining,
                    position,
                } => {
                    self.phase = if remaining <= 1 {
                        ShakePhase::Returning
                    } else {
                        ShakePhase::Shaking {
                            remaining: remaining - 1,
                            position: position.opposite(),
                        }
                    };
                    return Some(ShakeStep {
                        kind: StepKind::Offset(position),
                        target: position.translation(),
                        duration: self.step_duration,
                    });
                }
                ShakePhase::Returning => {
                    self.phase = ShakePhase::Done;
                    return Some(ShakeStep {
                        kind: StepKind::Return,
                        target: Transform2D::IDENTITY,
                        duration: self.step_duration,
                    });
                }
                ShakePhase::Done => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offsets(steps: &[ShakeStep]) -> Vec<f32> {
        steps
            .iter()
            .filter_map(|step| match step.kind {
                StepKind::Offset(position) => Some(position.offset * 2.0),
                StepKind::Return => None,
            })
            .collect()
    }

    #[test]
    fn test_canonical_positions() {
        assert_eq!(Position::LEFT.opposite(), Position::RIGHT);
        assert_eq!(Position::TOP.opposite(), Position::BOTTOM);
        assert_eq!(Position::RIGHT.opposite().opposite(), Position::RIGHT);
        assert_eq!(Direction::Horizontal.start_position(), Position::LEFT);
        assert_eq!(Direction::Vertical.start_position(), Position::TOP);
    }

    #[test]
    fn test_position_translation_stays_on_axis() {
        assert_eq!(Position::LEFT.translation(), Transform2D::translation(2.0, 0.0));
        assert_eq!(Position::BOTTOM.translation(), Transform2D::translation(0.0, -2.0));
    }

    #[test]
    fn test_builder_defaults() {
        let request = ShakeRequest::builder(Direction::Horizontal).build().unwrap();
        assert_eq!(request.number_of_times(), 5);
        assert_eq!(request.total_duration(), 0.5);
        assert!((request.per_step_duration() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_builder_rejects_bad_arguments() {
        let err = ShakeRequest::builder(Direction::Vertical)
            .number_of_times(0)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ShakeError::InvalidArgument {
                name: "number_of_times",
                ..
            }
        ));

        for duration in [0.0, -0.5, f32::NAN, f32::INFINITY] {
            let err = ShakeRequest::builder(Direction::Vertical)
                .total_duration(duration)
                .build()
                .unwrap_err();
            assert!(matches!(
                err,
                ShakeError::InvalidArgument {
                    name: "total_duration",
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_horizontal_sequence_matches_default_shake() {
        let request = ShakeRequest::builder(Direction::Horizontal).build().unwrap();
        let steps: Vec<ShakeStep> = ShakeSequence::from_request(&request).collect();

        assert_eq!(steps.len(), 6);
        assert_eq!(offsets(&steps), vec![2.0, -2.0, 2.0, -2.0, 2.0]);
        assert_eq!(steps[5].kind, StepKind::Return);
        assert!(steps[5].target.is_identity());

        for step in &steps {
            assert!((step.duration - 0.1).abs() < 1e-6);
            assert_eq!(step.target.translation.y, 0.0);
        }
        let total: f32 = steps.iter().map(|step| step.duration).sum();
        assert!((total - 0.6).abs() < 1e-5);
    }

    #[test]
    fn test_vertical_sequence_alternates_on_y_only() {
        let steps: Vec<ShakeStep> = ShakeSequence::new(Direction::Vertical, 4, 0.25).collect();

        assert_eq!(offsets(&steps), vec![2.0, -2.0, 2.0, -2.0]);
        for step in &steps {
            assert_eq!(step.target.translation.x, 0.0);
            if let StepKind::Offset(position) = step.kind {
                assert_eq!(position.direction, Direction::Vertical);
            }
        }
        for pair in steps[..4].windows(2) {
            assert_eq!(pair[1].target.translation.y, -pair[0].target.translation.y);
        }
    }

    #[test]
    fn test_phase_transitions() {
        let mut sequence = ShakeSequence::new(Direction::Horizontal, 2, 0.1);
        assert_eq!(sequence.phase(), ShakePhase::Idle);

        sequence.next();
        assert_eq!(
            sequence.phase(),
            ShakePhase::Shaking {
                remaining: 1,
                position: Position::RIGHT
            }
        );
        sequence.next();
        assert_eq!(sequence.phase(), ShakePhase::Returning);
        sequence.next();
        assert_eq!(sequence.phase(), ShakePhase::Done);
        assert_eq!(sequence.next(), None);
        assert_eq!(sequence.next(), None);
    }

    #[test]
    fn test_single_shake_ends_at_identity() {
        let steps: Vec<ShakeStep> = ShakeSequence::new(Direction::Horizontal, 1, 0.3).collect();
        assert_eq!(steps.len(), 2);
        assert!(steps.last().unwrap().target.is_identity());
    }
}
