pub mod movement;
pub mod shake;
pub mod shaker;

pub use movement::{EasingType, ShakeMovement, ShakePlayer, ShakeStart};
pub use shake::{
    Completion, Direction, Position, ShakePhase, ShakeRequest, ShakeRequestBuilder, ShakeSequence,
    ShakeStep, StepKind, DEFAULT_NUMBER_OF_TIMES, DEFAULT_TOTAL_DURATION,
};
pub use shaker::{shake, AnimatedElement, ShakeOutcome, TransformTarget};
