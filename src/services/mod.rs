pub mod scheduler;

pub use scheduler::{DeferredQueue, Scheduler, Task};
