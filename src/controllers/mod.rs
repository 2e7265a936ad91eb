pub mod osc;

pub use osc::{OscCommand, OscController, OscError, OscSender};
