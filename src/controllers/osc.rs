// src/controllers/osc.rs
// OSC Controller
//
// Remote control surface. Keyboard shortcuts in the app go through the
// sender too, so every shake takes the same path.

use nannou_osc as osc;
use thiserror::Error;
use tracing::warn;

use crate::animation::Direction;

#[derive(Debug, Error)]
pub enum OscError {
    #[error("failed to bind OSC receiver on port {port}: {reason}")]
    Bind { port: u16, reason: String },

    #[error("failed to create OSC sender: {0}")]
    Sender(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum OscCommand {
    Shake {
        direction: Direction,
        number_of_times: Option<u32>,
        total_duration: Option<f32>,
    },
    Announce {
        text: String,
    },
    SetScreenReader {
        enabled: bool,
    },
    ToggleScreenReader,
}

/// Turn one OSC message into a command. Unknown addresses and bad
/// arguments give `None`.
pub fn parse_message(addr: &str, args: &[osc::Type]) -> Option<OscCommand> {
    match addr {
        "/shake/horizontal" => parse_shake(Direction::Horizontal, args),
        "/shake/vertical" => parse_shake(Direction::Vertical, args),
        "/announce" => {
            if let [osc::Type::String(text)] = args {
                Some(OscCommand::Announce { text: text.clone() })
            } else {
                warn!(addr, "expected a single string argument");
                None
            }
        }
        "/accessibility/screen_reader" => match args {
            [osc::Type::Int(on)] => Some(OscCommand::SetScreenReader { enabled: *on != 0 }),
            [] => Some(OscCommand::ToggleScreenReader),
            _ => {
                warn!(addr, "expected an optional int argument");
                None
            }
        },
        _ => {
            warn!(addr, "unknown OSC address pattern");
            None
        }
    }
}

// optional args: [times:int] [duration:float]
fn parse_shake(direction: Direction, args: &[osc::Type]) -> Option<OscCommand> {
    let mut number_of_times = None;
    let mut total_duration = None;

    for (i, arg) in args.iter().enumerate() {
        match (i, arg) {
            // negative counts become 0 and are rejected when the request is built
            (0, osc::Type::Int(times)) => number_of_times = Some(u32::try_from(*times).unwrap_or(0)),
            (1, osc::Type::Float(duration)) => total_duration = Some(*duration),
            _ => {
                warn!(index = i, arg = ?arg, "ignoring unexpected shake argument");
            }
        }
    }

    Some(OscCommand::Shake {
        direction,
        number_of_times,
        total_duration,
    })
}

pub struct OscController {
    command_queue: Vec<OscCommand>,
    receiver: osc::Receiver,
}

impl OscController {
    pub fn new(port: u16) -> Result<Self, OscError> {
        let receiver = osc::receiver(port).map_err(|e| OscError::Bind {
            port,
            reason: e.to_string(),
        })?;

        Ok(Self {
            command_queue: Vec::new(),
            receiver,
        })
    }

    pub fn process_messages(&mut self) {
        for (packet, _addr) in self.receiver.try_iter() {
            for message in packet.into_msgs() {
                if let Some(command) = parse_message(&message.addr, &message.args) {
                    self.command_queue.push(command);
                }
            }
        }
    }

    pub fn take_commands(&mut self) -> Vec<OscCommand> {
        std::mem::take(&mut self.command_queue)
    }
}

pub struct OscSender {
    sender: osc::Sender,
    target_addr: String,
    target_port: u16,
}

impl OscSender {
    pub fn new(target_port: u16) -> Result<Self, OscError> {
        let target_addr = "127.0.0.1".to_string();
        let sender = osc::sender().map_err(|e| OscError::Sender(e.to_string()))?;

        Ok(Self {
            sender,
            target_addr,
            target_port,
        })
    }

    fn send(&self, addr: &str, args: Vec<osc::Type>) {
        if let Err(e) = self
            .sender
            .send((addr.to_string(), args), (self.target_addr.as_str(), self.target_port))
        {
            warn!(addr, error = ?e, "failed to send OSC message");
        }
    }

    pub fn send_shake(&self, direction: Direction) {
        let addr = match direction {
            Direction::Horizontal => "/shake/horizontal",
            Direction::Vertical => "/shake/vertical",
        };
        self.send(addr, Vec::new());
    }

    pub fn send_announce(&self, text: &str) {
        self.send("/announce", vec![osc::Type::String(text.to_string())]);
    }

    pub fn send_toggle_screen_reader(&self) {
        self.send("/accessibility/screen_reader", Vec::new());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shake_defaults() {
        assert_eq!(
            parse_message("/shake/horizontal", &[]),
            Some(OscCommand::Shake {
                direction: Direction::Horizontal,
                number_of_times: None,
                total_duration: None,
            })
        );
    }

    #[test]
    fn test_parse_shake_with_arguments() {
        let args = [osc::Type::Int(3), osc::Type::Float(0.9)];
        assert_eq!(
            parse_message("/shake/vertical", &args),
            Some(OscCommand::Shake {
                direction: Direction::Vertical,
                number_of_times: Some(3),
                total_duration: Some(0.9),
            })
        );
    }

    #[test]
    fn test_negative_count_is_passed_on_as_zero() {
        let args = [osc::Type::Int(-4)];
        let Some(OscCommand::Shake {
            number_of_times, ..
        }) = parse_message("/shake/horizontal", &args)
        else {
            panic!("expected a shake command");
        };
        assert_eq!(number_of_times, Some(0));
    }

    #[test]
    fn test_parse_announce_and_screen_reader() {
        assert_eq!(
            parse_message("/announce", &[osc::Type::String("Saved".to_string())]),
            Some(OscCommand::Announce {
                text: "Saved".to_string()
            })
        );
        assert_eq!(parse_message("/announce", &[]), None);
        assert_eq!(
            parse_message("/accessibility/screen_reader", &[osc::Type::Int(1)]),
            Some(OscCommand::SetScreenReader { enabled: true })
        );
        assert_eq!(
            parse_message("/accessibility/screen_reader", &[]),
            Some(OscCommand::ToggleScreenReader)
        );
    }

    #[test]
    fn test_unknown_address() {
        assert_eq!(parse_message("/grid/move", &[]), None);
    }
}
