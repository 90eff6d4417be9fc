use serde::{Deserialize, Serialize};
use std::fmt;

/// Architecture/mode pair forwarded with `setup`. Either both travel or neither does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub arch: String,
    pub mode: String,
}

impl Target {
    pub fn new(arch: impl Into<String>, mode: impl Into<String>) -> Self {
        Self {
            arch: arch.into(),
            mode: mode.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepMode {
    /// Single instruction.
    Instruction = 1,
    /// Step over calls.
    Function = 2,
    /// Run to the next jump.
    Jump = 3,
}

impl StepMode {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Instruction),
            2 => Some(Self::Function),
            3 => Some(Self::Jump),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum EmulatorCommand {
    Clean,
    Setup {
        thread_id: u64,
        target: Option<Target>,
    },
    /// `until` is carried verbatim; the receiver decides how to read it.
    Start {
        until: String,
    },
    Step {
        mode: StepMode,
    },
    Stop,
}

impl EmulatorCommand {
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Clean => "clean",
            Self::Setup { .. } => "setup",
            Self::Start { .. } => "start",
            Self::Step { .. } => "step",
            Self::Stop => "stop",
        }
    }

    /// Address a `start` should run to. Decimal is tried first, then `0x` hex;
    /// anything else means "no end address" (0).
    ///
    /// Unlike a decimal-only receiver, `0x…` values resolve to their address
    /// instead of collapsing to 0.
    pub fn until_address(&self) -> Option<u64> {
        let Self::Start { until } = self else {
            return None;
        };
        let raw = until.trim();
        let address = raw
            .parse::<u64>()
            .ok()
            .or_else(|| {
                raw.strip_prefix("0x")
                    .or_else(|| raw.strip_prefix("0X"))
                    .and_then(|hex| u64::from_str_radix(hex, 16).ok())
            })
            .unwrap_or(0);
        Some(address)
    }
}

impl fmt::Display for EmulatorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::core::encoder::encode(self))
    }
}

/// What `setup` does when only one of architecture and mode is supplied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartialTargetPolicy {
    /// Omit the lone value and send a bare setup.
    #[default]
    Drop,
    /// Fail without sending anything.
    Reject,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_mode_codes() {
        assert_eq!(StepMode::Instruction.code(), 1);
        assert_eq!(StepMode::Function.code(), 2);
        assert_eq!(StepMode::Jump.code(), 3);
        assert_eq!(StepMode::from_code(2), Some(StepMode::Function));
        assert_eq!(StepMode::from_code(0), None);
        assert_eq!(StepMode::from_code(4), None);
    }

    #[test]
    fn test_until_address() {
        let start = |until: &str| EmulatorCommand::Start {
            until: until.to_string(),
        };
        assert_eq!(start("1000").until_address(), Some(1000));
        assert_eq!(start("0x1000").until_address(), Some(0x1000));
        assert_eq!(start("somewhere").until_address(), Some(0));
        assert_eq!(EmulatorCommand::Stop.until_address(), None);
    }

    #[test]
    fn test_json_shape() {
        let cmd = EmulatorCommand::Setup {
            thread_id: 7,
            target: Some(Target::new("arm", "thumb")),
        };
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(json["command"], "setup");
        assert_eq!(json["thread_id"], 7);
        assert_eq!(json["target"]["mode"], "thumb");

        let step = serde_json::to_value(EmulatorCommand::Step {
            mode: StepMode::Jump,
        })
        .unwrap();
        assert_eq!(step["mode"], "jump");
    }
}
