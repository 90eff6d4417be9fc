use crate::domain::model::{EmulatorCommand, StepMode, Target};
use crate::utils::error::{BridgeError, Result};

/// First field of every payload addressed to the emulator.
pub const NAMESPACE: &str = "emulator";
pub const SEPARATOR: &str = ":::";

pub fn encode(cmd: &EmulatorCommand) -> String {
    match cmd {
        EmulatorCommand::Clean => format!("{NAMESPACE}{SEPARATOR}clean"),

        EmulatorCommand::Setup { thread_id, target } => {
            let mut msg = format!("{NAMESPACE}{SEPARATOR}setup{SEPARATOR}{thread_id}");
            if let Some(Target { arch, mode }) = target {
                msg.push_str(&format!("{SEPARATOR}{arch}{SEPARATOR}{mode}"));
            }
            msg
        }

        EmulatorCommand::Start { until } => format!("{NAMESPACE}{SEPARATOR}start{SEPARATOR}{until}"),

        EmulatorCommand::Step { mode } => {
            format!("{NAMESPACE}{SEPARATOR}step{SEPARATOR}{}", mode.code())
        }

        EmulatorCommand::Stop => format!("{NAMESPACE}{SEPARATOR}stop"),
    }
}

/// Parses a payload from the channel.
///
/// Returns `Ok(None)` for payloads that are not addressed to the emulator
/// (other namespaces, or nothing after the namespace), and an error for
/// emulator payloads that cannot be understood.
///
/// A step code outside 1..=3 is rejected here rather than forwarded raw, so
/// the handler only ever sees the three known step modes.
pub fn decode(payload: &str) -> Result<Option<EmulatorCommand>> {
    let parts: Vec<&str> = payload.split(SEPARATOR).collect();
    if parts.len() < 2 || parts[0] != NAMESPACE {
        return Ok(None);
    }

    let args = &parts[1..];
    let cmd = match args[0] {
        "clean" => EmulatorCommand::Clean,

        "setup" => {
            let raw_tid = args
                .get(1)
                .ok_or_else(|| BridgeError::decode(payload, "setup requires a thread id"))?;
            let thread_id = raw_tid.parse::<u64>().map_err(|_| {
                BridgeError::decode(payload, format!("thread id '{}' is not numeric", raw_tid))
            })?;
            let target = match (args.get(2), args.get(3)) {
                (Some(arch), Some(mode)) => Some(Target::new(*arch, *mode)),
                _ => None,
            };
            EmulatorCommand::Setup { thread_id, target }
        }

        "start" => EmulatorCommand::Start {
            until: args.get(1).copied().unwrap_or("0").to_string(),
        },

        "step" => {
            let mode = match args.get(1).and_then(|raw| raw.parse::<u64>().ok()) {
                None => StepMode::Instruction,
                Some(code) => u8::try_from(code)
                    .ok()
                    .and_then(StepMode::from_code)
                    .ok_or_else(|| {
                        BridgeError::decode(payload, format!("unknown step mode {}", code))
                    })?,
            };
            EmulatorCommand::Step { mode }
        }

        "stop" => EmulatorCommand::Stop,

        other => {
            return Err(BridgeError::decode(
                payload,
                format!("unknown command '{}'", other),
            ))
        }
    };

    Ok(Some(cmd))
}
