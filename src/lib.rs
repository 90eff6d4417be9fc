pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliCommand, CliConfig};

pub use adapters::{ChannelSink, CurrentThread, LoggedSink, RecordingSink, WriterSink};
pub use config::BridgeConfig;
pub use crate::core::{emulator::Emulator, router::CommandRouter};
pub use domain::model::{EmulatorCommand, PartialTargetPolicy, StepMode, Target};
pub use domain::ports::{CommandHandler, ConfigProvider, MessageSink, ThreadIdentity};
pub use utils::error::{BridgeError, Result};
