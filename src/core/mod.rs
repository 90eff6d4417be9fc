pub mod emulator;
pub mod encoder;
pub mod router;

pub use crate::domain::model::{EmulatorCommand, PartialTargetPolicy, StepMode, Target};
pub use crate::domain::ports::{CommandHandler, ConfigProvider, MessageSink, ThreadIdentity};
pub use crate::utils::error::Result;
