use crate::adapters::thread::CurrentThread;
use crate::core::encoder::encode;
use crate::domain::model::{EmulatorCommand, PartialTargetPolicy, StepMode, Target};
use crate::domain::ports::{ConfigProvider, MessageSink, ThreadIdentity};
use crate::utils::error::{BridgeError, Result};
use std::fmt::Display;

/// Sending side of the emulator protocol.
///
/// Every operation formats exactly one message and hands it to the sink. The
/// only failures are the ones the sink reports, plus a rejected partial setup
/// target when [`PartialTargetPolicy::Reject`] is configured.
pub struct Emulator<S, T = CurrentThread> {
    sink: S,
    threads: T,
    partial_target: PartialTargetPolicy,
}

impl<S: MessageSink> Emulator<S, CurrentThread> {
    pub fn new(sink: S) -> Self {
        Self::with_thread_identity(sink, CurrentThread)
    }

    pub fn from_config<C: ConfigProvider>(sink: S, config: &C) -> Self {
        Self::new(sink).with_partial_target_policy(config.partial_target_policy())
    }
}

impl<S: MessageSink, T: ThreadIdentity> Emulator<S, T> {
    pub fn with_thread_identity(sink: S, threads: T) -> Self {
        Self {
            sink,
            threads,
            partial_target: PartialTargetPolicy::default(),
        }
    }

    pub fn with_partial_target_policy(mut self, policy: PartialTargetPolicy) -> Self {
        self.partial_target = policy;
        self
    }

    pub fn partial_target_policy(&self) -> PartialTargetPolicy {
        self.partial_target
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn dispatch(&self, cmd: &EmulatorCommand) -> Result<()> {
        let message = encode(cmd);
        tracing::trace!(command = cmd.verb(), "dispatching emulator command");
        self.sink.send(&message)
    }

    pub fn clean(&self) -> Result<()> {
        self.dispatch(&EmulatorCommand::Clean)
    }

    /// Prepares the emulator for `thread_id`, or for the calling thread when omitted.
    ///
    /// The architecture/mode pair is forwarded only when both are given. A lone
    /// value is dropped or rejected according to the partial target policy.
    pub fn setup(
        &self,
        thread_id: Option<u64>,
        arch: Option<&str>,
        mode: Option<&str>,
    ) -> Result<()> {
        let target = match (arch, mode) {
            (Some(arch), Some(mode)) => Some(Target::new(arch, mode)),
            (None, None) => None,
            (arch, _) => {
                let missing = if arch.is_some() { "mode" } else { "arch" };
                match self.partial_target {
                    PartialTargetPolicy::Drop => {
                        tracing::debug!(missing, "dropping incomplete setup target");
                        None
                    }
                    PartialTargetPolicy::Reject => {
                        return Err(BridgeError::PartialTarget { missing })
                    }
                }
            }
        };
        self.setup_target(thread_id, target)
    }

    /// Like [`Emulator::setup`], but falls back to the configured default target
    /// when the caller names neither an architecture nor a mode.
    pub fn setup_with_defaults<C: ConfigProvider>(
        &self,
        config: &C,
        thread_id: Option<u64>,
        arch: Option<&str>,
        mode: Option<&str>,
    ) -> Result<()> {
        if arch.is_none() && mode.is_none() {
            self.setup_target(thread_id, config.default_target())
        } else {
            self.setup(thread_id, arch, mode)
        }
    }

    pub fn setup_target(&self, thread_id: Option<u64>, target: Option<Target>) -> Result<()> {
        let thread_id = thread_id.unwrap_or_else(|| self.threads.current_thread_id());
        self.dispatch(&EmulatorCommand::Setup { thread_id, target })
    }

    pub fn start(&self, until: impl Display) -> Result<()> {
        self.dispatch(&EmulatorCommand::Start {
            until: until.to_string(),
        })
    }

    pub fn step(&self) -> Result<()> {
        self.dispatch(&EmulatorCommand::Step {
            mode: StepMode::Instruction,
        })
    }

    pub fn step_function(&self) -> Result<()> {
        self.dispatch(&EmulatorCommand::Step {
            mode: StepMode::Function,
        })
    }

    pub fn step_jump(&self) -> Result<()> {
        self.dispatch(&EmulatorCommand::Step {
            mode: StepMode::Jump,
        })
    }

    pub fn stop(&self) -> Result<()> {
        self.dispatch(&EmulatorCommand::Stop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sink::RecordingSink;

    fn emulator(sink: &RecordingSink) -> Emulator<&RecordingSink, impl ThreadIdentity> {
        Emulator::with_thread_identity(sink, || 4242_u64)
    }

    #[test]
    fn test_fixed_commands() {
        let sink = RecordingSink::new();
        let emu = emulator(&sink);

        emu.clean().unwrap();
        emu.step().unwrap();
        emu.step_function().unwrap();
        emu.step_jump().unwrap();
        emu.stop().unwrap();

        assert_eq!(
            sink.messages(),
            vec![
                "emulator:::clean",
                "emulator:::step:::1",
                "emulator:::step:::2",
                "emulator:::step:::3",
                "emulator:::stop",
            ]
        );
    }

    #[test]
    fn test_setup_uses_current_thread_when_omitted() {
        let sink = RecordingSink::new();
        emulator(&sink).setup(None, None, None).unwrap();
        assert_eq!(sink.messages(), vec!["emulator:::setup:::4242"]);
    }

    #[test]
    fn test_setup_with_target() {
        let sink = RecordingSink::new();
        let emu = emulator(&sink);

        emu.setup(Some(7), None, None).unwrap();
        emu.setup(Some(7), Some("arm"), Some("thumb")).unwrap();

        assert_eq!(
            sink.messages(),
            vec!["emulator:::setup:::7", "emulator:::setup:::7:::arm:::thumb"]
        );
    }

    #[test]
    fn test_partial_target_is_dropped_by_default() {
        let sink = RecordingSink::new();
        let emu = emulator(&sink);

        emu.setup(Some(7), Some("arm"), None).unwrap();
        emu.setup(Some(7), None, Some("thumb")).unwrap();

        assert_eq!(
            sink.messages(),
            vec!["emulator:::setup:::7", "emulator:::setup:::7"]
        );
    }

    #[test]
    fn test_partial_target_rejected_sends_nothing() {
        let sink = RecordingSink::new();
        let emu = emulator(&sink).with_partial_target_policy(PartialTargetPolicy::Reject);

        let err = emu.setup(Some(7), Some("arm"), None).unwrap_err();
        assert!(matches!(err, BridgeError::PartialTarget { missing: "mode" }));

        let err = emu.setup(None, None, Some("thumb")).unwrap_err();
        assert!(matches!(err, BridgeError::PartialTarget { missing: "arch" }));

        assert!(sink.messages().is_empty());
    }

    #[test]
    fn test_start_interpolates_until() {
        let sink = RecordingSink::new();
        let emu = emulator(&sink);

        emu.start(1000).unwrap();
        emu.start("0x7fff0000").unwrap();

        assert_eq!(
            sink.messages(),
            vec!["emulator:::start:::1000", "emulator:::start:::0x7fff0000"]
        );
    }

    #[test]
    fn test_one_send_per_operation() {
        let sink = RecordingSink::new();
        let emu = emulator(&sink);

        emu.clean().unwrap();
        emu.setup(Some(1), Some("x86"), Some("64")).unwrap();
        emu.start(0).unwrap();
        emu.step().unwrap();
        emu.stop().unwrap();

        assert_eq!(sink.len(), 5);
    }
}
