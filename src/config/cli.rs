use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "emu-bridge")]
#[command(about = "Issue and decode emulator commands over a line-based channel")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Where to write messages; `-` for stdout. Overrides `channel.output`
    #[arg(short, long)]
    pub output: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum CliCommand {
    /// Reset emulator state
    Clean,
    /// Prepare the emulator for a thread
    Setup {
        /// Thread id; defaults to the calling thread
        #[arg(long)]
        tid: Option<u64>,
        #[arg(long)]
        arch: Option<String>,
        #[arg(long)]
        mode: Option<String>,
    },
    /// Run until the given address
    Start { until: String },
    /// Step one instruction
    Step,
    /// Step over the next call
    StepFunction,
    /// Run to the next jump
    StepJump,
    Stop,
    /// Read payload lines from stdin and print decoded commands as JSON
    Decode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_setup() {
        let cli = CliConfig::try_parse_from([
            "emu-bridge", "-o", "out.log", "setup", "--tid", "7", "--arch", "arm", "--mode",
            "thumb",
        ])
        .unwrap();

        assert_eq!(cli.output.as_deref(), Some("out.log"));
        assert_eq!(
            cli.command,
            CliCommand::Setup {
                tid: Some(7),
                arch: Some("arm".to_string()),
                mode: Some("thumb".to_string()),
            }
        );
    }

    #[test]
    fn test_parse_step_variants() {
        let parse = |args: &[&str]| {
            CliConfig::try_parse_from(std::iter::once("emu-bridge").chain(args.iter().copied()))
                .unwrap()
                .command
        };
        assert_eq!(parse(&["step"]), CliCommand::Step);
        assert_eq!(parse(&["step-function"]), CliCommand::StepFunction);
        assert_eq!(parse(&["step-jump"]), CliCommand::StepJump);
        assert_eq!(
            parse(&["start", "0x1000"]),
            CliCommand::Start {
                until: "0x1000".to_string()
            }
        );
    }

    #[test]
    fn test_start_requires_until() {
        assert!(CliConfig::try_parse_from(["emu-bridge", "start"]).is_err());
    }
}
