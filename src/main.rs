use async_trait::async_trait;
use clap::Parser;
use emu_bridge::utils::error::ErrorSeverity;
use emu_bridge::utils::{logger, validation::Validate};
use emu_bridge::{
    BridgeConfig, BridgeError, CliCommand, CliConfig, CommandHandler, CommandRouter,
    ConfigProvider, Emulator, EmulatorCommand, LoggedSink, WriterSink,
};
use tokio::io::{AsyncBufReadExt, BufReader};

/// Prints each decoded command as one JSON line.
struct JsonPrinter;

#[async_trait]
impl CommandHandler for JsonPrinter {
    async fn handle(&self, command: EmulatorCommand) -> emu_bridge::Result<String> {
        let line = serde_json::to_string(&command)?;
        println!("{}", line);
        Ok(command.to_string())
    }
}

fn load_config(cli: &CliConfig) -> emu_bridge::Result<BridgeConfig> {
    let mut config = match &cli.config {
        Some(path) => BridgeConfig::from_file(path)?,
        None => BridgeConfig::default(),
    };
    if let Some(output) = &cli.output {
        config.channel.output = output.clone();
    }
    config.validate()?;
    Ok(config)
}

fn issue(command: &CliCommand, config: &BridgeConfig) -> emu_bridge::Result<()> {
    let sink = LoggedSink::new(WriterSink::open(config.output())?);
    let emulator = Emulator::from_config(sink, config);

    match command {
        CliCommand::Clean => emulator.clean(),
        CliCommand::Setup { tid, arch, mode } => {
            emulator.setup_with_defaults(config, *tid, arch.as_deref(), mode.as_deref())
        }
        CliCommand::Start { until } => emulator.start(until),
        CliCommand::Step => emulator.step(),
        CliCommand::StepFunction => emulator.step_function(),
        CliCommand::StepJump => emulator.step_jump(),
        CliCommand::Stop => emulator.stop(),
        CliCommand::Decode => Err(BridgeError::ConfigError {
            message: "decode does not issue commands".to_string(),
        }),
    }
}

async fn decode_stdin() -> emu_bridge::Result<()> {
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();

    let reader = tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            let line = line.trim_end().to_string();
            if line.is_empty() {
                continue;
            }
            if tx.send(line).is_err() {
                break;
            }
        }
        Ok::<(), std::io::Error>(())
    });

    let stats = CommandRouter::new(JsonPrinter).run(rx).await;
    tracing::info!(
        "📊 Decoded {} command(s): {} failed, {} dropped, {} malformed, {} ignored",
        stats.completed,
        stats.failed,
        stats.dropped,
        stats.malformed,
        stats.ignored
    );

    reader
        .await
        .map_err(|e| BridgeError::IoError(std::io::Error::other(e)))??;
    Ok(())
}

fn exit_code(e: &BridgeError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            logger::init_cli_logger(cli.verbose);
            tracing::error!("❌ Configuration failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(exit_code(&e));
        }
    };

    let verbose = cli.verbose || config.logging.verbose;
    if cli.json_logs || config.logging.json {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    let result = match &cli.command {
        CliCommand::Decode => decode_stdin().await,
        command => issue(command, &config),
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let code = exit_code(&e);
        if code > 0 {
            std::process::exit(code);
        }
    }

    Ok(())
}
