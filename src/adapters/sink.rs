use crate::domain::ports::MessageSink;
use crate::utils::error::{BridgeError, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// Writes each message as one line.
pub struct WriterSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl WriterSink<Box<dyn Write + Send>> {
    /// `-` selects stdout; anything else is opened for appending.
    pub fn open(output: &str) -> Result<Self> {
        let writer: Box<dyn Write + Send> = if output == "-" {
            Box::new(std::io::stdout())
        } else {
            let path = Path::new(output);
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            Box::new(OpenOptions::new().create(true).append(true).open(path)?)
        };
        Ok(Self::new(writer))
    }
}

impl<W: Write + Send> MessageSink for WriterSink<W> {
    fn send(&self, message: &str) -> Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| BridgeError::IoError(std::io::Error::other("writer lock poisoned")))?;
        writeln!(writer, "{}", message)?;
        writer.flush()?;
        Ok(())
    }
}

/// Forwards messages into a tokio channel, typically read by a `CommandRouter`.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: UnboundedSender<String>,
}

impl ChannelSink {
    pub fn new(tx: UnboundedSender<String>) -> Self {
        Self { tx }
    }
}

pub fn channel() -> (ChannelSink, UnboundedReceiver<String>) {
    let (tx, rx) = unbounded_channel();
    (ChannelSink::new(tx), rx)
}

impl MessageSink for ChannelSink {
    fn send(&self, message: &str) -> Result<()> {
        self.tx
            .send(message.to_string())
            .map_err(|_| BridgeError::SinkClosed)
    }
}

/// Keeps every message in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    messages: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl MessageSink for RecordingSink {
    fn send(&self, message: &str) -> Result<()> {
        self.lock().push(message.to_string());
        Ok(())
    }
}

/// Logs every message before handing it to the wrapped sink.
pub struct LoggedSink<S> {
    inner: S,
}

impl<S: MessageSink> LoggedSink<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: MessageSink> MessageSink for LoggedSink<S> {
    fn send(&self, message: &str) -> Result<()> {
        tracing::debug!("📤 {}", message);
        self.inner.send(message).inspect_err(|e| {
            tracing::error!("❌ Failed to send '{}': {}", message, e);
        })
    }
}
