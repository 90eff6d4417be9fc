use crate::core::encoder::decode;
use crate::domain::ports::CommandHandler;
use tokio::sync::mpsc::UnboundedReceiver;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouterStats {
    pub completed: usize,
    pub failed: usize,
    /// Commands discarded from the backlog after a failure.
    pub dropped: usize,
    pub malformed: usize,
    pub ignored: usize,
}

impl RouterStats {
    /// Payloads seen, whatever became of them.
    pub fn total(&self) -> usize {
        self.completed + self.failed + self.dropped + self.malformed + self.ignored
    }
}

/// Receive side of the channel: picks emulator payloads out of the stream and
/// runs them through the handler one at a time, in arrival order.
pub struct CommandRouter<H: CommandHandler> {
    handler: H,
}

impl<H: CommandHandler> CommandRouter<H> {
    pub fn new(handler: H) -> Self {
        Self { handler }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Runs until every sender of `payloads` is dropped.
    ///
    /// A failing command clears whatever is already queued behind it, since
    /// those commands were issued against emulator state that no longer holds.
    pub async fn run(&self, mut payloads: UnboundedReceiver<String>) -> RouterStats {
        let mut stats = RouterStats::default();

        while let Some(payload) = payloads.recv().await {
            let command = match decode(&payload) {
                Ok(Some(command)) => command,
                Ok(None) => {
                    tracing::trace!(payload = %payload, "ignoring payload outside emulator namespace");
                    stats.ignored += 1;
                    continue;
                }
                Err(e) => {
                    tracing::warn!("⚠️ {}", e);
                    stats.malformed += 1;
                    continue;
                }
            };

            let verb = command.verb();
            tracing::debug!(command = verb, "running emulator command");
            match self.handler.handle(command).await {
                Ok(result) => {
                    tracing::info!("✅ {} → {}", verb, result);
                    stats.completed += 1;
                }
                Err(e) => {
                    tracing::error!("❌ {} failed: {}", verb, e);
                    stats.failed += 1;

                    let dropped_before = stats.dropped;
                    drain_backlog(&mut payloads, &mut stats);
                    let dropped = stats.dropped - dropped_before;
                    if dropped > 0 {
                        tracing::warn!("🗑️ Dropped {} queued emulator command(s)", dropped);
                    }
                }
            }
        }

        tracing::debug!(?stats, "payload channel closed");
        stats
    }
}

/// Empties the queue, classifying each payload so every one received is counted once.
fn drain_backlog(payloads: &mut UnboundedReceiver<String>, stats: &mut RouterStats) {
    while let Ok(payload) = payloads.try_recv() {
        match decode(&payload) {
            Ok(Some(_)) => stats.dropped += 1,
            Ok(None) => stats.ignored += 1,
            Err(_) => stats.malformed += 1,
        }
    }
}
