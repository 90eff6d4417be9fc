use crate::domain::model::{EmulatorCommand, PartialTargetPolicy, Target};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Host channel that carries a single wire message to the controlling process.
pub trait MessageSink: Send + Sync {
    fn send(&self, message: &str) -> Result<()>;
}

impl<S: MessageSink + ?Sized> MessageSink for &S {
    fn send(&self, message: &str) -> Result<()> {
        (**self).send(message)
    }
}

impl<S: MessageSink + ?Sized> MessageSink for Arc<S> {
    fn send(&self, message: &str) -> Result<()> {
        (**self).send(message)
    }
}

impl<S: MessageSink + ?Sized> MessageSink for Box<S> {
    fn send(&self, message: &str) -> Result<()> {
        (**self).send(message)
    }
}

/// Reports the identifier of the thread the caller is running on.
pub trait ThreadIdentity: Send + Sync {
    fn current_thread_id(&self) -> u64;
}

impl<F> ThreadIdentity for F
where
    F: Fn() -> u64 + Send + Sync,
{
    fn current_thread_id(&self) -> u64 {
        self()
    }
}

pub trait ConfigProvider: Send + Sync {
    fn output(&self) -> &str;
    fn partial_target_policy(&self) -> PartialTargetPolicy;
    fn default_target(&self) -> Option<Target>;
}

/// Receive side: executes one decoded command and returns a result summary.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, command: EmulatorCommand) -> Result<String>;
}
