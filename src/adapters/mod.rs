// Adapters layer: concrete sinks and the thread-identity provider.

pub mod sink;
pub mod thread;

pub use sink::{channel, ChannelSink, LoggedSink, RecordingSink, WriterSink};
pub use thread::CurrentThread;
