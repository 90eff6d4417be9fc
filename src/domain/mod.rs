// Domain layer: command model and ports. Concrete sinks live in `adapters`.

pub mod model;
pub mod ports;
