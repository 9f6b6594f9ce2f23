// Domain layer: models and ports. Adapters and handles build on these.

pub mod model;
pub mod ports;
