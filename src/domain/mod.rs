// Domain layer: core models and ports (interfaces). No external service
// dependencies beyond serde/chrono.

pub mod model;
pub mod ports;
