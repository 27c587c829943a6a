// Domain layer: core models and ports (interfaces). No storage or I/O here.

pub mod model;
pub mod ports;
