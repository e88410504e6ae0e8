// Domain layer: state models and ports. The HTTP client and config loaders live outside.

pub mod model;
pub mod ports;
