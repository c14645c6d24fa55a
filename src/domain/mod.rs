// Domain layer: core models and ports (interfaces). No format-specific code here.

pub mod model;
pub mod ports;
