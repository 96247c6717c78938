// Domain layer: payload/status models, ports (interfaces) and pure text services.

pub mod model;
pub mod ports;
pub mod services;
