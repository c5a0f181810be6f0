// Domain layer: schedule/booking models and ports (interfaces) for the provider API.

pub mod model;
pub mod ports;
