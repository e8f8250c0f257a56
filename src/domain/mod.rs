// Domain layer: order entities, value objects and the ports the core depends on.

pub mod model;
pub mod ports;
