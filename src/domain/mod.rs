// Domain layer: seating model and ports (interfaces).

pub mod model;
pub mod ports;
