// Domain layer: registry model, reference lists and ports. No I/O here.

pub mod model;
pub mod ports;
pub mod reference;
