// Domain layer: record and filter models plus the data-source port.

pub mod model;
pub mod ports;
