// Domain layer: trip models, report types and ports (interfaces).

pub mod model;
pub mod ports;
pub mod report;
