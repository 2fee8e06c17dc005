// Domain layer: records and ports (interfaces). No database types beyond the row derive.

pub mod model;
pub mod ports;
