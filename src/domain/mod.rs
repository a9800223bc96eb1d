// Domain layer: assessment models, ports, and the pure scoring services.
// Scoring never touches I/O; the pipelines in app/ feed it and persist its output.

pub mod model;
pub mod ports;

pub mod services;
