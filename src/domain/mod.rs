// Domain layer: wire and catalog models plus the ports the core depends on.

pub mod model;
pub mod ports;
