// Adapters layer: concrete bindings of the core to external systems.

pub mod http;
