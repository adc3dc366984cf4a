//! Top-level facade crate for wampgate.
//!
//! Re-exports core types and the gateway library so users can depend on a single crate.

pub mod core {
    pub use wampgate_core::*;
}

pub mod gateway {
    pub use wampgate_gateway::*;
}
