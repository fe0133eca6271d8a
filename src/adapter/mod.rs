//! Outbound adapter implementations.

pub mod outbound;
