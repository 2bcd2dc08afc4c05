//! Unrolling a branching lane graph into one ordered traversal.
//!
//! [`CircuitBuilder`] walks the source network from a starting lane end and
//! records each lane it crosses, with circuit-s offsets laid end to end. The
//! resulting [`Walk`] is what a circuit lane answers queries from.

pub mod builder;
pub mod observer;
pub mod types;

#[cfg(test)]
mod tests;

pub use builder::*;
pub use observer::*;
pub use types::*;
