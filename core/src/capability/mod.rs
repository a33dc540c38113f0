// rill/src/capability/mod.rs

//! A capability interface whose newer method carries a default behaviour, so
//! adding it did not require touching existing implementations.

pub mod definition;
pub mod functional;

pub use definition::{default_try_me_again, Capability, EMPTY_MESSAGE_RESPONSE};
pub use functional::FunctionalCapability;
