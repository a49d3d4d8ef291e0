//! Request middleware.
//!
//! Cross-cutting request lifecycle concerns. HTTP-specific guards live in
//! [`crate::inbound::http`].

pub mod trace;

pub use trace::Trace;
