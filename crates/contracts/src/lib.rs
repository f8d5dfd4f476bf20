//! Core of the multi-step application form.
//!
//! Everything here is host-testable: browser specifics (localStorage, timers,
//! DOM focus) live in the `frontend` crate and reach the core only through
//! the `KeyValueStore` seam.

pub mod domain;
pub mod shared;
