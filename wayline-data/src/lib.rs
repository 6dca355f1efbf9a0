//! HTTP adapters for the Wayline engine.
//!
//! Responsibilities:
//! - Implement the `wayline-core` provider seams against external
//!   services, currently the OSRM Route API.
//! - Encapsulate wire formats and their deserialisation.
//!
//! Boundaries:
//! - Domain rules live in `wayline-core`; this crate only fetches and
//!   converts.
//! - Blocking callers are bridged onto async HTTP internally; no async
//!   surface is exposed.

#![forbid(unsafe_code)]

pub mod routing;
