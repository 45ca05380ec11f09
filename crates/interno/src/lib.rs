//! Client-side state layer for the Interno internship board.
//!
//! The crate is split along the seams a consumer sees: [`domain`] holds the
//! entity shapes shared with the backend, [`remote`] speaks HTTP to it, and
//! [`stores`] owns the in-memory collections a UI subtree reads from.

pub mod config;
pub mod domain;
pub mod remote;
pub mod stores;
pub mod telemetry;
