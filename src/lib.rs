//! CVSS v3.1 base scoring.
//!
//! [`core`] holds the stateless engine: the metric table, the scorer and the
//! vector formatter. [`session`] is the terminal picker built on top of it.

pub mod config;
pub mod core;
pub mod session;
