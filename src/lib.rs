//! PGnest: PG Listing Publishing Library
//!
//! A library for composing, validating and publishing paying-guest
//! listings against the PGnest marketplace backend.

pub mod api;
pub mod cli;
pub mod listing;
pub mod report;
pub mod session;
pub mod utils;
