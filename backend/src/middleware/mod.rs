//! Middleware for the HTTP surface.

pub mod trace;
