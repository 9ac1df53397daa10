//! Common utility functions

pub mod link;
pub mod time;
