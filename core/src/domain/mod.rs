//! Domain layer containing entities of the access-control pipeline

pub mod entities;
