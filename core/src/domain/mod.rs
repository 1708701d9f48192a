//! Domain layer: entities and their intrinsic behavior

pub mod entities;
