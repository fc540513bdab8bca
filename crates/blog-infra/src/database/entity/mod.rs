//! SeaORM entities.

pub mod blog;
