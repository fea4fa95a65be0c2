//! Sea-ORM entities backing the PostgreSQL repositories

pub mod product;
pub mod store;
