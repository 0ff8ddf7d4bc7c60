//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod audit;
pub mod broadcast;
pub mod collection;
pub mod notification;
pub mod order;
pub mod product;
pub mod registration;
pub mod user;
