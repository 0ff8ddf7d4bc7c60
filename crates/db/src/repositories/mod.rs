//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod audit_repo;
pub mod broadcast_repo;
pub mod collection_repo;
pub mod notification_preference_repo;
pub mod notification_repo;
pub mod order_repo;
pub mod product_repo;
pub mod registration_repo;
pub mod user_repo;
