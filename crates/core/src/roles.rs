//! Well-known role name constants.
//!
//! These must match the values stored in the `users.role` column and
//! referenced by the RBAC extractors.

/// Administrator: full dashboard access (orders, content, broadcasts, audit).
pub const ROLE_ADMIN: &str = "admin";

/// Regular storefront customer.
pub const ROLE_USER: &str = "user";
