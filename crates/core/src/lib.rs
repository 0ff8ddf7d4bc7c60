//! Domain logic for the La Kbira storefront backend.
//!
//! This crate has no database or HTTP dependencies so the localization,
//! fabric colour, notification routing, and audit diffing logic can be
//! used (and tested) from any layer.

pub mod audit;
pub mod error;
pub mod fabric;
pub mod locale;
pub mod notification;
pub mod roles;
pub mod types;
