//! HTTP handlers, one module per resource.

pub mod audit;
pub mod common;
pub mod auth;
pub mod broadcast;
pub mod collection;
pub mod notification;
pub mod order;
pub mod product;
pub mod registration;
