//! Notification delivery: preference-routed fan-out, side-channel email
//! sends, and admin broadcasts.

pub mod broadcast;
pub mod dispatcher;
pub mod email;
pub mod templates;

pub use broadcast::send_broadcast;
pub use dispatcher::{DispatchError, Dispatcher, SendOptions};
pub use email::{EmailConfig, EmailDelivery, EmailError};
