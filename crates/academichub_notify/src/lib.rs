//! Push notifications for the AcademicHub app.
//!
//! Document events (new comments, like increases, friend requests) and the
//! callable `sendPushNotification` function all run through the
//! [`Dispatcher`](dispatcher::Dispatcher): evaluate, look up the recipient's
//! device token, compose, send once.

pub mod composer;
pub mod conditions;
#[cfg(test)]
mod conditions_proptest;
pub mod dispatcher;
pub mod doc;
pub mod error;
pub mod events;
pub mod handlers;
pub mod memory;
pub mod routes;

pub use dispatcher::{Dispatcher, EventTable, Outcome};
pub use error::NotifyError;
pub use routes::routes;
