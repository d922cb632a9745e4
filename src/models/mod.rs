//! Data types shared by the page, asset and log handlers.
//!
//! `layout` holds the literal HTML scaffolding; `log_entry` the JSON frame
//! pushed to browsers over the websocket log.

pub mod layout;
pub mod log_entry;
