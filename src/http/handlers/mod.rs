//! API handlers organized by resource.

pub mod admin;
pub mod bookings;
pub mod designs;
pub mod meta;
pub mod uploads;

// Re-export all handlers for use in routing
pub(crate) use admin::rotate_token;
pub(crate) use bookings::{clear_bookings, create_booking, delete_booking, list_bookings};
pub(crate) use designs::{create_design, delete_design, list_designs};
pub(crate) use meta::{health, list_types, root};
pub(crate) use uploads::serve_upload;
