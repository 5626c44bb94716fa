//! Backend library for a mehandi studio gallery and booking site.
//!
//! The public site lists portfolio designs and accepts booking
//! submissions; an admin dashboard, authorized by a shared token, manages
//! the portfolio and the submissions. Persistence is a set of JSON
//! collection files plus uploaded media on local disk, with an
//! environment-aware storage layout for read-only (serverless) deploys.
//!
//! Module map:
//!
//! - [`store`] - storage roots, JSON collections, admin config, bootstrap
//! - [`model`] - design/booking records and the style catalogue
//! - [`service`] - design and booking operations over the store
//! - [`media`] - upload storage and MIME resolution
//! - [`janitor`] - detached best-effort file cleanup
//! - [`http`] - axum API layer
//! - [`config`] - server settings
//! - [`notify`] - booking notification hook

#![deny(unsafe_code)]

pub mod config;
pub mod constants;
pub mod error;
pub mod http;
pub mod janitor;
pub mod media;
pub mod model;
pub mod notify;
pub mod service;
pub mod store;
