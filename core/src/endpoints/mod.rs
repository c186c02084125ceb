//! Typed endpoint wrappers, one module per backend area.
//!
//! Each wrapper fixes a route's method and path and maps its arguments into
//! a query string or body; `ApiClient::dispatch` does the rest.

mod admin;
mod auth;
mod gdpr;
mod images;
mod performance;
mod privacy;
mod products;
mod recommendations;
mod reviews;
mod search;
