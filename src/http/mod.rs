//! HTTP front-ends: JSON API and server-rendered form.
//!
//! Every route is a pure adapter: resolve a binding, run one read or one
//! write through the core, render the result or the error. Error
//! translation to status codes happens here and nowhere else.

pub mod form;
pub mod handlers;
pub mod server;

pub use server::{AppState, HttpServer};
