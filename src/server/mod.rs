//! HTTP surface
//!
//! Thin JSON routes over [`Application`](crate::application::Application).

pub mod handlers;
pub mod routes;
pub mod server;

pub use server::HttpServer;
