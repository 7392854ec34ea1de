//! HTTP surface: session resolution, the route gate, and JSON endpoints over
//! the authorization core.

pub mod app;
pub mod authz;
pub mod config;
pub mod context;
pub mod middleware;
pub mod session;
pub mod store;
