pub mod api;
pub mod config;
pub mod derivation;
pub mod docs;
pub mod error;
pub mod model;
pub mod routes;
pub mod utils;
