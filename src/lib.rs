pub mod background;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod extractors;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;
pub mod utils;
