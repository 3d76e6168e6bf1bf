pub mod config;
pub mod features;
pub mod routes;
