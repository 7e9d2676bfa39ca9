pub mod build;
pub mod config;
pub mod routes;
pub mod watch;
