pub mod config;
pub mod db;
pub mod handlers;
pub mod server;
pub mod services;
pub mod store;
pub mod validation;
