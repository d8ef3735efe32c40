pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod registration;
pub mod session;
pub mod state;
pub mod store;
pub mod templates_structs;
