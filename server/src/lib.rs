pub mod config;
pub mod error;
pub mod logic;
pub mod managers;
mod routes;
pub mod server;
mod socket;
pub mod state;
