pub mod config;
pub mod error;
pub mod fetch;
pub mod http;
pub mod neows;
pub mod output;
pub mod passthrough;
