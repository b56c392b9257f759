pub mod config;
pub mod fetch;
pub mod forwarder;
pub mod handler;
pub mod infra;
pub mod response;
pub mod telemetry;
