pub mod config;
pub mod constants;
pub mod error;
pub mod exporter;
pub mod logging;
pub mod monitor;
pub mod naming;
pub mod notify;
pub mod platform;
pub mod runtime;
pub mod scheduler;
pub mod serialization;
