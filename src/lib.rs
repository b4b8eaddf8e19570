// Shared infrastructure
pub mod config;
pub mod error;
pub mod metrics;

// Domain layer
pub mod destination;
pub mod notification;
pub mod registry;
pub mod sink;

// Application layer
pub mod api;
pub mod server;
