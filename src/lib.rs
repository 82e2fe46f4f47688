#![doc = include_str!("../README.md")]

/// Handles all app configuration.
pub mod config;

/// Owns the database connection pool and defines the `Ping` liveness probe used by handlers.
pub mod database;

/// Startup and request-level error types.
pub mod error;

/// Defines the handlers for all API routes.
pub mod routes;

/// Handles the server startup, such as initialization, route configuration and middleware.
pub mod startup;

/// Handles logs and tracing.
pub mod telemetry;
