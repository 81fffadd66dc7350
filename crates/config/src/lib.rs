//! Configuration management for marksearch.
//!
//! This crate provides types and loaders for managing upstream registry
//! connection configuration from environment variables and `.env` files.

pub mod constants;
mod loader;

pub use loader::{Config, ConfigError, ConfigLoader, RegistryCredentials, default_token_cache_path};
