//! Configuration loading and management
//!
//! This module provides utilities for loading client configuration from
//! environment variables, optionally seeded from a `.env` file.

pub mod loader;

// Re-export commonly used items
pub use loader::{load_dotenv, load_from_env, load_from_env_with_prefix, EnvConfigSource, ENV_PREFIX};
