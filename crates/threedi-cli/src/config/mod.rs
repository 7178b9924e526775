//! Configuration for the command line front-end.
//!
//! Values are merged with the precedence CLI flags > `--set` overrides >
//! config file > built-in defaults, then turned into the core
//! [`EncoderConfig`](threedi::engine::config::EncoderConfig).

mod builder;
mod defaults;
mod file;
mod models;

pub use builder::{build_config, resolve_codebook_path};
pub use models::AppConfig;
