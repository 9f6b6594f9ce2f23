//! femutils: a utility toolkit for game-server plugins.
//!
//! Reloadable config and data handles over pluggable storage engines
//! (YAML files by default, MongoDB and MySQL behind features), a command
//! framework with subcommands and tab completion, message templating, and
//! assorted text/time helpers.

pub mod adapters;
pub mod command;
pub mod config;
pub mod core;
pub mod domain;
pub mod lang;
pub mod utils;

pub use crate::adapters::yaml::YamlEngine;
pub use crate::config::ConfigHandle;
pub use crate::core::data::DataHandle;
pub use crate::domain::model::{DataRef, Position};
pub use crate::domain::ports::{CommandSender, DataEngine, ServerDirectory};
pub use crate::utils::error::{FemError, Result};

#[cfg(feature = "mongo")]
pub use crate::adapters::mongo::MongoEngine;

#[cfg(feature = "mysql")]
pub use crate::adapters::mysql::MySqlEngine;
