//! # pg-repository
//!
//! Validated Postgres connection settings from the environment, and a
//! live, pinged connection handle for whatever issues queries next.
//!
//! Settings are collected by [`config::ConnectionInfoBuilder`], which records
//! every missing or malformed value before reporting the first one.
//! [`db::RepositoryFactory`] turns them into a [`db::Repository`].

pub mod config;
pub mod db;
pub mod error;
pub mod telemetry;

pub use db::{Repository, RepositoryFactory, new_repository};
pub use error::{ConfigError, Error, Result};
