//! Configuration loading.

pub mod config;
