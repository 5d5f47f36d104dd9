//! Common utilities shared by the upstream clients.

pub mod client_builder;

pub use client_builder::build_http_client;
