//! Core library for the loan portal.
//!
//! Holds the environment-scoped resource registry and everything that acts
//! on it: typed records, validators, the one-time key generator, the CRUD
//! operations, and the [`portal::Portal`] that dispatches user actions and
//! emits notifications. The catalog, dashboard, and display modules derive
//! the read-only views. This crate does no I/O and knows nothing about HTTP.

pub mod catalog;
pub mod dashboard;
pub mod display;
pub mod environment;
pub mod error;
pub mod keygen;
pub mod models;
pub mod notify;
pub mod ops;
pub mod portal;
pub mod registry;
pub mod seed;
pub mod validate;
