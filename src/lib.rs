//! Random password generation with an optional store for named passwords.
//!
//! [`password::generate`] turns a [`password::GenerationConfig`] into a
//! string, either by drawing characters from a flat charset or by alternating
//! words and separators. The output is not meant for credentials that need
//! cryptographic strength.

pub mod cli;
pub mod clipboard;
pub mod commands;
pub mod errors;
pub mod generators;
pub mod password;
pub mod random;
pub mod settings;
pub mod store;
