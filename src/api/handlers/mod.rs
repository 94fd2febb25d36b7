//! Request handlers.

pub mod webhook;
