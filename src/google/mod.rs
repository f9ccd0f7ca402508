//! Thin REST clients for the Google services this crate talks to.

pub mod auth;
pub mod drive;
pub mod sheets;
