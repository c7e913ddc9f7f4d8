//! Domain entities mirrored from the backend's JSON payloads.

pub mod activity;
pub mod house;
pub mod types;
