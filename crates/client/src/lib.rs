//! Client for the upstream video generation API.
//!
//! [`api`] wraps the raw HTTP call, [`backend`] defines the
//! [`VideoBackend`](backend::VideoBackend) seam and the upstream-backed
//! implementation, and [`config`] loads endpoint settings from the
//! environment.

pub mod api;
pub mod backend;
pub mod config;
pub mod error;

pub use backend::{RemoteVideoClient, VideoBackend};
pub use config::UpstreamConfig;
pub use error::ClientError;
