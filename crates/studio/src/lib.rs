//! `reelgen-studio` -- terminal front end for reelgen.
//!
//! Drives a generation from the command line: submits a request, animates
//! progress while the video renders, shows the result and keeps a local
//! history of finished videos.

pub mod backend;
pub mod config;
pub mod download;
pub mod error;
pub mod form;
pub mod render;
pub mod session;
