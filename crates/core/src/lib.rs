//! Domain types and pure logic for the reelgen video generation front end.
//!
//! Nothing in this crate performs I/O: request validation, prompt
//! composition, the generation record lifecycle, history querying and the
//! cosmetic progress simulation all live here so the HTTP service, the
//! remote client and the studio front end share one definition.

pub mod error;
pub mod generation;
pub mod history;
pub mod progress;
pub mod prompt;
pub mod request;
pub mod types;
pub mod validation;
