//! Format implementations
//!
//! This module contains all format implementations that convert between
//! ADF trees and their text representations.

pub mod icons;
pub mod json;
pub mod markdown;
pub mod plaintext;
pub mod treeviz;

pub use json::AdfJsonFormat;
pub use markdown::MarkdownFormat;
pub use plaintext::PlaintextFormat;
pub use treeviz::TreevizFormat;
