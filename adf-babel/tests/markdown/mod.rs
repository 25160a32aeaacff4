//! Markdown dialect tests
//!
//! Tests for bidirectional ADF ↔ dialect conversion.

mod export;
mod import;
mod round_trip;
