//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs` — Rich domain types (validated, render-ready)
//! - `wire.rs` — Raw serde structs matching feed messages
//! - `convert.rs` — `From` conversions from wire to domain types
//! - `state.rs` — State containers with update methods (for feed-driven data)

pub mod candle;
