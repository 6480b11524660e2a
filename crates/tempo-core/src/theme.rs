//! Reactive theming engine: a
//! structured theme document, color
//! parsing and conversion, deep
//! merge semantics, and the store
//! that owns the active theme.

pub mod color;
pub mod config;
pub mod merge;
pub mod store;
