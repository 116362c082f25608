//! Logic Module - Business Logic & Engines
//!
//! records → filter → view (search, sort) → export.
//! `analysis` is independent: traffic text in, validated report out.

pub mod records;
pub mod filter;
pub mod view;
pub mod export;
pub mod analysis;
