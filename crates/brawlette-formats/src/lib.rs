//! File format parsers and builders for Brawlhalla's packaged game data.
//!
//! This crate provides symmetric (parser and builder) implementations for
//! the two container formats the game ships its vector assets in, plus the
//! stream primitives they are built on.
//!
//! # Supported Formats
//!
//! - **ANM**: animation containers, stores of animations whose frames
//!   delta-compress their bones against the previous frame
//! - **SWZ**: encrypted archives of zlib-compressed text payloads, keyed by
//!   a per-build 32-bit key and a custom keystream generator
//!
//! # Design Principles
//!
//! - **Exact positioning**: every decode step depends on exact byte
//!   positioning and cumulative state; reads never silently truncate
//! - **Typed failures**: fatal and recoverable conditions are distinct
//!   variants, so callers can pattern-match skip-and-continue cases
//! - **Symmetric operations**: what parses also builds, and round-trips to
//!   an equal tree

#![warn(missing_docs)]
#![allow(clippy::float_cmp)] // Matrix encoding picks the compact wire form by exact comparison
#![allow(clippy::module_name_repetitions)] // Clear naming is preferred

pub mod anm;
pub mod compression;
pub mod stream;
pub mod swz;
