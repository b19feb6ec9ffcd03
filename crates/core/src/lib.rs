//! Conversion and formatting engine for Devise.
//!
//! This crate contains pure logic with ZERO network or filesystem dependencies.
//! Rate retrieval and preference persistence are injected through traits and
//! plain data; everything here is synchronous.
//!
//! # Modules
//!
//! - `currency` - Rate tables, conversion, number text, and preference handling

pub mod currency;
