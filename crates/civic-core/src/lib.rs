//! # civic-core
//!
//! Core domain types, validation, and media payloads for Civic Architect.
//!
//! This crate provides the foundational types shared across all Civic crates:
//! - Entity structs for the analysis report (diagnosis, blueprint, timeline, ...)
//! - Enums with their wire spellings, including the application state machine
//! - The validated [`request::AnalysisRequest`] and the evidence encoder
//! - Generated media payloads (images, PCM speech)
//! - Cross-cutting error types

pub mod encoder;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod media;
pub mod request;

#[cfg(any(test, feature = "testing"))]
pub mod testing;
