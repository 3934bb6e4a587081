//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`PenumbraError`] covers configuration-time failures:
//! - Invalid shadow configuration (cascade count, split blend, map size)
//! - Invalid camera depth ranges
//! - Degenerate light directions
//! - Scene configuration file loading and parsing
//!
//! The per-frame path (frustum extraction, cascade fitting, uniform packing)
//! never fails: once a calculator has been constructed from a validated
//! configuration, numerical degeneracies show up as degenerate matrices
//! rather than as errors.
//!
//! # Usage
//!
//! ```rust,ignore
//! use penumbra::errors::{PenumbraError, Result};
//!
//! fn configure() -> Result<()> {
//!     let config = ShadowConfig::default();
//!     config.validate()?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for the Penumbra crate.
#[derive(Error, Debug)]
pub enum PenumbraError {
    // ========================================================================
    // Shadow Configuration Errors
    // ========================================================================
    /// The requested number of cascades is zero or above the supported maximum.
    #[error("Invalid cascade count: {count} (supported range: 1..={max})")]
    InvalidCascadeCount {
        /// Requested cascade count
        count: u32,
        /// Maximum supported cascade count
        max: u32,
    },

    /// The split blend factor is outside `[0, 1]` or not finite.
    #[error("Invalid split lambda: {0} (expected a value in [0, 1])")]
    InvalidSplitLambda(f32),

    /// The shadow map resolution is zero.
    #[error("Invalid shadow map size: {0}")]
    InvalidMapSize(u32),

    /// The variance blur scale is not a positive finite number.
    #[error("Invalid blur scale: {0} (expected a positive finite value)")]
    InvalidBlurScale(f32),

    /// A dimension of a fixed shadow volume is not usable.
    #[error("Invalid shadow volume {field}: {value}")]
    InvalidShadowVolume {
        /// Name of the offending field
        field: &'static str,
        /// Rejected value
        value: f32,
    },

    // ========================================================================
    // Camera & Light Errors
    // ========================================================================
    /// The camera depth range does not satisfy `0 < near < far`.
    #[error("Invalid depth range: near = {near}, far = {far} (expected 0 < near < far)")]
    InvalidDepthRange {
        /// Near clip distance
        near: f32,
        /// Far clip distance
        far: f32,
    },

    /// The camera field of view is outside `(0, 180)` degrees.
    #[error("Invalid field of view: {0} degrees")]
    InvalidFieldOfView(f32),

    /// The light direction cannot be normalized.
    #[error("Degenerate light direction: {0:?}")]
    DegenerateLightDirection([f32; 3]),

    // ========================================================================
    // Configuration File Errors
    // ========================================================================
    /// JSON parsing error.
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Alias for `Result<T, PenumbraError>`.
pub type Result<T> = std::result::Result<T, PenumbraError>;
