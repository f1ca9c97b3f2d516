//! Layer 1: Primitives
//!
//! # Purpose
//!
//! This layer provides the data model and error types used throughout the
//! crate: labelled fields and their spatial slices, smoothing-coefficient
//! fields, and the shared error and warning enums.
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Adapters
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Shared error types.
pub mod errors;

/// Labelled fields and spatial slicing.
pub mod grid;

/// Smoothing-coefficient fields.
pub mod coefficients;
