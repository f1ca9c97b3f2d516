//! Layer 5: Adapters
//!
//! # Purpose
//!
//! This layer provides user-facing APIs that adapt the engine layer for different
//! execution modes:
//!
//! - **Batch**: Whole-field filtering with slice reassembly
//! - **Streaming**: Slice-at-a-time filtering against a bound grid
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Adapters ← You are here
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Batch adapter for whole fields.
pub mod batch;

/// Streaming adapter for individual slices.
pub mod streaming;
