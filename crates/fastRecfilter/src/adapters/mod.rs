//! Layer 5: Adapters
//!
//! This layer provides user-facing APIs that adapt the engine layer for different
//! execution modes:
//!
//! - **Batch**: Whole-field filtering with parallel slice processing

// Parallel batch adapter for recursive filtering.
pub mod batch;
