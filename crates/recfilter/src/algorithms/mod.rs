//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! This layer provides the core filtering algorithms:
//! - Forward and backward recursive passes and the iteration loop
//! - Slice normalisation (mask/NaN zero-fill) and re-masking
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
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Recursive filter passes.
pub mod recursion;

/// Mask and NaN handling around a filtering pass.
pub mod masking;
