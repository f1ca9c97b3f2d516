//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides pure array and coordinate utilities used by the filter:
//! - Symmetric halo padding and cropping of 2-D grids
//! - Coordinate midpoints and tolerance comparison
//!
//! These are reusable building blocks with no filter-specific logic.
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
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Halo padding utilities.
pub mod halo;

/// Coordinate arithmetic.
pub mod coords;
