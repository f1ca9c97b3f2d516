//! Layer 4: Engine
//!
//! # Purpose
//!
//! This layer orchestrates a filtering run by coordinating the math (halo
//! padding, coordinate checks) and algorithms (recurrence, masking) layers.
//! It owns validation and the per-slice processing loop.
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Adapters
//!   ↓
//! Layer 4: Engine ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Unified execution engine for recursive filtering.
pub mod executor;

/// Validation utilities.
pub mod validator;
