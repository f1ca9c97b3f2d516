//! Layer 4: Engine
//!
//! This layer provides the parallel execution engine for recursive filtering.
//! It distributes independent spatial slices across CPU cores.

// Parallel execution engine using CPU threads
pub mod executor;
