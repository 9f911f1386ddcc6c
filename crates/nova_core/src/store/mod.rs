//! # Storage Containers
//!
//! The three container families of the engine's storage layer.
//!
//! ## Design Philosophy
//!
//! - Every container is a plain value type with single-threaded ownership
//! - Dense arrays are the unit of iteration; ids and indices are `u32`
//! - "Missing" is a first-class outcome expressed with `Option`, never an
//!   error type
//! - Removal uses swap-with-last in every container, so dense order is
//!   unspecified and indices do not survive removals

pub mod registry;
pub mod soa;
pub mod sparse;

pub use sparse::{SparseSet, PAGE_SIZE};

/// Position within a dense array.
///
/// Indices are only valid until the next removal in the same container.
/// Callers that maintain external index maps must apply the relocation
/// reported by the container's `swap_remove`.
pub type Index = u32;
