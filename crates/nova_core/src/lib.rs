//! # Nova3D Core Storage Layer
//!
//! Cache-conscious entity-component containers for the Nova3D engine:
//!
//! - [`soa!`] - columnar (struct-of-arrays) stores with lockstep append and
//!   O(1) swap-remove across every column
//! - [`SparseSet`] - paged sparse-to-dense id mapping with O(live-count)
//!   iteration
//! - [`component_store!`] - one sparse set per component type keyed by a
//!   shared entity id, with a has-all-components join
//!
//! ## Architecture Rules
//!
//! 1. **Data-oriented design** - components are stored in contiguous arrays,
//!    one per type, so single-component passes stream through one array
//! 2. **Swap-remove everywhere** - removal is O(1) and never preserves order
//! 3. **Single-threaded by contract** - no internal locking; confine mutation
//!    to one simulation thread and wrap externally if sharing is needed
//!
//! ## Index stability
//!
//! Row indices and references handed out by these containers are only valid
//! until the next removal in the same container. There are no generation
//! counters; callers must not retain indices across mutations.
//!
//! ## Example
//!
//! ```rust,ignore
//! use nova_core::{soa, Position, Velocity};
//!
//! soa! {
//!     /// Per-projectile simulation state.
//!     pub struct Projectiles {
//!         position: Position,
//!         velocity: Velocity,
//!     }
//! }
//!
//! let mut projectiles = Projectiles::with_capacity(4096);
//! let row = projectiles.push(Position::new(0.0, 1.0, 0.0), Velocity::new(0.0, 0.0, 9.0));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod component;
pub mod store;

pub use component::{column_bytes, Component, Health, Position, Velocity};
pub use store::{Index, SparseSet, PAGE_SIZE};
