//! # Component Definitions
//!
//! Components are pure data with no behavior. Render and compute paths
//! upload whole columns to the GPU, so component types must be plain old
//! data: `Copy`, `Pod`, fixed size, no padding surprises.

use bytemuck::{Pod, Zeroable};

/// Marker trait for component types stored in the engine's columns.
///
/// Components must be:
/// - `Copy`: no heap allocations, bitwise copyable
/// - `Pod` / `Zeroable`: safe to reinterpret as bytes for GPU upload
/// - `Default`: a well-defined empty value
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Clone, Copy, Default, Pod, Zeroable)]
/// #[repr(C)]
/// struct Mass {
///     kg: f32,
/// }
///
/// impl Component for Mass {}
/// ```
pub trait Component: Copy + Pod + Zeroable + Default + Send + Sync + 'static {}

/// Reinterprets a component column as raw bytes for zero-copy GPU upload.
///
/// The returned slice aliases the column; it is invalidated by any
/// subsequent mutation of the owning store.
#[inline]
#[must_use]
pub fn column_bytes<C: Component>(column: &[C]) -> &[u8] {
    bytemuck::cast_slice(column)
}

/// Position component.
///
/// A 3D position in world space, padded to 16 bytes for SIMD-friendly
/// column layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Position {
    /// X coordinate in world space.
    pub x: f32,
    /// Y coordinate in world space.
    pub y: f32,
    /// Z coordinate in world space.
    pub z: f32,
    /// Padding for 16-byte alignment.
    pub _padding: f32,
}

impl Component for Position {}

impl Position {
    /// Creates a new position.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            x,
            y,
            z,
            _padding: 0.0,
        }
    }

    /// Returns the squared distance to another position.
    ///
    /// Avoids the sqrt call for distance comparisons.
    #[inline]
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }
}

/// Velocity component.
///
/// Movement in world units per second.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Velocity {
    /// X velocity component.
    pub x: f32,
    /// Y velocity component.
    pub y: f32,
    /// Z velocity component.
    pub z: f32,
    /// Padding for 16-byte alignment.
    pub _padding: f32,
}

impl Component for Velocity {}

impl Velocity {
    /// Creates a new velocity.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            x,
            y,
            z,
            _padding: 0.0,
        }
    }
}

/// Health component for damageable entities.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Health {
    /// Current hit points.
    pub current: f32,
    /// Maximum hit points.
    pub max: f32,
}

impl Component for Health {}

impl Health {
    /// Creates a health component at full hit points.
    #[inline]
    #[must_use]
    pub const fn full(max: f32) -> Self {
        Self { current: max, max }
    }

    /// Checks whether the entity is out of hit points.
    #[inline]
    #[must_use]
    pub fn is_dead(self) -> bool {
        self.current <= 0.0
    }
}
