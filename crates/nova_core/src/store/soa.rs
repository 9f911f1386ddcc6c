//! # Columnar Stores
//!
//! Struct-of-arrays storage generated by the [`soa!`](crate::soa) macro.
//!
//! ## Why columns
//!
//! ```text
//! AoS:  [P0 V0 H0][P1 V1 H1][P2 V2 H2]   <- velocity pass skips P and H
//! SoA:  P: [P0 P1 P2]                    <- velocity pass streams one array
//!       V: [V0 V1 V2]
//!       H: [H0 H1 H2]
//! ```
//!
//! A pass touching one component type streams through one contiguous array
//! instead of striding over unrelated fields. All columns share a single row
//! count: appending writes every column in lockstep, and removal swap-removes
//! from every column, so the parallel-length invariant holds after every
//! operation.
//!
//! Rust has no type-indexed variadic tuples, so the store is generated as a
//! named struct with one `Vec` per declared column and accessors named after
//! the columns.

/// Generates a columnar (struct-of-arrays) store.
///
/// Each declared field becomes a private `Vec` column. All columns share one
/// row count; a "row" is the tuple of per-column elements at one index.
///
/// The generated type provides:
///
/// - `new`, `with_capacity`, `len`, `is_empty`, `reserve`, `clear`,
///   `shrink_to_fit`
/// - `push(..) -> Index` - lockstep append, returns the new row index
/// - `swap_remove(index) -> Option<Index>` - O(1) removal; `Some(index)`
///   reports that the formerly-last row now lives at `index`, `None` means
///   the removed row was already last and nothing relocated
/// - `row(index)` / `row_mut(index)` - reference tuple over one row
/// - `columns()` / `columns_mut()` - tuple of whole-column slices
/// - a read-only slice accessor named after each column
/// - `for_each` / `for_each_indexed` - sequential row-ascending iteration
///
/// # Example
///
/// ```rust,ignore
/// soa! {
///     /// Live particles, updated once per frame.
///     pub struct Particles {
///         position: Position,
///         velocity: Velocity,
///     }
/// }
///
/// let mut particles = Particles::new();
/// particles.push(Position::new(0.0, 0.0, 0.0), Velocity::new(1.0, 0.0, 0.0));
/// let (positions, velocities) = particles.columns_mut();
/// for (pos, vel) in positions.iter_mut().zip(velocities.iter()) {
///     pos.x += vel.x;
/// }
/// ```
#[macro_export]
macro_rules! soa {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $first:ident : $fty:ty
            $(, $field:ident : $ty:ty)* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $first: ::std::vec::Vec<$fty>,
            $( $field: ::std::vec::Vec<$ty>, )*
        }

        impl ::core::default::Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl $name {
            #[doc = concat!("Creates an empty `", stringify!($name), "`.")]
            #[must_use]
            $vis fn new() -> Self {
                Self {
                    $first: ::std::vec::Vec::new(),
                    $( $field: ::std::vec::Vec::new(), )*
                }
            }

            #[doc = concat!(
                "Creates an empty `", stringify!($name),
                "` with `capacity` rows pre-reserved in every column."
            )]
            #[must_use]
            $vis fn with_capacity(capacity: usize) -> Self {
                Self {
                    $first: ::std::vec::Vec::with_capacity(capacity),
                    $( $field: ::std::vec::Vec::with_capacity(capacity), )*
                }
            }

            /// Returns the number of rows. Every column has this length.
            #[inline]
            #[must_use]
            $vis fn len(&self) -> usize {
                self.$first.len()
            }

            /// Checks if the store holds no rows.
            #[inline]
            #[must_use]
            $vis fn is_empty(&self) -> bool {
                self.$first.is_empty()
            }

            /// Appends one value to every column in lockstep.
            ///
            /// # Returns
            ///
            /// The index of the new row (the previous row count).
            $vis fn push(&mut self, $first: $fty $(, $field: $ty)*) -> $crate::store::Index {
                let row = self.$first.len() as $crate::store::Index;
                self.$first.push($first);
                $( self.$field.push($field); )*
                row
            }

            /// Removes the row at `index` by swapping it with the last row in
            /// every column, then truncating.
            ///
            /// # Returns
            ///
            /// `Some(index)` when the formerly-last row was relocated to
            /// `index` - callers maintaining external index maps must apply
            /// this fixup. `None` when the removed row was already last and
            /// nothing moved.
            ///
            /// # Panics
            ///
            /// Panics if `index >= self.len()`.
            $vis fn swap_remove(&mut self, index: $crate::store::Index) -> ::core::option::Option<$crate::store::Index> {
                let len = self.len();
                let i = index as usize;
                assert!(i < len, "row {index} out of bounds (len {len})");

                self.$first.swap_remove(i);
                $( self.$field.swap_remove(i); )*

                if i + 1 == len {
                    ::core::option::Option::None
                } else {
                    ::core::option::Option::Some(index)
                }
            }

            /// Returns references to every column's element at `index`, or
            /// `None` if the row does not exist.
            #[must_use]
            #[allow(unused_parens)]
            $vis fn row(&self, index: $crate::store::Index) -> ::core::option::Option<(&$fty $(, &$ty)*)> {
                let i = index as usize;
                if i >= self.len() {
                    return ::core::option::Option::None;
                }
                ::core::option::Option::Some((&self.$first[i] $(, &self.$field[i])*))
            }

            /// Returns mutable references to every column's element at
            /// `index`, or `None` if the row does not exist.
            #[allow(unused_parens)]
            $vis fn row_mut(&mut self, index: $crate::store::Index) -> ::core::option::Option<(&mut $fty $(, &mut $ty)*)> {
                let i = index as usize;
                if i >= self.len() {
                    return ::core::option::Option::None;
                }
                ::core::option::Option::Some((&mut self.$first[i] $(, &mut self.$field[i])*))
            }

            /// Returns every column as a slice, for vectorized iteration over
            /// any subset of components.
            #[must_use]
            #[allow(unused_parens)]
            $vis fn columns(&self) -> (&[$fty] $(, &[$ty])*) {
                (&self.$first $(, &self.$field)*)
            }

            /// Returns every column as a mutable slice.
            #[allow(unused_parens)]
            $vis fn columns_mut(&mut self) -> (&mut [$fty] $(, &mut [$ty])*) {
                (&mut self.$first $(, &mut self.$field)*)
            }

            #[doc = concat!("Read-only access to the `", stringify!($first), "` column.")]
            #[inline]
            #[must_use]
            $vis fn $first(&self) -> &[$fty] {
                &self.$first
            }

            $(
                #[doc = concat!("Read-only access to the `", stringify!($field), "` column.")]
                #[inline]
                #[must_use]
                $vis fn $field(&self) -> &[$ty] {
                    &self.$field
                }
            )*

            /// Visits every row in ascending order with mutable access to
            /// each element.
            ///
            /// The store must not be resized during iteration; the row count
            /// is captured once at loop start.
            $vis fn for_each<F>(&mut self, mut f: F)
            where
                F: ::core::ops::FnMut(&mut $fty $(, &mut $ty)*),
            {
                let len = self.len();
                for i in 0..len {
                    f(&mut self.$first[i] $(, &mut self.$field[i])*);
                }
            }

            /// Like `for_each`, additionally passing each row's index.
            $vis fn for_each_indexed<F>(&mut self, mut f: F)
            where
                F: ::core::ops::FnMut($crate::store::Index, &mut $fty $(, &mut $ty)*),
            {
                let len = self.len();
                for i in 0..len {
                    f(i as $crate::store::Index, &mut self.$first[i] $(, &mut self.$field[i])*);
                }
            }

            /// Reserves capacity for at least `additional` more rows in every
            /// column.
            $vis fn reserve(&mut self, additional: usize) {
                self.$first.reserve(additional);
                $( self.$field.reserve(additional); )*
            }

            /// Removes all rows from every column, keeping capacity.
            $vis fn clear(&mut self) {
                self.$first.clear();
                $( self.$field.clear(); )*
            }

            /// Shrinks every column's capacity to fit its length.
            $vis fn shrink_to_fit(&mut self) {
                self.$first.shrink_to_fit();
                $( self.$field.shrink_to_fit(); )*
            }
        }
    };
}
