//! # Composite Component Storage
//!
//! Per-entity component storage generated by the
//! [`component_store!`](crate::component_store) macro: one
//! [`SparseSet`](crate::store::SparseSet) per declared component type, all
//! keyed by a shared entity id, plus a master list of live entities.
//!
//! This is the lightweight alternative to a full archetype-based join. The
//! `for_each` walk costs O(entity-count) rather than O(matching-count):
//! entities in the master list that lack full component coverage are
//! silently skipped. That trade keeps the storage simple for gameplay-script
//! scale queries ("units with position AND velocity AND health") where an
//! archetype ECS would be overkill.
//!
//! Entities may hold partial component sets: inserting through individual
//! sparse sets (via `sets_mut`) registers a component without touching the
//! master list, and removing from one set leaves the entity alive with the
//! rest of its components.

/// Generates a composite component store.
///
/// Each declared field becomes a `SparseSet` of that component type. The
/// generated type also carries a master list of entity ids, appended on
/// `insert` and walked by `for_each`.
///
/// The generated type provides:
///
/// - `new`, `with_capacity`, `len`, `is_empty`, `clear`
/// - `insert(entity, ..)` - registers the entity (duplicate-free) and writes
///   every component; a present entity has its components overwritten
/// - `remove(entity)` - drops the entity from the master list and every set
/// - `contains(entity)` - true only when *every* set holds the entity
/// - a read-only accessor named after each field returning its `SparseSet`
///   (per-component lookup is `store.field().get(entity)`)
/// - `sets_mut()` - mutable access to every set, for partial component
///   addition or removal that bypasses the master list
/// - `entities()` - the master list, in insertion order
/// - `for_each` - visits each entity holding all components, in master-list
///   order
///
/// # Example
///
/// ```rust,ignore
/// component_store! {
///     /// Everything a combat script needs per unit.
///     pub struct UnitStore {
///         position: Position,
///         velocity: Velocity,
///         health: Health,
///     }
/// }
///
/// let mut units = UnitStore::new();
/// units.insert(unit_id, spawn_pos, Velocity::default(), Health::full(250.0));
/// units.for_each(|id, pos, vel, health| {
///     pos.x += vel.x * DT;
///     if health.current <= 0.0 {
///         corpses.push(id);
///     }
/// });
/// ```
#[macro_export]
macro_rules! component_store {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $first:ident : $fty:ty
            $(, $field:ident : $ty:ty)* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            entities: ::std::vec::Vec<$crate::store::Index>,
            $first: $crate::store::SparseSet<$fty>,
            $( $field: $crate::store::SparseSet<$ty>, )*
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
                    entities: ::std::vec::Vec::new(),
                    $first: $crate::store::SparseSet::new(),
                    $( $field: $crate::store::SparseSet::new(), )*
                }
            }

            #[doc = concat!(
                "Creates an empty `", stringify!($name),
                "` with dense capacity pre-reserved for `capacity` entities."
            )]
            #[must_use]
            $vis fn with_capacity(capacity: usize) -> Self {
                Self {
                    entities: ::std::vec::Vec::with_capacity(capacity),
                    $first: $crate::store::SparseSet::with_capacity(capacity),
                    $( $field: $crate::store::SparseSet::with_capacity(capacity), )*
                }
            }

            /// Returns the number of entities in the master list, including
            /// entities with partial component coverage.
            #[inline]
            #[must_use]
            $vis fn len(&self) -> usize {
                self.entities.len()
            }

            /// Checks if the master list is empty.
            #[inline]
            #[must_use]
            $vis fn is_empty(&self) -> bool {
                self.entities.is_empty()
            }

            /// The master entity list, in insertion order.
            #[inline]
            #[must_use]
            $vis fn entities(&self) -> &[$crate::store::Index] {
                &self.entities
            }

            /// Registers `entity` and writes every component value.
            ///
            /// An entity already present keeps a single master-list entry and
            /// has its component values overwritten in place.
            $vis fn insert(&mut self, entity: $crate::store::Index, $first: $fty $(, $field: $ty)*) {
                if !self.entities.contains(&entity) {
                    self.entities.push(entity);
                }
                self.$first.insert(entity, $first);
                $( self.$field.insert(entity, $field); )*
            }

            /// Removes `entity` from the master list and from every
            /// component set.
            ///
            /// The master-list removal is a linear scan with swap-with-last;
            /// this is the one O(n) path in the storage layer. Components
            /// registered directly through `sets_mut` are removed as well.
            ///
            /// # Returns
            ///
            /// `true` if the entity was present in the master list or any
            /// component set.
            $vis fn remove(&mut self, entity: $crate::store::Index) -> bool {
                let mut removed = false;
                if let ::core::option::Option::Some(at) =
                    self.entities.iter().position(|&e| e == entity)
                {
                    self.entities.swap_remove(at);
                    removed = true;
                }
                removed |= self.$first.remove(entity).is_some();
                $( removed |= self.$field.remove(entity).is_some(); )*
                removed
            }

            /// Checks whether `entity` holds **all** declared components.
            ///
            /// Presence in the master list is not enough; an entity missing
            /// one component reports `false`.
            #[must_use]
            $vis fn contains(&self, entity: $crate::store::Index) -> bool {
                self.$first.contains(entity) $( && self.$field.contains(entity) )*
            }

            #[doc = concat!(
                "Read-only access to the `", stringify!($first), "` component set."
            )]
            #[inline]
            #[must_use]
            $vis fn $first(&self) -> &$crate::store::SparseSet<$fty> {
                &self.$first
            }

            $(
                #[doc = concat!(
                    "Read-only access to the `", stringify!($field), "` component set."
                )]
                #[inline]
                #[must_use]
                $vis fn $field(&self) -> &$crate::store::SparseSet<$ty> {
                    &self.$field
                }
            )*

            /// Mutable access to every component set, for per-component
            /// mutation and partial addition or removal.
            ///
            /// Removing a component here leaves the entity in the master
            /// list; it simply stops matching `contains` and `for_each`
            /// until the component is re-added.
            $vis fn sets_mut(&mut self) -> (&mut $crate::store::SparseSet<$fty> $(, &mut $crate::store::SparseSet<$ty>)*) {
                (&mut self.$first $(, &mut self.$field)*)
            }

            /// Visits every entity that holds all declared components, in
            /// master-list (insertion) order, with mutable access to each
            /// component.
            ///
            /// Entities with partial component coverage are skipped; the
            /// walk costs O(entity-count), not O(matching-count).
            $vis fn for_each<F>(&mut self, mut f: F)
            where
                F: ::core::ops::FnMut($crate::store::Index, &mut $fty $(, &mut $ty)*),
            {
                for &entity in &self.entities {
                    let ::core::option::Option::Some($first) = self.$first.get_mut(entity) else {
                        continue;
                    };
                    $(
                        let ::core::option::Option::Some($field) = self.$field.get_mut(entity) else {
                            continue;
                        };
                    )*
                    f(entity, $first $(, $field)*);
                }
            }

            /// Removes every entity and component, dropping sparse pages.
            $vis fn clear(&mut self) {
                self.entities.clear();
                self.$first.clear();
                $( self.$field.clear(); )*
            }
        }
    };
}

#[cfg(test)]
mod tests {
    // Each component_store! expansion carries the full generated API; not
    // every test store calls all of it.
    #![allow(dead_code)]

    use crate::store::Index;

    component_store! {
        struct Units {
            position: [f32; 3],
            velocity: [f32; 3],
            health: f32,
        }
    }

    fn spawn_three(units: &mut Units) {
        units.insert(1, [0.0; 3], [1.0, 0.0, 0.0], 100.0);
        units.insert(2, [1.0; 3], [0.0, 1.0, 0.0], 80.0);
        units.insert(3, [2.0; 3], [0.0, 0.0, 1.0], 60.0);
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut units = Units::new();
        spawn_three(&mut units);

        assert_eq!(units.len(), 3);
        assert!(units.contains(2));
        assert_eq!(units.health().get(2), Some(&80.0));
        assert_eq!(units.position().get(3), Some(&[2.0; 3]));
        assert_eq!(units.entities(), &[1, 2, 3]);
    }

    #[test]
    fn test_insert_twice_keeps_single_entry() {
        let mut units = Units::new();
        units.insert(7, [0.0; 3], [0.0; 3], 50.0);
        units.insert(7, [9.0; 3], [0.0; 3], 75.0);

        assert_eq!(units.len(), 1);
        assert_eq!(units.health().get(7), Some(&75.0));
        assert_eq!(units.position().get(7), Some(&[9.0; 3]));
    }

    #[test]
    fn test_remove_cascades_to_every_set() {
        let mut units = Units::new();
        spawn_three(&mut units);

        assert!(units.remove(2));
        assert!(!units.contains(2));
        assert_eq!(units.len(), 2);
        assert_eq!(units.position().get(2), None);
        assert_eq!(units.velocity().get(2), None);
        assert_eq!(units.health().get(2), None);

        // The survivors are untouched.
        assert!(units.contains(1));
        assert!(units.contains(3));
        assert_eq!(units.health().get(3), Some(&60.0));

        assert!(!units.remove(2));
    }

    #[test]
    fn test_contains_requires_every_component() {
        let mut units = Units::new();
        spawn_three(&mut units);

        // Drop one component through the direct per-set path; the entity
        // stays in the master list but no longer matches.
        let (_positions, velocities, _healths) = units.sets_mut();
        assert_eq!(velocities.remove(1), Some([1.0, 0.0, 0.0]));

        assert_eq!(units.len(), 3);
        assert!(!units.contains(1));
        assert!(units.contains(2));
    }

    #[test]
    fn test_partial_entity_added_directly_is_not_contained() {
        let mut units = Units::new();

        // Bypass the composite insert: only one component registered, and
        // the master list never learns about the entity.
        let (positions, _velocities, _healths) = units.sets_mut();
        positions.insert(42, [5.0; 3]);

        assert!(!units.contains(42));
        assert_eq!(units.len(), 0);

        let mut visited = 0;
        units.for_each(|_, _, _, _| visited += 1);
        assert_eq!(visited, 0);
    }

    #[test]
    fn test_for_each_skips_partial_entities() {
        let mut units = Units::new();
        spawn_three(&mut units);

        let (_positions, velocities, _healths) = units.sets_mut();
        velocities.remove(2);

        let mut visited: Vec<Index> = Vec::new();
        units.for_each(|entity, pos, vel, health| {
            pos[0] += vel[0];
            *health -= 1.0;
            visited.push(entity);
        });

        assert_eq!(visited, &[1, 3]);
        assert_eq!(units.position().get(1), Some(&[1.0, 0.0, 0.0]));
        assert_eq!(units.health().get(2), Some(&80.0));
        assert_eq!(units.health().get(3), Some(&59.0));
    }

    #[test]
    fn test_for_each_visits_in_insertion_order() {
        let mut units = Units::with_capacity(4);
        units.insert(30, [0.0; 3], [0.0; 3], 3.0);
        units.insert(10, [0.0; 3], [0.0; 3], 1.0);
        units.insert(20, [0.0; 3], [0.0; 3], 2.0);

        let mut visited: Vec<Index> = Vec::new();
        units.for_each(|entity, _, _, _| visited.push(entity));
        assert_eq!(visited, &[30, 10, 20]);
    }

    #[test]
    fn test_readding_component_restores_match() {
        let mut units = Units::default();
        spawn_three(&mut units);

        let (_positions, velocities, _healths) = units.sets_mut();
        velocities.remove(3);
        assert!(!units.contains(3));

        let (_positions, velocities, _healths) = units.sets_mut();
        velocities.insert(3, [4.0, 0.0, 0.0]);
        assert!(units.contains(3));
    }

    #[test]
    fn test_clear() {
        let mut units = Units::new();
        spawn_three(&mut units);

        units.clear();
        assert!(units.is_empty());
        assert!(!units.contains(1));

        units.insert(1, [0.0; 3], [0.0; 3], 10.0);
        assert!(units.contains(1));
    }
}
