//! The animated grid: assigns each keyed item a cell and owns the per-key
//! animation state that carries tiles smoothly between cells.
//!
//! Each call to [`AnimatedGrid::update`] recomputes targets from the item
//! order and geometry.  Keys already in the registry keep their
//! [`AnimatedOffset`] (and whatever tween it is running) and are retargeted.
//! New keys appear directly at their cell, or glide in from a position
//! registered with [`AnimatedGrid::seed`].  Keys that disappeared are
//! evicted.  Items past the last cell and repeated keys are hidden.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::time::Instant;

use super::easing::AnimationSpec;
use super::geometry::{CellSize, GridGeometry, Offset};
use super::tween::AnimatedOffset;

/// What an [`AnimatedGrid::update`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateOutcome {
    /// `false` when keys and geometry matched the previous call.
    pub changed: bool,
    /// Keys seen for the first time (placed without animation).
    pub created: usize,
    /// Existing keys whose target cell moved (a tween was started).
    pub retargeted: usize,
    /// Keys dropped because they are no longer placed.
    pub evicted: usize,
    /// Items without a cell: overflow past `columns * rows`, or repeated keys.
    pub hidden: usize,
}

/// One placed tile, as read by a renderer for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement<'a, K> {
    /// Index of the item in the last `update` input.
    pub index: usize,
    pub key: &'a K,
    /// Displayed (possibly mid-tween) top-left.
    pub offset: Offset,
    pub size: CellSize,
}

/// Keyed grid layout with per-item position tweens.
#[derive(Debug, Clone)]
pub struct AnimatedGrid<K> {
    registry: HashMap<K, AnimatedOffset>,
    spec: AnimationSpec,
    geometry: Option<GridGeometry>,
    /// Full input key sequence of the last update, for no-op detection.
    keys: Vec<K>,
    /// `(item index, key)` of every placed item, in item order.
    placed: Vec<(usize, K)>,
    /// Starting positions for keys not yet placed; consumed by `update`.
    seeds: HashMap<K, Offset>,
}

impl<K: Eq + Hash + Clone> AnimatedGrid<K> {
    pub fn new(spec: AnimationSpec) -> Self {
        Self {
            registry: HashMap::new(),
            spec,
            geometry: None,
            keys: Vec::new(),
            placed: Vec::new(),
            seeds: HashMap::new(),
        }
    }

    pub fn animation_spec(&self) -> AnimationSpec {
        self.spec
    }

    /// Applies to tweens started after this call; running tweens keep theirs.
    pub fn set_animation_spec(&mut self, spec: AnimationSpec) {
        self.spec = spec;
    }

    pub fn cell_size(&self) -> Option<CellSize> {
        self.geometry.map(|g| g.cell_size())
    }

    /// Number of keys in the registry.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    #[cfg(test)]
    pub fn contains(&self, key: &K) -> bool {
        self.registry.contains_key(key)
    }

    /// Register a starting position for a key that is about to appear, so
    /// the next changing `update` animates it in from there instead of
    /// placing it.  Ignored for keys already present; dropped if that
    /// update does not place the key.
    #[cfg(test)]
    pub fn seed(&mut self, key: K, offset: Offset) {
        if !self.registry.contains_key(&key) {
            self.seeds.insert(key, offset);
        }
    }

    /// Recompute every item's target cell and start the tweens.
    pub fn update<T>(
        &mut self,
        items: &[T],
        key_of: impl Fn(&T) -> K,
        geometry: GridGeometry,
        now: Instant,
    ) -> UpdateOutcome {
        let keys: Vec<K> = items.iter().map(key_of).collect();
        if self.geometry == Some(geometry) && self.keys == keys {
            return UpdateOutcome::default();
        }

        let targets = geometry.cell_offsets();
        let mut outcome = UpdateOutcome {
            changed: true,
            ..UpdateOutcome::default()
        };
        let mut seen: HashSet<&K> = HashSet::with_capacity(keys.len());
        let mut placed = Vec::with_capacity(keys.len().min(targets.len()));

        for (index, key) in keys.iter().enumerate() {
            let Some(&target) = targets.get(index) else {
                outcome.hidden += 1;
                continue;
            };
            if !seen.insert(key) {
                tracing::warn!(index, "duplicate grid key, hiding repeated item");
                outcome.hidden += 1;
                continue;
            }
            match self.registry.entry(key.clone()) {
                Entry::Occupied(mut entry) => {
                    if entry.get_mut().animate_to(target, self.spec, now) {
                        outcome.retargeted += 1;
                    }
                }
                Entry::Vacant(entry) => {
                    let offset = match self.seeds.remove(key) {
                        Some(from) => {
                            let mut offset = AnimatedOffset::at(from);
                            offset.animate_to(target, self.spec, now);
                            offset
                        }
                        None => AnimatedOffset::at(target),
                    };
                    entry.insert(offset);
                    outcome.created += 1;
                }
            }
            placed.push((index, key.clone()));
        }

        let before = self.registry.len();
        self.registry.retain(|k, _| seen.contains(k));
        outcome.evicted = before - self.registry.len();
        self.seeds.clear();

        tracing::debug!(
            columns = geometry.columns(),
            rows = geometry.rows(),
            created = outcome.created,
            retargeted = outcome.retargeted,
            evicted = outcome.evicted,
            hidden = outcome.hidden,
            "grid relayout"
        );

        self.placed = placed;
        self.geometry = Some(geometry);
        self.keys = keys;
        outcome
    }

    /// Advance every tween to `now`.  Returns `true` while any tile moves.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut moving = false;
        for offset in self.registry.values_mut() {
            moving |= offset.tick(now);
        }
        moving
    }

    pub fn is_animating(&self) -> bool {
        self.registry.values().any(AnimatedOffset::is_animating)
    }

    /// Number of tiles with a running tween.
    pub fn moving(&self) -> usize {
        self.registry.values().filter(|o| o.is_animating()).count()
    }

    /// Time progress in `[0, 1]` of the tween furthest from finishing, or
    /// `None` when nothing moves.
    pub fn progress(&self, now: Instant) -> Option<f32> {
        self.registry
            .values()
            .filter_map(|o| o.progress(now))
            .reduce(f32::min)
    }

    /// Displayed offset of `key` at `now`.
    #[cfg(test)]
    pub fn offset_of(&self, key: &K, now: Instant) -> Option<Offset> {
        self.registry.get(key).map(|o| o.value_at(now))
    }

    /// Cell the key is heading to (or resting in).
    #[cfg(test)]
    pub fn target_of(&self, key: &K) -> Option<Offset> {
        self.registry.get(key).map(AnimatedOffset::target)
    }

    /// Every placed tile with its displayed offset at `now`, in item order.
    pub fn placements(&self, now: Instant) -> Vec<Placement<'_, K>> {
        let Some(size) = self.cell_size() else {
            return Vec::new();
        };
        self.placed
            .iter()
            .filter_map(|(index, key)| {
                let offset = self.registry.get(key)?.value_at(now);
                Some(Placement {
                    index: *index,
                    key,
                    offset,
                    size,
                })
            })
            .collect()
    }
}

impl<K: Eq + Hash + Clone> Default for AnimatedGrid<K> {
    fn default() -> Self {
        Self::new(AnimationSpec::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::easing::Easing;
    use crate::core::geometry::Bounds;
    use std::time::Duration;

    const SECOND: Duration = Duration::from_millis(1000);

    fn geometry(columns: usize, rows: usize) -> GridGeometry {
        GridGeometry::new(columns, rows, Bounds::new(400.0, 400.0)).unwrap()
    }

    fn linear_grid() -> AnimatedGrid<u32> {
        AnimatedGrid::new(AnimationSpec::tween(SECOND, Easing::Linear))
    }

    fn ids(n: u32) -> Vec<u32> {
        (1..=n).collect()
    }

    #[test]
    fn first_update_places_without_animation() {
        let mut grid = linear_grid();
        let t0 = Instant::now();
        let outcome = grid.update(&ids(16), |k| *k, geometry(4, 4), t0);
        assert_eq!(outcome.created, 16);
        assert_eq!(outcome.retargeted, 0);
        assert!(!grid.is_animating());
        // Item at index 5 has key 6.
        assert_eq!(grid.offset_of(&6, t0), Some(Offset::new(100.0, 100.0)));
        assert_eq!(grid.cell_size(), Some(CellSize { width: 100.0, height: 100.0 }));
    }

    #[test]
    fn identical_update_is_noop() {
        let mut grid = linear_grid();
        let t0 = Instant::now();
        grid.update(&ids(16), |k| *k, geometry(4, 4), t0);
        grid.update(&[2, 1, 3, 4], |k| *k, geometry(4, 4), t0);
        grid.update(&ids(16), |k| *k, geometry(4, 4), t0);
        let before = grid.clone();

        let later = t0 + Duration::from_millis(400);
        let outcome = grid.update(&ids(16), |k| *k, geometry(4, 4), later);
        assert!(!outcome.changed);
        assert_eq!(outcome.retargeted, 0);
        for key in ids(16) {
            assert_eq!(grid.target_of(&key), before.target_of(&key));
            assert_eq!(grid.offset_of(&key, later), before.offset_of(&key, later));
        }
    }

    #[test]
    fn shuffle_keeps_keys_and_animates_from_prior_cells() {
        let mut grid = linear_grid();
        let t0 = Instant::now();
        let items = ids(16);
        grid.update(&items, |k| *k, geometry(4, 4), t0);
        let before: Vec<Offset> = items.iter().map(|k| grid.target_of(k).unwrap()).collect();

        let mut shuffled = items.clone();
        shuffled.reverse();
        let outcome = grid.update(&shuffled, |k| *k, geometry(4, 4), t0);
        assert_eq!(outcome.created, 0);
        assert_eq!(outcome.evicted, 0);
        assert_eq!(outcome.retargeted, 16);
        assert_eq!(grid.len(), 16);

        let g = geometry(4, 4);
        for (index, key) in shuffled.iter().enumerate() {
            assert_eq!(grid.target_of(key), g.cell_offset(index));
            // Still displayed at the old cell when the tween starts.
            assert_eq!(grid.offset_of(key, t0), Some(before[(*key - 1) as usize]));
        }

        assert!(grid.tick(t0 + SECOND / 2));
        assert!(!grid.tick(t0 + SECOND));
        for (index, key) in shuffled.iter().enumerate() {
            assert_eq!(grid.offset_of(key, t0 + SECOND), g.cell_offset(index));
        }
    }

    #[test]
    fn reorder_preserves_in_flight_state() {
        let mut grid = linear_grid();
        let t0 = Instant::now();
        grid.update(&[1, 2], |k| *k, geometry(2, 1), t0);
        grid.update(&[2, 1], |k| *k, geometry(2, 1), t0);

        // Halfway through the swap, swap back: tiles turn around mid-cell.
        let mid = t0 + SECOND / 2;
        grid.tick(mid);
        let displayed = grid.offset_of(&1, mid).unwrap();
        assert!((displayed.x - 100.0).abs() < 1e-3);

        grid.update(&[1, 2], |k| *k, geometry(2, 1), mid);
        assert_eq!(grid.offset_of(&1, mid), Some(displayed));
        assert_eq!(grid.target_of(&1), Some(Offset::default()));
        assert!(grid.is_animating());
    }

    #[test]
    fn new_keys_appear_in_place_and_stale_keys_are_evicted() {
        let mut grid = linear_grid();
        let t0 = Instant::now();
        grid.update(&[1, 2, 3], |k| *k, geometry(2, 2), t0);
        let outcome = grid.update(&[3, 4], |k| *k, geometry(2, 2), t0);
        assert_eq!(outcome.created, 1);
        assert_eq!(outcome.evicted, 2);
        assert!(!grid.contains(&1));
        assert!(!grid.contains(&2));
        assert_eq!(grid.len(), 2);
        assert_eq!(grid.offset_of(&4, t0), Some(Offset::new(200.0, 0.0)));
        assert_eq!(grid.target_of(&4), Some(Offset::new(200.0, 0.0)));
    }

    #[test]
    fn widening_grid_shrinks_cells_and_moves_every_item() {
        let mut grid = linear_grid();
        let t0 = Instant::now();
        let items = ids(6);
        grid.update(&items, |k| *k, geometry(3, 2), t0);
        let outcome = grid.update(&items, |k| *k, geometry(6, 2), t0);
        let cell = grid.cell_size().unwrap();
        assert!((cell.width - 400.0 / 6.0).abs() < 1e-4);
        assert_eq!(cell.height, 200.0);
        // Item 1 stays at the origin; every other item moves.
        assert_eq!(outcome.retargeted, 5);
        assert_eq!(grid.target_of(&4), Some(Offset::new(cell.width * 3.0, 0.0)));
    }

    #[test]
    fn overflow_and_duplicates_are_hidden() {
        let mut grid = linear_grid();
        let t0 = Instant::now();
        let outcome = grid.update(&[1, 1, 2, 3, 4, 5], |k| *k, geometry(2, 2), t0);
        assert_eq!(outcome.hidden, 3);
        // Repeating the call changes nothing and reports nothing.
        let again = grid.update(&[1, 1, 2, 3, 4, 5], |k| *k, geometry(2, 2), t0);
        assert_eq!(again, UpdateOutcome::default());
        assert_eq!(grid.len(), 3);
        let placed: Vec<(usize, u32)> = grid
            .placements(t0)
            .iter()
            .map(|p| (p.index, *p.key))
            .collect();
        assert_eq!(placed, vec![(0, 1), (2, 2), (3, 3)]);
        assert!(!grid.contains(&5));
    }

    #[test]
    fn seeded_key_animates_in() {
        let mut grid = linear_grid();
        let t0 = Instant::now();
        grid.seed(7, Offset::new(-100.0, 0.0));
        let outcome = grid.update(&[7], |k| *k, geometry(1, 1), t0);
        assert_eq!(outcome.created, 1);
        assert_eq!(grid.offset_of(&7, t0), Some(Offset::new(-100.0, 0.0)));
        assert_eq!(grid.target_of(&7), Some(Offset::default()));
        assert!(grid.is_animating());
    }

    #[test]
    fn seed_never_enters_the_registry_on_its_own() {
        let mut grid = linear_grid();
        let t0 = Instant::now();
        grid.update(&[1, 2], |k| *k, geometry(2, 1), t0);
        grid.seed(99, Offset::new(-50.0, 0.0));

        let outcome = grid.update(&[1, 2], |k| *k, geometry(2, 1), t0);
        assert!(!outcome.changed);
        assert_eq!(grid.len(), 2);
        assert!(!grid.contains(&99));

        // Still pending for the next changing update.
        grid.update(&[1, 2, 99], |k| *k, geometry(3, 1), t0);
        assert_eq!(grid.offset_of(&99, t0), Some(Offset::new(-50.0, 0.0)));

        // A seed the next update does not place is dropped.
        grid.seed(42, Offset::default());
        grid.update(&[1, 2], |k| *k, geometry(3, 1), t0);
        grid.update(&[1, 2, 42], |k| *k, geometry(3, 1), t0);
        assert_eq!(grid.offset_of(&42, t0), geometry(3, 1).cell_offset(2));
        assert_eq!(grid.target_of(&42), grid.offset_of(&42, t0));
    }

    #[test]
    fn progress_follows_the_latest_tween() {
        let mut grid = linear_grid();
        let t0 = Instant::now();
        grid.update(&[1, 2, 3], |k| *k, geometry(3, 1), t0);
        assert_eq!(grid.progress(t0), None);

        grid.update(&[2, 1, 3], |k| *k, geometry(3, 1), t0);
        let quarter = t0 + SECOND / 4;
        grid.update(&[3, 1, 2], |k| *k, geometry(3, 1), quarter);
        assert_eq!(grid.moving(), 3);
        // Tiles 2 and 3 restarted a quarter in; tile 1 kept its tween.
        let p = grid.progress(t0 + SECOND / 2).unwrap();
        assert!((p - 0.25).abs() < 1e-3);

        grid.tick(quarter + SECOND);
        assert_eq!(grid.moving(), 0);
        assert_eq!(grid.progress(quarter + SECOND), None);
    }

    #[test]
    fn spec_change_applies_to_next_retarget() {
        let mut grid = linear_grid();
        let t0 = Instant::now();
        grid.update(&[1, 2], |k| *k, geometry(2, 1), t0);
        grid.set_animation_spec(AnimationSpec::tween(Duration::ZERO, Easing::Linear));
        grid.update(&[2, 1], |k| *k, geometry(2, 1), t0);
        assert!(!grid.tick(t0));
        assert_eq!(grid.offset_of(&2, t0), Some(Offset::default()));
    }

    #[test]
    fn placements_carry_cell_size() {
        let mut grid = linear_grid();
        let t0 = Instant::now();
        assert!(grid.placements(t0).is_empty());
        grid.update(&ids(4), |k| *k, geometry(2, 2), t0);
        let placements = grid.placements(t0);
        assert_eq!(placements.len(), 4);
        assert!(placements
            .iter()
            .all(|p| p.size == CellSize { width: 200.0, height: 200.0 }));
        assert_eq!(placements[3].offset, Offset::new(200.0, 200.0));
    }
}
