//! # Free Position Pool
//!
//! Bookkeeping for interior cells that have not received a static placement yet.

use crate::{Position, ScavengerError, ScavengerResult};
use rand::Rng;

/// Interior cells still free for placement during one generation pass.
///
/// The pool is rebuilt at the start of every level and drained as tiles are
/// placed. Whatever remains afterwards simply stays empty floor.
#[derive(Debug, Clone, Default)]
pub struct GridPositionPool {
    positions: Vec<Position>,
}

impl GridPositionPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the pool and refills it with every interior cell of a
    /// `width` × `height` board.
    ///
    /// # Examples
    ///
    /// ```
    /// use scavenger::GridPositionPool;
    ///
    /// let mut pool = GridPositionPool::new();
    /// pool.initialize(5, 5);
    /// assert_eq!(pool.len(), 9);
    /// ```
    pub fn initialize(&mut self, width: u32, height: u32) {
        self.positions.clear();

        let width = width as i32;
        let height = height as i32;
        for x in 1..width - 1 {
            for y in 1..height - 1 {
                self.positions.push(Position::new(x, y));
            }
        }
    }

    /// Removes and returns a uniformly chosen free cell.
    pub fn take_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> ScavengerResult<Position> {
        if self.positions.is_empty() {
            return Err(ScavengerError::PoolExhausted);
        }
        let index = rng.gen_range(0..self.positions.len());
        Ok(self.positions.remove(index))
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn contains(&self, position: Position) -> bool {
        self.positions.contains(&position)
    }

    /// Remaining free cells in pool order.
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_initialize_covers_interior_only() {
        let mut pool = GridPositionPool::new();
        pool.initialize(8, 8);

        assert_eq!(pool.len(), 36);
        assert!(pool.contains(Position::new(1, 1)));
        assert!(pool.contains(Position::new(6, 6)));
        assert!(!pool.contains(Position::new(0, 3)));
        assert!(!pool.contains(Position::new(7, 7)));
    }

    #[test]
    fn test_initialize_resets_previous_contents() {
        let mut pool = GridPositionPool::new();
        let mut rng = StdRng::seed_from_u64(1);
        pool.initialize(6, 6);
        pool.take_random(&mut rng).unwrap();
        pool.take_random(&mut rng).unwrap();

        pool.initialize(6, 6);
        assert_eq!(pool.len(), 16);
    }

    #[test]
    fn test_tiny_board_has_no_interior() {
        let mut pool = GridPositionPool::new();
        pool.initialize(2, 2);
        assert!(pool.is_empty());

        pool.initialize(0, 0);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_take_from_empty_pool_fails() {
        let mut pool = GridPositionPool::new();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            pool.take_random(&mut rng),
            Err(ScavengerError::PoolExhausted)
        ));
    }

    #[test]
    fn test_draining_pool_yields_every_cell_once() {
        let mut pool = GridPositionPool::new();
        let mut rng = StdRng::seed_from_u64(99);
        pool.initialize(5, 4);
        let expected = pool.len();

        let mut seen = HashSet::new();
        while !pool.is_empty() {
            assert!(seen.insert(pool.take_random(&mut rng).unwrap()));
        }
        assert_eq!(seen.len(), expected);
        assert!(pool.take_random(&mut rng).is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn initialize_yields_distinct_interior_cells(width in 5u32..40, height in 5u32..40) {
            let mut pool = GridPositionPool::new();
            pool.initialize(width, height);

            prop_assert_eq!(pool.len(), ((width - 2) * (height - 2)) as usize);
            let distinct: HashSet<_> = pool.positions().iter().copied().collect();
            prop_assert_eq!(distinct.len(), pool.len());
            for pos in pool.positions() {
                prop_assert!(pos.x >= 1 && pos.x <= width as i32 - 2);
                prop_assert!(pos.y >= 1 && pos.y <= height as i32 - 2);
            }
        }

        #[test]
        fn taking_n_positions_leaves_p_minus_n(seed in any::<u64>(), width in 5u32..20, height in 5u32..20, fraction in 0.0f64..=1.0) {
            let mut pool = GridPositionPool::new();
            pool.initialize(width, height);
            let capacity = pool.len();
            let take = (capacity as f64 * fraction) as usize;

            let mut rng = StdRng::seed_from_u64(seed);
            let mut taken = HashSet::new();
            for _ in 0..take {
                let pos = pool.take_random(&mut rng).unwrap();
                prop_assert!(!pool.contains(pos));
                prop_assert!(taken.insert(pos));
            }
            prop_assert_eq!(pool.len(), capacity - take);
        }
    }
}
