use super::move_tables::MoveTable;
use super::{MaxDepth, PatternDatabase, IMPOSSIBLE, UNREACHED};
use crate::coord::Coordinate;
use crate::cube333::coordcube::{COCoord, CPCoord, CornerCoord};
use crate::cube333::moves::{Htm, MoveGenerator};
use crate::cube333::CubieCube;
use crate::error::DatabaseError;

use log::{debug, info, warn};

use std::path::Path;
use std::time::Instant;

/// Fills a [`PatternDatabase`] by breadth first search over corner keys, starting from solved.
///
/// The search goes layer by layer. Every key in layer `d` is expanded with all 18 moves and
/// every key seen for the first time is given depth `d + 1`, which is its exact distance since
/// all shallower layers are already complete. The search stops when a layer comes out empty or
/// when `max_depth` is reached.
pub struct PatternDatabaseBuilder {
    max_depth: MaxDepth,
}

impl PatternDatabaseBuilder {
    /// A builder that will stop after assigning depth `max_depth`.
    pub fn new(max_depth: MaxDepth) -> Self {
        Self { max_depth }
    }

    /// Run the search.
    pub fn build(self) -> PatternDatabase {
        let start = Instant::now();
        let cp_table = MoveTable::<CPCoord>::generate();
        let co_table = MoveTable::<COCoord>::generate();
        debug!(
            "generated corner move tables in {:.3}s",
            start.elapsed().as_secs_f64()
        );

        let mut table = vec![UNREACHED; CornerCoord::count()].into_boxed_slice();
        let solved = CornerCoord::from_puzzle(&CubieCube::SOLVED);
        table[solved.repr()] = 0;

        let mut frontier = vec![solved];
        let mut reached = 1;
        let mut depth = 0;

        while !frontier.is_empty() && depth < self.max_depth.get() {
            let layer_start = Instant::now();
            let mut next = vec![];

            for &key in &frontier {
                let (cp, co) = (key.cp(), key.co());
                for &m in Htm::MOVE_LIST {
                    let key2 =
                        CornerCoord::from_parts(cp_table.make_move(cp, m), co_table.make_move(co, m));
                    let entry = &mut table[key2.repr()];
                    if *entry == UNREACHED {
                        *entry = depth + 1;
                        next.push(key2);
                    }
                }
            }

            depth += 1;
            reached += next.len();
            debug!(
                "depth {depth}: {} new keys, {reached} reached in total ({:.3}s)",
                next.len(),
                layer_start.elapsed().as_secs_f64()
            );
            frontier = next;
        }

        if frontier.is_empty() && reached < table.len() {
            warn!(
                "{} corner keys are unreachable from solved",
                table.len() - reached
            );
            for entry in table.iter_mut().filter(|e| **e == UNREACHED) {
                *entry = IMPOSSIBLE;
            }
        }

        info!(
            "pattern database built to depth {depth} with {reached} of {} keys in {:.3}s",
            table.len(),
            start.elapsed().as_secs_f64()
        );

        PatternDatabase {
            table,
            max_depth: self.max_depth,
        }
    }

    /// Run the search and write the result to `path` before returning it.
    pub fn build_and_store(self, path: &Path) -> Result<PatternDatabase, DatabaseError> {
        let db = self.build();
        db.store(path)?;
        info!("pattern database written to {}", path.display());
        Ok(db)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::FromCoordinate;
    use crate::cube333::pattern_db::shallow_test_db;

    // Number of corner states at each distance from solved in the half turn metric.
    const CORNER_LAYERS: [usize; 12] = [
        1, 18, 243, 2874, 28000, 205416, 1168516, 5402628, 20776176, 45391616, 15139616, 64736,
    ];

    #[test_log::test]
    fn depth_five_layers() {
        let db = PatternDatabase::build(MaxDepth::new(5).unwrap());
        let histogram = db.depth_histogram();
        let reached: usize = CORNER_LAYERS[..=5].iter().sum();
        let mut expected: Vec<(u8, usize)> =
            (0..=5).map(|d| (d as u8, CORNER_LAYERS[d])).collect();
        expected.push((UNREACHED, CornerCoord::count() - reached));
        assert_eq!(histogram, expected);
        assert_eq!(db.get(CornerCoord::from_repr(0)), 0);
        assert!(!db.is_complete());
    }

    #[test]
    fn zero_depth_only_knows_solved() {
        let db = PatternDatabase::build(MaxDepth::new(0).unwrap());
        assert_eq!(
            db.depth_histogram(),
            vec![(0, 1), (UNREACHED, CornerCoord::count() - 1)]
        );
    }

    #[test]
    fn layers_are_minimal() {
        // Every key at depth d has a neighbour at depth d - 1 and none shallower.
        let db = shallow_test_db();
        let cp_table = MoveTable::<CPCoord>::generate();
        let co_table = MoveTable::<COCoord>::generate();
        let mut rng = fastrand::Rng::with_seed(11);
        let mut checked = 0;
        while checked < 2000 {
            let key = CornerCoord::from_repr(rng.usize(..CornerCoord::count()));
            let d = db.get(key);
            if d == 0 || d == UNREACHED {
                continue;
            }
            let neighbours: Vec<u8> = Htm::MOVE_LIST
                .iter()
                .map(|&m| {
                    db.get(CornerCoord::from_parts(
                        cp_table.make_move(key.cp(), m),
                        co_table.make_move(key.co(), m),
                    ))
                })
                .collect();
            assert!(neighbours.contains(&(d - 1)));
            assert!(neighbours.iter().all(|&n| n == UNREACHED || n + 1 >= d));

            // The key is realised by a real cube at the same distance
            let mut cube = CubieCube::SOLVED;
            cube.set_coord(key);
            assert_eq!(db.lookup(&cube), d);
            checked += 1;
        }
    }
}
