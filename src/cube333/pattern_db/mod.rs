//! The corner pattern database: for every [`CornerCoord`] the number of moves needed to bring the
//! corners home, ignoring the edges. That count never exceeds the number of moves needed to
//! solve the whole cube, which makes it an admissible heuristic for IDA*.
//!
//! The table is filled by a breadth first search from the solved corners (see
//! [`PatternDatabaseBuilder`]), written to disk once and loaded from there afterwards.

mod builder;
mod file;
pub mod move_tables;

pub use builder::PatternDatabaseBuilder;

use super::coordcube::CornerCoord;
use super::CubieCube;
use crate::coord::Coordinate;
use crate::error::{ConfigError, DatabaseError};

use log::{debug, info};
use rustc_hash::FxHashMap;

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

/// Entry for a key the search did not reach because it stopped at the depth cap.
pub const UNREACHED: u8 = 0xff;

/// Entry for a key the search never reached even though it ran to completion.
pub const IMPOSSIBLE: u8 = 0xfe;

/// How deep the breadth first search that fills the database may go.
///
/// The corner sub-group has diameter 11 in the half turn metric, so any depth of 11 or more gives
/// a complete table. Smaller depths build faster and leave the remaining keys [`UNREACHED`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MaxDepth(u8);

impl MaxDepth {
    /// Largest accepted depth. Anything above would collide with [`IMPOSSIBLE`] and
    /// [`UNREACHED`].
    pub const LIMIT: u8 = 0xfd;

    /// God's number, comfortably past the corner diameter.
    pub const FULL: MaxDepth = MaxDepth(20);

    /// Validate a depth, which must lie in `0..=MaxDepth::LIMIT`.
    pub fn new(depth: u8) -> Result<Self, ConfigError> {
        if depth > Self::LIMIT {
            return Err(ConfigError::MaxDepthOutOfRange {
                given: depth,
                limit: Self::LIMIT,
            });
        }
        Ok(MaxDepth(depth))
    }

    /// The depth as a number.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for MaxDepth {
    fn default() -> Self {
        Self::FULL
    }
}

impl TryFrom<u8> for MaxDepth {
    type Error = ConfigError;

    fn try_from(depth: u8) -> Result<Self, ConfigError> {
        Self::new(depth)
    }
}

/// A dense table of corner distances, one byte per [`CornerCoord`]. Immutable once built.
#[derive(PartialEq, Eq)]
pub struct PatternDatabase {
    table: Box<[u8]>,
    max_depth: MaxDepth,
}

impl std::fmt::Debug for PatternDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternDatabase")
            .field("keys", &self.table.len())
            .field("max_depth", &self.max_depth)
            .finish()
    }
}

static LOADED: OnceLock<Mutex<FxHashMap<PathBuf, Arc<PatternDatabase>>>> = OnceLock::new();

impl PatternDatabase {
    /// Run the breadth first search in memory, without touching the disk.
    pub fn build(max_depth: MaxDepth) -> Self {
        PatternDatabaseBuilder::new(max_depth).build()
    }

    /// Get the database stored at `path`, building and storing it there first if the file is
    /// missing, unreadable as a database, or was built shallower than `max_depth`.
    ///
    /// Databases are cached per path for the lifetime of the process, so only the first call
    /// for a path pays for loading or building.
    pub fn load_or_build(
        path: impl AsRef<Path>,
        max_depth: MaxDepth,
    ) -> Result<Arc<PatternDatabase>, DatabaseError> {
        let path = path.as_ref();
        let mut loaded = LOADED
            .get_or_init(Default::default)
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(db) = loaded.get(path) {
            if db.max_depth >= max_depth {
                debug!("reusing pattern database for {}", path.display());
                return Ok(db.clone());
            }
        }

        let db = match Self::load(path, max_depth)? {
            Some(db) => db,
            None => {
                info!(
                    "building pattern database at {} to depth {}, this only happens once",
                    path.display(),
                    max_depth.get()
                );
                PatternDatabaseBuilder::new(max_depth).build_and_store(path)?
            }
        };

        let db = Arc::new(db);
        loaded.insert(path.to_path_buf(), db.clone());
        Ok(db)
    }

    /// Read a database file. `Ok(None)` means there is no usable database at `path`: the file is
    /// missing, corrupt, has a different layout, or was built shallower than `min_depth`.
    pub fn load(
        path: impl AsRef<Path>,
        min_depth: MaxDepth,
    ) -> Result<Option<PatternDatabase>, DatabaseError> {
        file::read(path.as_ref(), min_depth)
    }

    /// Write the database to `path`, replacing whatever is there.
    pub fn store(&self, path: impl AsRef<Path>) -> Result<(), DatabaseError> {
        file::write(path.as_ref(), self)
    }

    /// Project a cube onto the key that indexes the table.
    pub fn reduce(cube: &CubieCube) -> CornerCoord {
        CornerCoord::from_puzzle(cube)
    }

    /// The raw table entry for a key: a depth, [`UNREACHED`] or [`IMPOSSIBLE`].
    pub fn get(&self, key: CornerCoord) -> u8 {
        self.table[key.repr()]
    }

    /// The raw table entry for a cube.
    pub fn lookup(&self, cube: &CubieCube) -> u8 {
        self.get(Self::reduce(cube))
    }

    /// A lower bound on the number of moves needed to solve `cube`. Keys the capped search never
    /// reached are at least one move deeper than the cap.
    pub fn heuristic(&self, cube: &CubieCube) -> u8 {
        let depth = self.lookup(cube);
        if depth <= self.max_depth.get() {
            depth
        } else {
            self.max_depth.get() + 1
        }
    }

    /// The depth the breadth first search was allowed to reach.
    pub fn max_depth(&self) -> MaxDepth {
        self.max_depth
    }

    /// Whether every key has its exact distance.
    pub fn is_complete(&self) -> bool {
        !self.table.contains(&UNREACHED)
    }

    /// Number of keys in the table.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Always false, a database covers the whole corner key space.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// The table in key order, as stored on disk after the header.
    pub fn as_bytes(&self) -> &[u8] {
        &self.table
    }

    /// How many keys hold each entry value, for every value that occurs.
    pub fn depth_histogram(&self) -> Vec<(u8, usize)> {
        let mut counts = [0usize; 256];
        for &d in self.table.iter() {
            counts[d as usize] += 1;
        }
        (0..=u8::MAX)
            .zip(counts)
            .filter(|&(_, n)| n > 0)
            .collect()
    }
}

#[cfg(test)]
pub(crate) fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "cube-solver-{}-{}-{name}",
        std::process::id(),
        fastrand::u64(..)
    ))
}

/// A small database shared by the tests of every module, built once per test binary.
#[cfg(test)]
pub(crate) fn shallow_test_db() -> &'static PatternDatabase {
    static DB: OnceLock<PatternDatabase> = OnceLock::new();
    DB.get_or_init(|| PatternDatabase::build(MaxDepth(6)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube333::moves::{Htm, Move333, Move333Type, MoveGenerator};
    use crate::moves::MoveSequence;
    use crate::mv;

    use proptest::collection::vec;
    use proptest::prelude::*;

    #[test]
    fn max_depth_range() {
        assert_eq!(MaxDepth::new(0).unwrap().get(), 0);
        assert_eq!(MaxDepth::new(MaxDepth::LIMIT).unwrap().get(), 0xfd);
        assert_eq!(
            MaxDepth::new(0xfe),
            Err(ConfigError::MaxDepthOutOfRange {
                given: 0xfe,
                limit: 0xfd
            })
        );
        assert!(MaxDepth::try_from(0xff).is_err());
        assert_eq!(MaxDepth::default(), MaxDepth::FULL);
    }

    #[test]
    fn lookup_near_solved() {
        let db = shallow_test_db();
        assert_eq!(db.lookup(&CubieCube::SOLVED), 0);
        assert_eq!(db.heuristic(&CubieCube::SOLVED), 0);
        for &m in Htm::MOVE_LIST {
            assert_eq!(db.lookup(&CubieCube::SOLVED.make_move(m)), 1);
        }
        let sexy = CubieCube::SOLVED.make_moves("R U R' U'".parse().unwrap());
        assert!(db.lookup(&sexy) <= 4);
        assert!(db.lookup(&sexy) >= 1);
    }

    #[test]
    fn heuristic_clamps_unreached() {
        let db = shallow_test_db();
        assert!(!db.is_complete());
        // A corner twist in place is far from solved.
        let mut twisted = CubieCube::SOLVED;
        twisted.co[0] = crate::cube333::CornerTwist::Clockwise;
        twisted.co[1] = crate::cube333::CornerTwist::AntiClockwise;
        let raw = db.lookup(&twisted);
        let h = db.heuristic(&twisted);
        assert!(h <= 7);
        if raw == UNREACHED {
            assert_eq!(h, 7);
        }
    }

    #[test]
    fn histogram_sums_to_key_count() {
        let db = shallow_test_db();
        let total: usize = db.depth_histogram().iter().map(|&(_, n)| n).sum();
        assert_eq!(total, CornerCoord::count());
        assert_eq!(db.len(), CornerCoord::count());
        assert!(!db.is_empty());
        assert_eq!(db.depth_histogram()[0], (0, 1));
    }

    #[test]
    fn load_or_build_caches_per_path() {
        let path = temp_path("cache.pdb");
        let depth = MaxDepth::new(3).unwrap();
        let a = PatternDatabase::load_or_build(&path, depth).unwrap();
        assert!(path.exists());
        let b = PatternDatabase::load_or_build(&path, depth).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        // A shallower request is served by the deeper table
        let c = PatternDatabase::load_or_build(&path, MaxDepth::new(1).unwrap()).unwrap();
        assert!(Arc::ptr_eq(&a, &c));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn load_or_build_replaces_corrupt_file() {
        let path = temp_path("garbage.pdb");
        std::fs::write(&path, b"CPDB but not really").unwrap();
        let depth = MaxDepth::new(2).unwrap();

        let db = PatternDatabase::load_or_build(&path, depth).unwrap();
        let stored = std::fs::read(&path).unwrap();
        assert_eq!(&stored[..4], b"CPDB");
        assert_eq!(stored.len(), 10 + CornerCoord::count());
        let reloaded = PatternDatabase::load(&path, depth).unwrap().unwrap();
        assert_eq!(reloaded.as_bytes(), db.as_bytes());
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn load_or_build_deepens_shallow_file() {
        let path = temp_path("shallow.pdb");
        PatternDatabase::build(MaxDepth::new(1).unwrap())
            .store(&path)
            .unwrap();
        let depth = MaxDepth::new(3).unwrap();
        assert!(PatternDatabase::load(&path, depth).unwrap().is_none());

        let db = PatternDatabase::load_or_build(&path, depth).unwrap();
        assert_eq!(db.max_depth(), depth);
        let reloaded = PatternDatabase::load(&path, depth).unwrap().unwrap();
        assert_eq!(reloaded.max_depth(), depth);
        assert_eq!(reloaded.as_bytes(), db.as_bytes());
        let _ = std::fs::remove_file(path);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn neighbours_differ_by_at_most_one(mvs in vec(any::<Move333>(), 0..6).prop_map(MoveSequence)) {
            let db = shallow_test_db();
            let cube = CubieCube::SOLVED.make_moves(mvs.clone());
            let d = db.lookup(&cube);
            prop_assert!(d as usize <= mvs.len());
            for &m in Htm::MOVE_LIST {
                let n = db.lookup(&cube.clone().make_move(m));
                if n != UNREACHED {
                    prop_assert!(d.abs_diff(n) <= 1);
                }
            }
        }

        #[test]
        fn heuristic_is_admissible(mvs in vec(any::<Move333>(), 0..12).prop_map(MoveSequence)) {
            let db = shallow_test_db();
            let cube = CubieCube::SOLVED.make_moves(mvs.clone());
            prop_assert!(db.heuristic(&cube) as usize <= mvs.len());
        }
    }

    #[test]
    fn reduce_matches_coordinate() {
        let cube = CubieCube::SOLVED.make_move(mv!(L, 2));
        assert_eq!(PatternDatabase::reduce(&cube), CornerCoord::from_puzzle(&cube));
    }
}
