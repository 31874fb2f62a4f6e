//! On-disk layout of a pattern database (little endian):
//! - 4 bytes: magic `CPDB`
//! - u8: format version
//! - u32: number of keys, must equal `CornerCoord::count()`
//! - u8: max build depth
//! - one byte per key, in key order

use super::{MaxDepth, PatternDatabase, IMPOSSIBLE, UNREACHED};
use crate::coord::Coordinate;
use crate::cube333::coordcube::CornerCoord;
use crate::cube333::CubieCube;
use crate::error::DatabaseError;

use log::{info, warn};
use thiserror::Error;

use std::fs::{self, File};
use std::io::{self, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

const MAGIC: &[u8; 4] = b"CPDB";
const VERSION: u8 = 1;
const HEADER_LEN: usize = 10;

/// Why an existing file was not accepted as a database.
#[derive(Debug, PartialEq, Eq, Error)]
enum Rejection {
    #[error("file is too short for a header")]
    NoHeader,
    #[error("bad magic bytes")]
    BadMagic,
    #[error("unsupported format version {0}")]
    Version(u8),
    #[error("built for {found} keys, expected {expected}")]
    KeyCount { found: usize, expected: usize },
    #[error("body holds {found} entries, header promised {expected}")]
    Body { found: usize, expected: usize },
    #[error("built to depth {found}, {requested} was requested")]
    TooShallow { found: u8, requested: u8 },
    #[error("stored depth {0} is out of range")]
    BadDepth(u8),
    #[error("entry {value} at key {key} is not a valid depth")]
    BadEntry { key: usize, value: u8 },
}

pub(super) fn read(path: &Path, min_depth: MaxDepth) -> Result<Option<PatternDatabase>, DatabaseError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("no pattern database at {}", path.display());
            return Ok(None);
        }
        Err(source) => {
            return Err(DatabaseError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    match decode(bytes, min_depth) {
        Ok(db) => {
            info!(
                "loaded pattern database from {} (depth {})",
                path.display(),
                db.max_depth.get()
            );
            Ok(Some(db))
        }
        Err(reason) => {
            warn!("ignoring pattern database at {}: {reason}", path.display());
            Ok(None)
        }
    }
}

fn decode(mut bytes: Vec<u8>, min_depth: MaxDepth) -> Result<PatternDatabase, Rejection> {
    if bytes.len() < HEADER_LEN {
        return Err(Rejection::NoHeader);
    }
    if &bytes[0..4] != MAGIC {
        return Err(Rejection::BadMagic);
    }
    if bytes[4] != VERSION {
        return Err(Rejection::Version(bytes[4]));
    }

    let expected = CornerCoord::count();
    let keys = u32::from_le_bytes([bytes[5], bytes[6], bytes[7], bytes[8]]) as usize;
    if keys != expected {
        return Err(Rejection::KeyCount {
            found: keys,
            expected,
        });
    }

    let max_depth = MaxDepth::new(bytes[9]).map_err(|_| Rejection::BadDepth(bytes[9]))?;
    if max_depth < min_depth {
        return Err(Rejection::TooShallow {
            found: max_depth.get(),
            requested: min_depth.get(),
        });
    }

    bytes.drain(..HEADER_LEN);
    if bytes.len() != keys {
        return Err(Rejection::Body {
            found: bytes.len(),
            expected: keys,
        });
    }

    let solved = CornerCoord::from_puzzle(&CubieCube::SOLVED).repr();
    if bytes[solved] != 0 {
        return Err(Rejection::BadEntry {
            key: solved,
            value: bytes[solved],
        });
    }
    if let Some((key, &value)) = bytes
        .iter()
        .enumerate()
        .find(|&(_, &d)| d > max_depth.get() && d != UNREACHED && d != IMPOSSIBLE)
    {
        return Err(Rejection::BadEntry { key, value });
    }

    Ok(PatternDatabase {
        table: bytes.into_boxed_slice(),
        max_depth,
    })
}

fn header(db: &PatternDatabase) -> [u8; HEADER_LEN] {
    let mut header = [0; HEADER_LEN];
    header[0..4].copy_from_slice(MAGIC);
    header[4] = VERSION;
    header[5..9].copy_from_slice(&(db.table.len() as u32).to_le_bytes());
    header[9] = db.max_depth.get();
    header
}

/// Write to a sibling file first and rename it into place, so a crash mid-write never leaves a
/// truncated database behind.
pub(super) fn write(path: &Path, db: &PatternDatabase) -> Result<(), DatabaseError> {
    let io_err = |source: io::Error| DatabaseError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let tmp = tmp_path(path);
    let written = write_tmp(&tmp, db).and_then(|()| fs::rename(&tmp, path));
    if written.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    written.map_err(io_err)
}

fn write_tmp(tmp: &Path, db: &PatternDatabase) -> io::Result<()> {
    let mut file = BufWriter::new(File::create(tmp)?);
    file.write_all(&header(db))?;
    file.write_all(&db.table)?;
    file.flush()
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube333::pattern_db::temp_path;

    fn depth(d: u8) -> MaxDepth {
        MaxDepth::new(d).unwrap()
    }

    fn encoded(db: &PatternDatabase) -> Vec<u8> {
        let mut bytes = header(db).to_vec();
        bytes.extend_from_slice(&db.table);
        bytes
    }

    #[test]
    fn round_trip_is_bit_identical() {
        let db = PatternDatabase::build(depth(3));
        let path = temp_path("round-trip.pdb");
        write(&path, &db).unwrap();
        assert!(!tmp_path(&path).exists());

        let first = read(&path, depth(3)).unwrap().unwrap();
        let second = read(&path, depth(2)).unwrap().unwrap();
        assert_eq!(first.as_bytes(), db.as_bytes());
        assert_eq!(first.as_bytes(), second.as_bytes());
        assert_eq!(first.max_depth(), depth(3));
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn missing_file_is_absent() {
        let path = temp_path("missing.pdb");
        assert!(read(&path, depth(1)).unwrap().is_none());
    }

    #[test]
    fn directory_is_an_io_error() {
        let dir = temp_path("dir");
        fs::create_dir_all(&dir).unwrap();
        assert!(matches!(
            read(&dir, depth(1)),
            Err(DatabaseError::Io { .. })
        ));
        fs::remove_dir(dir).unwrap();
    }

    #[test]
    fn rejects_bad_files() {
        let db = PatternDatabase::build(depth(2));
        let good = encoded(&db);
        assert!(decode(good.clone(), depth(2)).is_ok());

        assert_eq!(decode(good[..6].to_vec(), depth(2)), Err(Rejection::NoHeader));

        let mut magic = good.clone();
        magic[0] = b'X';
        assert_eq!(decode(magic, depth(2)), Err(Rejection::BadMagic));

        let mut version = good.clone();
        version[4] = 9;
        assert_eq!(decode(version, depth(2)), Err(Rejection::Version(9)));

        let mut keys = good.clone();
        keys[5..9].copy_from_slice(&40320u32.to_le_bytes());
        assert!(matches!(
            decode(keys, depth(2)),
            Err(Rejection::KeyCount { found: 40320, .. })
        ));

        assert_eq!(
            decode(good.clone(), depth(4)),
            Err(Rejection::TooShallow {
                found: 2,
                requested: 4
            })
        );

        let mut truncated = good.clone();
        truncated.pop();
        assert!(matches!(
            decode(truncated, depth(2)),
            Err(Rejection::Body { .. })
        ));

        let mut entry = good.clone();
        entry[HEADER_LEN + 1234] = 9;
        assert_eq!(
            decode(entry, depth(2)),
            Err(Rejection::BadEntry {
                key: 1234,
                value: 9
            })
        );
    }

    #[test]
    fn failed_write_leaves_no_tmp_file() {
        // Renaming a file over a non-empty directory fails after the body is written
        let dir = temp_path("occupied");
        fs::create_dir_all(dir.join("inner")).unwrap();
        let db = PatternDatabase::build(depth(1));
        assert!(matches!(write(&dir, &db), Err(DatabaseError::Io { .. })));
        assert!(!tmp_path(&dir).exists());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn corrupt_file_is_absent() {
        let path = temp_path("corrupt.pdb");
        fs::write(&path, b"definitely not a database").unwrap();
        assert!(read(&path, depth(1)).unwrap().is_none());
        fs::remove_file(path).unwrap();
    }
}
