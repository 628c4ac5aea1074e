//! Sort modes and the natural filename ordering.
//!
//! Every mode maps to one comparator in [`COMPARATORS`]; picking a mode is a
//! single table lookup. All sorts are stable, so ties keep discovery order.

use crate::core::error::ParseSortModeError;
use crate::selection::scan::FileCandidate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Ordering applied to the candidate list before indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortMode {
    /// Natural alphanumeric order on the bare file name.
    #[default]
    #[serde(rename = "Filename")]
    Filename = 0,
    /// Modification time, newest first.
    #[serde(rename = "Date (Newest First)")]
    NewestFirst = 1,
    /// Modification time, oldest first.
    #[serde(rename = "Date (Oldest First)")]
    OldestFirst = 2,
    /// Size in bytes, smallest first.
    #[serde(rename = "FileSize")]
    FileSize = 3,
}

/// Comparator over scanned candidates.
pub type Comparator = fn(&FileCandidate, &FileCandidate) -> Ordering;

/// One comparator per [`SortMode`], indexed by discriminant.
pub const COMPARATORS: [Comparator; 4] = [by_file_name, by_newest_first, by_oldest_first, by_size];

impl SortMode {
    /// All modes, in the order the host lists them.
    pub fn all() -> &'static [SortMode] {
        &[
            SortMode::Filename,
            SortMode::NewestFirst,
            SortMode::OldestFirst,
            SortMode::FileSize,
        ]
    }

    /// Label shown by the host.
    pub fn label(self) -> &'static str {
        match self {
            SortMode::Filename => "Filename",
            SortMode::NewestFirst => "Date (Newest First)",
            SortMode::OldestFirst => "Date (Oldest First)",
            SortMode::FileSize => "FileSize",
        }
    }

    /// Labels of every mode, in host order.
    pub fn labels() -> Vec<String> {
        Self::all().iter().map(|m| m.label().to_string()).collect()
    }

    /// Comparator for this mode.
    pub fn comparator(self) -> Comparator {
        COMPARATORS[self as usize]
    }

    /// Stable in-place sort of `candidates`.
    pub fn sort(self, candidates: &mut [FileCandidate]) {
        candidates.sort_by(self.comparator());
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SortMode {
    type Err = ParseSortModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortMode::all()
            .iter()
            .copied()
            .find(|mode| mode.label() == s)
            .ok_or_else(|| ParseSortModeError(s.to_string()))
    }
}

fn by_file_name(a: &FileCandidate, b: &FileCandidate) -> Ordering {
    natural_cmp(&a.file_name, &b.file_name)
}

fn by_newest_first(a: &FileCandidate, b: &FileCandidate) -> Ordering {
    b.modified.cmp(&a.modified)
}

fn by_oldest_first(a: &FileCandidate, b: &FileCandidate) -> Ordering {
    a.modified.cmp(&b.modified)
}

fn by_size(a: &FileCandidate, b: &FileCandidate) -> Ordering {
    a.size.cmp(&b.size)
}

// ============================================================================
// Natural ordering
// ============================================================================

/// One run of a split file name.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Chunk {
    /// Lowercased non-digit run.
    Text(String),
    /// Digit run with leading zeros removed.
    Number(String),
}

impl Ord for Chunk {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Chunk::Text(a), Chunk::Text(b)) => a.cmp(b),
            (Chunk::Number(a), Chunk::Number(b)) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
            (Chunk::Number(_), Chunk::Text(_)) => Ordering::Less,
            (Chunk::Text(_), Chunk::Number(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for Chunk {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Sort key for natural ordering.
///
/// The key alternates text and number chunks and always starts and ends with
/// a (possibly empty) text chunk, so chunks at the same position share a kind.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct NaturalKey(Vec<Chunk>);

/// Build the natural sort key of `name`.
pub fn natural_key(name: &str) -> NaturalKey {
    let mut chunks = Vec::new();
    let mut text = String::new();
    let mut chars = name.chars().peekable();

    while let Some(c) = chars.next() {
        if c.is_ascii_digit() {
            let mut digits = String::from(c);
            while let Some(&d) = chars.peek() {
                if !d.is_ascii_digit() {
                    break;
                }
                digits.push(d);
                chars.next();
            }
            chunks.push(Chunk::Text(std::mem::take(&mut text).to_lowercase()));
            chunks.push(Chunk::Number(digits.trim_start_matches('0').to_string()));
        } else {
            text.push(c);
        }
    }
    chunks.push(Chunk::Text(text.to_lowercase()));

    NaturalKey(chunks)
}

/// Compare two file names in natural order: `file2.jpg < file10.jpg`.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    natural_key(a).cmp(&natural_key(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::path::PathBuf;
    use std::time::{Duration, SystemTime};

    fn candidate(name: &str, age_secs: u64, size: u64) -> FileCandidate {
        FileCandidate {
            path: PathBuf::from("/images").join(name),
            file_name: name.to_string(),
            modified: SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000 - age_secs),
            size,
        }
    }

    fn names(candidates: &[FileCandidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.file_name.as_str()).collect()
    }

    #[test]
    fn test_natural_sort_numbers() {
        let mut files = vec![
            candidate("file2.jpg", 0, 0),
            candidate("file10.jpg", 0, 0),
            candidate("file1.jpg", 0, 0),
        ];
        SortMode::Filename.sort(&mut files);
        assert_eq!(names(&files), vec!["file1.jpg", "file2.jpg", "file10.jpg"]);
    }

    #[test]
    fn test_natural_cmp_case_insensitive_text() {
        assert_eq!(natural_cmp("Apple.png", "banana.png"), Ordering::Less);
        assert_eq!(natural_cmp("IMG.png", "img.png"), Ordering::Equal);
        assert_eq!(natural_cmp("img007.png", "img7.png"), Ordering::Equal);
        assert_eq!(natural_cmp("img", "img1"), Ordering::Less);
        assert_eq!(natural_cmp("10.png", "9.png"), Ordering::Greater);
        assert_eq!(natural_cmp("a1b2", "a1b10"), Ordering::Less);
    }

    #[test]
    fn test_natural_cmp_long_digit_runs() {
        let big = "shot99999999999999999999999.png";
        let bigger = "shot100000000000000000000000.png";
        assert_eq!(natural_cmp(big, bigger), Ordering::Less);
    }

    #[test]
    fn test_date_sorts() {
        let mut files = vec![
            candidate("mid.png", 50, 0),
            candidate("old.png", 100, 0),
            candidate("new.png", 1, 0),
        ];
        SortMode::NewestFirst.sort(&mut files);
        assert_eq!(names(&files), vec!["new.png", "mid.png", "old.png"]);

        SortMode::OldestFirst.sort(&mut files);
        assert_eq!(names(&files), vec!["old.png", "mid.png", "new.png"]);
    }

    #[test]
    fn test_file_size_sort_is_stable() {
        let mut files = vec![
            candidate("b.png", 0, 20),
            candidate("z.png", 0, 10),
            candidate("a.png", 0, 20),
            candidate("y.png", 0, 10),
        ];
        SortMode::FileSize.sort(&mut files);
        assert_eq!(names(&files), vec!["z.png", "y.png", "b.png", "a.png"]);
    }

    #[test]
    fn test_newest_first_ties_keep_discovery_order() {
        let mut files = vec![
            candidate("second.png", 5, 0),
            candidate("first.png", 5, 0),
        ];
        SortMode::NewestFirst.sort(&mut files);
        assert_eq!(names(&files), vec!["second.png", "first.png"]);
    }

    #[test]
    fn test_labels_round_trip() {
        for mode in SortMode::all() {
            assert_eq!(mode.label().parse::<SortMode>().unwrap(), *mode);
        }
        assert!("Random".parse::<SortMode>().is_err());
        assert_eq!(SortMode::default(), SortMode::Filename);
        assert_eq!(SortMode::NewestFirst.to_string(), "Date (Newest First)");
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&SortMode::OldestFirst).unwrap();
        assert_eq!(json, "\"Date (Oldest First)\"");
    }

    proptest! {
        #[test]
        fn prop_natural_order_matches_numeric_order(a in 0u64..1_000_000, b in 0u64..1_000_000) {
            let left = format!("frame{}.png", a);
            let right = format!("frame{}.png", b);
            prop_assert_eq!(natural_cmp(&left, &right), a.cmp(&b));
        }

        #[test]
        fn prop_natural_cmp_is_antisymmetric(a in "[a-zA-Z0-9._]{0,12}", b in "[a-zA-Z0-9._]{0,12}") {
            prop_assert_eq!(natural_cmp(&a, &b), natural_cmp(&b, &a).reverse());
        }
    }
}
