//! Candidate discovery inside the selected directories.

use crate::config::LoaderConfig;
use crate::selection::directories::DirectorySet;
use log::{debug, warn};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

/// An image file found during the scan, with the stat data the sort modes need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    /// Directory entry joined with the file name.
    pub path: PathBuf,
    /// Bare file name.
    pub file_name: String,
    /// Last modification time, `UNIX_EPOCH` when the platform does not report one.
    pub modified: SystemTime,
    /// Size in bytes.
    pub size: u64,
}

impl FileCandidate {
    /// Stat `path` and build a candidate. Returns `None` for anything that is
    /// not a readable regular file.
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let file_name = path.file_name()?.to_string_lossy().into_owned();
        let metadata = match std::fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                return None;
            }
        };
        if !metadata.is_file() {
            return None;
        }

        Some(Self {
            modified: metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH),
            size: metadata.len(),
            file_name,
            path,
        })
    }

    /// File name without its final extension. Leading dots do not start an
    /// extension, so `.png` keeps its full name.
    pub fn stem(&self) -> &str {
        let name = self.file_name.as_str();
        let leading = name.len() - name.trim_start_matches('.').len();
        match name[leading..].rfind('.') {
            Some(dot) => &name[..leading + dot],
            None => name,
        }
    }
}

/// Collect candidates from every directory in `directories`, in directory
/// order. Within one directory the filesystem's enumeration order is kept.
pub fn scan_candidates(directories: &DirectorySet, config: &LoaderConfig) -> Vec<FileCandidate> {
    let mut candidates = Vec::new();

    for dir in directories.iter() {
        let before = candidates.len();
        candidates.extend(scan_directory(dir, config));
        debug!(
            "Found {} candidate(s) in {}",
            candidates.len() - before,
            dir.display()
        );
    }

    candidates
}

fn scan_directory<'a>(
    dir: &'a Path,
    config: &'a LoaderConfig,
) -> impl Iterator<Item = FileCandidate> + 'a {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(move |entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Failed to read entry in {}: {}", dir.display(), e);
                None
            }
        })
        .filter(move |entry| config.accepts(&entry.file_name().to_string_lossy()))
        .filter_map(|entry| FileCandidate::from_path(entry.into_path()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn touch(dir: &Path, name: &str, bytes: usize) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, vec![0u8; bytes]).unwrap();
        path
    }

    #[test]
    fn test_scan_filters_extensions() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "a.png", 1);
        touch(dir.path(), "B.JPEG", 1);
        touch(dir.path(), "c.txt", 1);
        touch(dir.path(), "d.gif", 1);
        fs::create_dir(dir.path().join("nested.png")).unwrap();
        touch(&dir.path().join("nested.png"), "inner.png", 1);

        let set = DirectorySet::parse(&dir.path().display().to_string());
        let mut names: Vec<String> = scan_candidates(&set, &LoaderConfig::default())
            .into_iter()
            .map(|c| c.file_name)
            .collect();
        names.sort();

        assert_eq!(names, vec!["B.JPEG", "a.png"]);
    }

    #[test]
    fn test_scan_concatenates_directories_in_order() {
        let a = tempdir().unwrap();
        let b = tempdir().unwrap();
        let a_png = touch(a.path(), "a.png", 1);
        let b_jpg = touch(b.path(), "b.jpg", 1);

        let input = format!("{};{}", a.path().display(), b.path().display());
        let candidates = scan_candidates(&DirectorySet::parse(&input), &LoaderConfig::default());
        let paths: Vec<&Path> = candidates.iter().map(|c| c.path.as_path()).collect();

        assert_eq!(paths, vec![a_png.as_path(), b_jpg.as_path()]);
    }

    #[test]
    fn test_scan_skips_missing_directories() {
        let a = tempdir().unwrap();
        touch(a.path(), "only.webp", 1);

        let input = format!("{};/nonexistent/bm_nodes", a.path().display());
        let candidates = scan_candidates(&DirectorySet::parse(&input), &LoaderConfig::default());

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].file_name, "only.webp");
    }

    #[test]
    fn test_candidate_stat_data() {
        let dir = tempdir().unwrap();
        let path = touch(dir.path(), "shot.final.bmp", 42);

        let candidate = FileCandidate::from_path(&path).unwrap();
        assert_eq!(candidate.size, 42);
        assert_eq!(candidate.file_name, "shot.final.bmp");
        assert_eq!(candidate.stem(), "shot.final");
        assert!(FileCandidate::from_path(dir.path().join("missing.png")).is_none());
    }

    #[test]
    fn test_stem_of_dotfile() {
        let dir = tempdir().unwrap();
        let path = touch(dir.path(), ".png", 1);
        let candidate = FileCandidate::from_path(&path).unwrap();
        assert_eq!(candidate.stem(), ".png");

        let path = touch(dir.path(), ".hidden.jpg", 1);
        let candidate = FileCandidate::from_path(&path).unwrap();
        assert_eq!(candidate.stem(), ".hidden");
    }
}
