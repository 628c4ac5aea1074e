//! Parsing of the semicolon-separated directory list.

use log::debug;
use std::path::{Path, PathBuf};

/// Separator between directory entries.
pub const DIRECTORY_SEPARATOR: char = ';';

/// Ordered list of existing directories to scan.
///
/// Order follows the input string. Duplicates are kept, so a directory listed
/// twice contributes its files twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectorySet {
    directories: Vec<PathBuf>,
}

impl DirectorySet {
    /// Parse `input`, trimming each entry and dropping anything that is not
    /// an existing directory.
    pub fn parse(input: &str) -> Self {
        let directories = input
            .split(DIRECTORY_SEPARATOR)
            .map(str::trim)
            .filter_map(|entry| {
                let path = Path::new(entry);
                if path.is_dir() {
                    Some(path.to_path_buf())
                } else {
                    if !entry.is_empty() {
                        debug!("Skipping '{}': not a directory", entry);
                    }
                    None
                }
            })
            .collect();

        Self { directories }
    }

    /// Iterate over the kept directories in input order.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.directories.iter().map(PathBuf::as_path)
    }

    /// Number of kept directories.
    pub fn len(&self) -> usize {
        self.directories.len()
    }

    /// Whether no directory survived parsing.
    pub fn is_empty(&self) -> bool {
        self.directories.is_empty()
    }
}
