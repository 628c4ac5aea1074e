//! Picking one image out of a set of directories.
//!
//! The pipeline is: parse the directory list, scan each directory for
//! supported files, sort the combined list, clamp the requested index into
//! range and decode the chosen file.
//!
//! ```rust,ignore
//! use bm_nodes::selection::{ImageSelector, SortMode};
//!
//! let selector = ImageSelector::default();
//! let selection = selector.select("/renders;/renders/extra", 3, SortMode::Filename)?;
//! println!("{} of {}", selection.filename, selection.file_count);
//! ```

pub mod decode;
pub mod directories;
pub mod scan;
pub mod sort;

pub use decode::{decode_image, image_to_tensors, DecodedImage};
pub use directories::DirectorySet;
pub use scan::{scan_candidates, FileCandidate};
pub use sort::{natural_cmp, natural_key, NaturalKey, SortMode};

use crate::config::LoaderConfig;
use crate::core::error::{SelectError, SelectResult};
use crate::core::tensor::{ImageTensor, MaskTensor};
use log::{debug, info};
use std::path::PathBuf;

/// Result of a successful selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// `[1, height, width, 3]` color tensor.
    pub image: ImageTensor,
    /// Inverted alpha `[1, height, width]`, or the blank mask.
    pub mask: MaskTensor,
    /// Directory entry joined with the file name.
    pub filepath: PathBuf,
    /// Bare file name.
    pub filename: String,
    /// File name without its extension.
    pub filename_no_ext: String,
    /// Number of candidates across all directories.
    pub file_count: usize,
    /// Index actually used after clamping.
    pub selected_index: usize,
}

/// Clamp `requested` into `0..count`. `None` when there is nothing to pick.
pub fn clamp_index(requested: i64, count: usize) -> Option<usize> {
    let last = count.checked_sub(1)?;
    Some(usize::try_from(requested.max(0)).map_or(last, |index| index.min(last)))
}

/// Selects and decodes one image from a set of directories.
#[derive(Debug, Clone, Default)]
pub struct ImageSelector {
    config: LoaderConfig,
}

impl ImageSelector {
    /// Create a selector with the given settings.
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Settings in use.
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Sorted candidate list for `directories`, without decoding anything.
    pub fn candidates(&self, directories: &str, sort_by: SortMode) -> Vec<FileCandidate> {
        let set = DirectorySet::parse(directories);
        debug!("Scanning {} director(ies)", set.len());

        let mut candidates = scan_candidates(&set, &self.config);
        sort_by.sort(&mut candidates);
        candidates
    }

    /// Pick the file at `file_number` under `sort_by` and decode it.
    ///
    /// Fails only when no directory holds a supported file, or when the
    /// chosen file cannot be decoded.
    pub fn select(
        &self,
        directories: &str,
        file_number: i64,
        sort_by: SortMode,
    ) -> SelectResult<Selection> {
        let mut candidates = self.candidates(directories, sort_by);
        let file_count = candidates.len();

        let selected_index =
            clamp_index(file_number, file_count).ok_or_else(|| SelectError::NoCandidateFiles {
                directories: directories.to_string(),
            })?;
        if selected_index as i64 != file_number {
            debug!(
                "Clamped index {} to {} ({} file(s))",
                file_number, selected_index, file_count
            );
        }

        let chosen = candidates.swap_remove(selected_index);
        info!(
            "Loading {} ({}/{}, sorted by {})",
            chosen.path.display(),
            selected_index + 1,
            file_count,
            sort_by
        );

        let decoded = decode_image(&chosen.path, &self.config)?;
        let filename_no_ext = chosen.stem().to_string();

        Ok(Selection {
            image: decoded.image,
            mask: decoded.mask,
            filepath: chosen.path,
            filename: chosen.file_name,
            filename_no_ext,
            file_count,
            selected_index,
        })
    }
}
