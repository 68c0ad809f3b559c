use std::path::{Path, PathBuf};

use log::{debug, warn};
use rustc_hash::FxHashMap;
use walkdir::WalkDir;

use crate::common::{
    FASTQ_EXTENSION, SUFFIX_FILTERED_FASTQ, SUFFIX_REMOVED_READ_IDS, SUFFIX_SPIKE_COUNTS,
};
use crate::runtime::{Error, Result};
use crate::utils::append_to_path;

///////////////////////////////
/// One read file to scan, and the base path its outputs are named after
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FastqJob {
    pub path_in: PathBuf,
    /// <directory>/<file name without extension>
    pub base_path: PathBuf,
}

impl FastqJob {
    /// None unless the file has a .fastq extension, in any case
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<FastqJob> {
        let path = path.as_ref();
        let ext = path.extension()?.to_str()?;
        if !ext.eq_ignore_ascii_case(FASTQ_EXTENSION) {
            return None;
        }
        Some(FastqJob {
            path_in: path.to_path_buf(),
            base_path: path.with_extension(""),
        })
    }

    /// Copy of the input without the matched reads
    pub fn path_filtered(&self) -> PathBuf {
        append_to_path(&self.base_path, SUFFIX_FILTERED_FASTQ)
    }

    /// Identifier lines of the matched reads
    pub fn path_removed_ids(&self) -> PathBuf {
        append_to_path(&self.base_path, SUFFIX_REMOVED_READ_IDS)
    }

    pub fn path_counts(&self) -> PathBuf {
        append_to_path(&self.base_path, SUFFIX_SPIKE_COUNTS)
    }
}

///////////////////////////////
/// Recursively list all .fastq files below `root`, in file name order
pub fn discover_fastq_files<P: AsRef<Path>>(root: P) -> Result<Vec<FastqJob>> {
    let root = root.as_ref();
    if !root.is_dir() {
        return Err(Error::file_not_valid(root, Some("not a directory")));
    }

    let mut jobs = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                // Unreadable subdirectories do not stop the others
                warn!("Skipping entry while listing {}: {}", root.display(), e);
                continue;
            }
        };
        // Follows symlinks, which the walk itself does not
        if !entry.path().is_file() {
            continue;
        }
        if let Some(job) = FastqJob::from_path(entry.path()) {
            debug!("Found {}", job.path_in.display());
            jobs.push(job);
        }
    }
    Ok(jobs)
}

///////////////////////////////
/// Indices of the jobs, grouped by base path in discovery order. Jobs sharing a
/// base path write the same outputs and must not run concurrently
pub fn group_by_base_path(jobs: &[FastqJob]) -> Vec<Vec<usize>> {
    let mut groups: Vec<Vec<usize>> = Vec::new();
    let mut group_of: FxHashMap<&Path, usize> = FxHashMap::default();
    for (i, job) in jobs.iter().enumerate() {
        match group_of.get(job.base_path.as_path()) {
            Some(&g) => {
                warn!(
                    "{} shares its output names with {}; the later file overwrites the outputs",
                    job.path_in.display(),
                    jobs[groups[g][0]].path_in.display()
                );
                groups[g].push(i);
            }
            None => {
                group_of.insert(job.base_path.as_path(), groups.len());
                groups.push(vec![i]);
            }
        }
    }
    groups
}
