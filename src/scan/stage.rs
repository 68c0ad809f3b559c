use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::runtime::{Error, Result};

const PARTIAL_SUFFIX: &str = ".partial";

///////////////////////////////
/// Output files of one input, written under unique temporary names next to
/// their targets and moved into place together. Files not committed are
/// removed when the stage is dropped
#[derive(Debug, Default)]
pub struct OutputStage {
    pending: Vec<(NamedTempFile, PathBuf)>,
}

impl OutputStage {
    pub fn new() -> OutputStage {
        OutputStage {
            pending: Vec::new(),
        }
    }

    ///////////////////////////////
    /// Open a writer for `path_final`. Flush it before committing
    pub fn create<P: AsRef<Path>>(&mut self, path_final: P) -> Result<BufWriter<File>> {
        let path_final = path_final.as_ref().to_path_buf();
        let file_name = path_final
            .file_name()
            .ok_or_else(|| Error::file_not_valid(&path_final, Some("no file name")))?;
        let dir = match path_final.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut prefix = file_name.to_os_string();
        prefix.push(".");
        let mut builder = tempfile::Builder::new();
        builder.prefix(&prefix).suffix(PARTIAL_SUFFIX);
        // Temporary files default to owner-only access
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(std::fs::Permissions::from_mode(0o644));
        }
        let temp = builder
            .tempfile_in(dir)
            .map_err(|e| Error::io(&path_final, e))?;
        let file = temp
            .as_file()
            .try_clone()
            .map_err(|e| Error::io(temp.path(), e))?;

        self.pending.push((temp, path_final));
        Ok(BufWriter::new(file))
    }

    pub fn commit(mut self) -> Result<()> {
        // Files not yet persisted when an error returns are deleted with the drain
        for (temp, path_final) in self.pending.drain(..) {
            temp.persist(&path_final)
                .map_err(|e| Error::io(&path_final, e.error))?;
        }
        Ok(())
    }
}
