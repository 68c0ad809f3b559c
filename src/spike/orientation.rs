use std::path::Path;

use crate::common::REVERSE_READ_SUFFIX;

///////////////////////////////
/// Strand of the reads in one file
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    Forward,
    Reverse,
}

impl Orientation {
    /// Read 2 files (base path ending in R2_001) carry reverse-strand reads
    pub fn infer<P: AsRef<Path>>(base_path: P) -> Orientation {
        let base_path = base_path.as_ref().to_string_lossy();
        if base_path.ends_with(REVERSE_READ_SUFFIX) {
            Orientation::Reverse
        } else {
            Orientation::Forward
        }
    }
}

///////////////////////////////
/// Orientation as requested on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OrientationChoice {
    /// Infer from the file name
    #[default]
    Auto,
    Forward,
    Reverse,
}

impl OrientationChoice {
    pub fn resolve<P: AsRef<Path>>(&self, base_path: P) -> Orientation {
        match self {
            OrientationChoice::Auto => Orientation::infer(base_path),
            OrientationChoice::Forward => Orientation::Forward,
            OrientationChoice::Reverse => Orientation::Reverse,
        }
    }
}
