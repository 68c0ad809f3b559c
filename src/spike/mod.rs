mod library;
mod matcher;
mod orientation;
mod params;
pub mod revcomp;

#[cfg(test)]
pub(crate) mod testdata;

pub use library::{AnchorPair, Spike, SpikeLibrary, SpikeSet};
pub use matcher::{MatchResult, ReadMatcher};
pub use orientation::{Orientation, OrientationChoice};
pub use params::MatchConfig;
