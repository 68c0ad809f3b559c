///////////////////////////////
/// Per-run switches for scanning read files
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanParams {
    /// Write a copy of each file without the reads carrying a spike
    pub remove_matches: bool,

    /// Substitutions tolerated per spike. Accepted for compatibility; matching is always exact
    pub max_errors: u32,
}
