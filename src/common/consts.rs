/// Length of every spike, and of the window slid across a read
pub const DEFAULT_SPIKE_LEN: usize = 34;
/// Length of the flanks shared by all spikes of one orientation
pub const DEFAULT_ANCHOR_LEN: usize = 9;

/// File stems ending in this are read 2, matched against reverse complements
pub const REVERSE_READ_SUFFIX: &str = "R2_001";

/// Extension of the read files picked up during discovery (case-insensitive)
pub const FASTQ_EXTENSION: &str = "fastq";

// Output names, appended to the base path <dir>/<stem>
pub const SUFFIX_FILTERED_FASTQ: &str = "rm.fastq";
pub const SUFFIX_REMOVED_READ_IDS: &str = ".reads.to.remove.txt";
pub const SUFFIX_SPIKE_COUNTS: &str = ".spike.counts.txt";

/// Written in place of a count on the report header line
pub const COUNT_MARKER: &str = "COUNT";
/// Identifier of the no-match row in the report
pub const NO_MATCH_ID: &str = "0";
