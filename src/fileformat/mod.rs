mod discover;
mod fastq;

pub use discover::discover_fastq_files;
pub use discover::group_by_base_path;
pub use discover::FastqJob;

pub use fastq::open_fastq;
pub use fastq::FastqInput;
