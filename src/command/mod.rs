use std::fmt;

use clap::Subcommand;

pub mod spikecount;
mod threadcount;

pub use spikecount::{RunSummary, SpikeCount, SpikeCountCMD};
pub use threadcount::determine_thread_count;

///////////////////////////////
/// Possible subcommands to parse
#[derive(Subcommand)]
pub enum Commands {
    /// Count reads carrying spikes in every .fastq file below a directory
    Count(SpikeCountCMD),
}

impl fmt::Debug for Commands {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cmd = match self {
            Commands::Count(_) => "Count",
        };
        write!(f, "{}", cmd)
    }
}
