use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use clap::Args;
use log::{debug, error, info, warn};
use rayon::prelude::*;

use super::determine_thread_count;
use crate::common::{DEFAULT_ANCHOR_LEN, DEFAULT_SPIKE_LEN};
use crate::fileformat::{discover_fastq_files, group_by_base_path};
use crate::runtime::{Config, ErrorMode};
use crate::scan::{process_file, ScanParams};
use crate::spike::{MatchConfig, OrientationChoice, SpikeLibrary};

#[derive(Args)]
pub struct SpikeCountCMD {
    #[arg(value_parser)]
    /// File with one "<id> <sequence>" spike per line
    pub path_spikes: PathBuf,

    #[arg(value_parser)]
    /// Directory searched recursively for .fastq files
    pub path_source: PathBuf,

    #[arg(short = 'e', long = "max-errs", value_parser, default_value = "0")]
    /// Maximum number of errors in a spike. Accepted, but spikes are matched exactly
    pub max_errs: u32,

    #[arg(short = 'r', long = "removal")]
    /// Write a copy of each file without the reads that carry a spike
    pub removal: bool,

    #[arg(long = "orientation", value_enum, default_value_t = OrientationChoice::Auto)]
    /// Strand of the reads; auto treats files ending in R2_001 as reverse
    pub orientation: OrientationChoice,

    #[arg(long = "spike-len", value_parser, default_value_t = DEFAULT_SPIKE_LEN)]
    /// Length of every spike
    pub spike_len: usize,

    #[arg(long = "anchor-len", value_parser, default_value_t = DEFAULT_ANCHOR_LEN)]
    /// Length of the flanks shared by all spikes
    pub anchor_len: usize,

    #[arg(long = "strict")]
    /// Stop at the first file that fails instead of continuing with the next
    pub strict: bool,

    //Thread settings
    #[arg(short = '@', value_parser = clap::value_parser!(usize))]
    num_threads_total: Option<usize>,
}
impl SpikeCountCMD {
    /// Run the commandline option
    pub fn try_execute(&mut self) -> Result<()> {
        let num_threads = determine_thread_count(self.num_threads_total)?;
        info!("Using threads {}", num_threads);

        let match_config = MatchConfig::new(self.spike_len, self.anchor_len)?;

        let summary = SpikeCount::run(&SpikeCount {
            path_spikes: self.path_spikes.clone(),
            path_source: self.path_source.clone(),
            match_config,
            scan: ScanParams {
                remove_matches: self.removal,
                max_errors: self.max_errs,
            },
            orientation: self.orientation,
            config: Config {
                error_mode: ErrorMode::from_strict(self.strict),
                num_threads,
            },
        })?;

        if !summary.failed.is_empty() {
            anyhow::bail!(
                "{} of {} files failed",
                summary.failed.len(),
                summary.failed.len() + summary.processed.len()
            );
        }

        info!("SpikeCount has finished succesfully");
        Ok(())
    }
}

///////////////////////////////
/// Files handled in one run
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Base paths of the files whose outputs were written
    pub processed: Vec<PathBuf>,
    /// Input paths that failed, with the reason
    pub failed: Vec<(PathBuf, String)>,
    /// Files not attempted after an abort
    pub skipped: usize,
}

pub struct SpikeCount {
    pub path_spikes: PathBuf,
    pub path_source: PathBuf,
    pub match_config: MatchConfig,
    pub scan: ScanParams,
    pub orientation: OrientationChoice,
    pub config: Config,
}
impl SpikeCount {
    /// Run the algorithm
    pub fn run(params: &SpikeCount) -> anyhow::Result<RunSummary> {
        //The library must be valid before any file is touched
        let library = SpikeLibrary::from_path(&params.path_spikes, &params.match_config)
            .with_context(|| {
                format!(
                    "Failed to load spike library {}",
                    params.path_spikes.display()
                )
            })?;

        if params.scan.max_errors > 0 {
            warn!(
                "Requested tolerance of {} errors is ignored; spikes are matched exactly",
                params.scan.max_errors
            );
        }

        let jobs = discover_fastq_files(&params.path_source).with_context(|| {
            format!(
                "Failed to list fastq files in {}",
                params.path_source.display()
            )
        })?;
        if jobs.is_empty() {
            warn!("No .fastq files found in {}", params.path_source.display());
        } else {
            info!(
                "Found {} fastq files in {}",
                jobs.len(),
                params.path_source.display()
            );
        }

        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(params.config.num_threads)
            .build()
            .context("Failed to create thread pool")?;

        //Files sharing a base path run one after another, in discovery order;
        //all other files are independent and their outputs are committed as a unit
        let groups = group_by_base_path(&jobs);
        let aborted = AtomicBool::new(false);
        let process = |i: usize| -> (usize, Option<std::result::Result<(), String>>) {
            let job = &jobs[i];
            if aborted.load(Ordering::Relaxed) {
                return (i, None);
            }
            let orientation = params.orientation.resolve(&job.base_path);
            match process_file(job, &library, orientation, &params.scan) {
                Ok(counts) => {
                    debug!(
                        "{} reads in {}, {} without a spike",
                        counts.reads_scanned(),
                        job.path_in.display(),
                        counts.no_match()
                    );
                    println!("Processed {}", job.base_path.display());
                    (i, Some(Ok(())))
                }
                Err(e) => {
                    error!("Failed to process {}: {}", job.path_in.display(), e);
                    if params.config.error_mode == ErrorMode::Abort {
                        aborted.store(true, Ordering::Relaxed);
                    }
                    (i, Some(Err(e.to_string())))
                }
            }
        };
        let process = &process;
        let mut outcomes: Vec<(usize, Option<std::result::Result<(), String>>)> = thread_pool
            .install(|| {
                groups
                    .par_iter()
                    .flat_map_iter(|group| group.iter().map(move |&i| process(i)))
                    .collect()
            });
        outcomes.sort_by_key(|(i, _)| *i);

        let mut summary = RunSummary::default();
        for (job, (_, outcome)) in jobs.iter().zip(outcomes) {
            match outcome {
                Some(Ok(())) => summary.processed.push(job.base_path.clone()),
                Some(Err(msg)) => summary.failed.push((job.path_in.clone(), msg)),
                None => summary.skipped += 1,
            }
        }

        if params.config.error_mode == ErrorMode::Abort {
            if let Some((path, msg)) = summary.failed.first() {
                anyhow::bail!("Aborted after failing on {}: {}", path.display(), msg);
            }
        }
        Ok(summary)
    }
}
