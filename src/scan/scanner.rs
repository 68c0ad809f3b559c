use std::io::Write;

use log::debug;
use seq_io::fastq::Record as FastqRecord;

use super::{OutputStage, ScanParams};
use crate::count::{CountMapping, CountReport};
use crate::fileformat::{open_fastq, FastqJob};
use crate::runtime::{Error, Result};
use crate::spike::{Orientation, ReadMatcher, SpikeLibrary};

///////////////////////////////
/// Count the spikes in one read file.
///
/// In removal mode, reads without a spike are copied unchanged to the filtered
/// file. Otherwise the identifier line of every read with a spike goes to the
/// removed-read list. That list is created in both modes. A record cut off by
/// the end of the file is neither counted nor written, in either mode.
pub fn scan_file(
    job: &FastqJob,
    library: &SpikeLibrary,
    orientation: Orientation,
    params: &ScanParams,
    stage: &mut OutputStage,
) -> Result<CountMapping> {
    let matcher = ReadMatcher::new(library, orientation);
    let mut counts = CountMapping::for_library(library, orientation);
    let mut input = open_fastq(&job.path_in)?;

    let path_removed_ids = job.path_removed_ids();
    let mut removed_ids = stage.create(&path_removed_ids)?;

    let path_filtered = job.path_filtered();
    let mut filtered = if params.remove_matches {
        Some(stage.create(&path_filtered)?)
    } else {
        None
    };

    while let Some(record) = input.next_record()? {
        let result = matcher.find(record.seq());
        counts.record(&result);

        match filtered.as_mut() {
            Some(writer) => {
                if !result.is_match() {
                    record
                        .write_unchanged(writer)
                        .map_err(|e| Error::io(&path_filtered, e))?;
                }
            }
            None => {
                if result.is_match() {
                    write_id_line(&mut removed_ids, record.head())
                        .map_err(|e| Error::io(&path_removed_ids, e))?;
                }
            }
        }
    }

    removed_ids
        .flush()
        .map_err(|e| Error::io(&path_removed_ids, e))?;
    if let Some(mut writer) = filtered {
        writer.flush().map_err(|e| Error::io(&path_filtered, e))?;
    }

    debug!(
        "{}: {} reads, {} with a spike ({:?}){}",
        job.path_in.display(),
        input.num_records(),
        counts.matched(),
        orientation,
        if input.truncated() { ", last record incomplete" } else { "" }
    );
    Ok(counts)
}

fn write_id_line<W: Write>(writer: &mut W, head: &[u8]) -> std::io::Result<()> {
    writer.write_all(b"@")?;
    writer.write_all(head)?;
    writer.write_all(b"\n")
}

///////////////////////////////
/// Scan one file and write its count report. Either all outputs of the file
/// appear, or none do
pub fn process_file(
    job: &FastqJob,
    library: &SpikeLibrary,
    orientation: Orientation,
    params: &ScanParams,
) -> Result<CountMapping> {
    let mut stage = OutputStage::new();
    let counts = scan_file(job, library, orientation, params, &mut stage)?;

    let report = CountReport::from_mapping(&counts);
    let path_counts = job.path_counts();
    let writer = stage.create(&path_counts)?;
    report
        .write_to(writer)
        .map_err(|e| Error::io(&path_counts, std::io::Error::other(e)))?;

    stage.commit()?;
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spike::revcomp::revcomp;
    use crate::spike::testdata::*;
    use crate::spike::Spike;
    use std::fs;
    use std::path::Path;

    fn fastq_record(name: &str, seq: &str) -> String {
        format!("@{}\n{}\n+\n{}\n", name, seq, "I".repeat(seq.len()))
    }

    fn job_with(dir: &Path, name: &str, content: &str) -> FastqJob {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        FastqJob::from_path(&path).unwrap()
    }

    #[test]
    fn test_removal_mode_filters_matches() {
        let dir = tempfile::tempdir().unwrap();
        let keep = fastq_record("keep", "GATTACAGATTACAGATTACAGATTACAGATTACAGATTACA");
        let dropped = fastq_record("dropped", &format!("TT{}AA", spike_seq(MIDDLE_1)));
        let job = job_with(dir.path(), "sample_R1_001.fastq", &format!("{}{}", dropped, keep));

        let params = ScanParams {
            remove_matches: true,
            max_errors: 0,
        };
        let counts = process_file(&job, &library(), Orientation::Forward, &params).unwrap();

        assert_eq!(fs::read_to_string(job.path_filtered()).unwrap(), keep);
        // Created, but only listing mode fills it
        assert_eq!(fs::read_to_string(job.path_removed_ids()).unwrap(), "");
        assert_eq!(counts.reads_scanned(), 2);
        assert_eq!(counts.no_match(), 1);
        assert_eq!(
            counts.get(&Spike::new("SPK1", spike_seq(MIDDLE_1))),
            Some(1)
        );
    }

    #[test]
    fn test_listing_mode_writes_ids() {
        let dir = tempfile::tempdir().unwrap();
        let content = [
            fastq_record("r1 lane=1", &spike_seq(MIDDLE_2)),
            fastq_record("r2", "ACGTACGTACGT"),
            fastq_record("r3", &spike_seq(MIDDLE_3)),
        ]
        .concat();
        let job = job_with(dir.path(), "sample.fastq", &content);

        let counts = process_file(&job, &library(), Orientation::Forward, &ScanParams::default()).unwrap();

        assert_eq!(
            fs::read_to_string(job.path_removed_ids()).unwrap(),
            "@r1 lane=1\n@r3\n"
        );
        assert!(!job.path_filtered().exists());
        assert_eq!(counts.matched() + counts.no_match(), counts.reads_scanned());

        let report = fs::read_to_string(job.path_counts()).unwrap();
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[0], format!("SPK0,{},COUNT", spike_seq(MIDDLE_0)));
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_reverse_file_uses_reverse_complements() {
        let dir = tempfile::tempdir().unwrap();
        let read = format!("A{}", revcomp(&spike_seq(MIDDLE_3)));
        let job = job_with(
            dir.path(),
            "sample_R2_001.fastq",
            &fastq_record("r1", &read),
        );
        let orientation = Orientation::infer(&job.base_path);
        assert_eq!(orientation, Orientation::Reverse);

        let counts = process_file(&job, &library(), orientation, &ScanParams::default()).unwrap();
        assert_eq!(
            counts.get(&Spike::new("SPK3", revcomp(&spike_seq(MIDDLE_3)))),
            Some(1)
        );
        assert_eq!(counts.no_match(), 0);
    }

    #[test]
    fn test_truncated_record_is_not_counted() {
        let dir = tempfile::tempdir().unwrap();
        let content = format!(
            "{}@r2\n{}\n",
            fastq_record("r1", &spike_seq(MIDDLE_1)),
            spike_seq(MIDDLE_2)
        );
        let job = job_with(dir.path(), "trunc.fastq", &content);
        let counts = process_file(&job, &library(), Orientation::Forward, &ScanParams::default()).unwrap();
        assert_eq!(counts.reads_scanned(), 1);
        assert_eq!(counts.get(&Spike::new("SPK2", spike_seq(MIDDLE_2))), Some(0));
    }

    #[test]
    fn test_truncated_record_is_dropped_in_removal_mode() {
        let dir = tempfile::tempdir().unwrap();
        let keep = fastq_record("r1", "ACGTACGT");
        // Identifier and sequence present, separator and quality cut off
        let content = format!("{}@r2\n{}\n", keep, spike_seq(MIDDLE_2));
        let job = job_with(dir.path(), "trunc.fastq", &content);
        let params = ScanParams {
            remove_matches: true,
            max_errors: 0,
        };
        let counts = process_file(&job, &library(), Orientation::Forward, &params).unwrap();
        assert_eq!(counts.reads_scanned(), 1);
        assert_eq!(counts.no_match(), 1);
        assert_eq!(counts.get(&Spike::new("SPK2", spike_seq(MIDDLE_2))), Some(0));
        assert_eq!(fs::read_to_string(job.path_filtered()).unwrap(), keep);
    }

    #[test]
    fn test_malformed_input_leaves_no_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let content = format!("{}not a record\n", fastq_record("r1", &spike_seq(MIDDLE_1)));
        let job = job_with(dir.path(), "bad.fastq", &content);
        let params = ScanParams {
            remove_matches: true,
            max_errors: 0,
        };
        let err = process_file(&job, &library(), Orientation::Forward, &params).unwrap_err();
        assert!(matches!(err, Error::FileNotValid { .. }));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_missing_input_leaves_no_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let job = FastqJob::from_path(dir.path().join("absent.fastq")).unwrap();
        let params = ScanParams {
            remove_matches: true,
            max_errors: 0,
        };
        let err = process_file(&job, &library(), Orientation::Forward, &params).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
