use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use log::{debug, info};
use rustc_hash::FxHashMap;

use super::revcomp::revcomp;
use super::{MatchConfig, Orientation};
use crate::runtime::{Error, Result};

///////////////////////////////
/// One marker sequence and its name
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Spike {
    pub id: String,
    pub sequence: String,
}

impl Spike {
    pub fn new<I: Into<String>, S: Into<String>>(id: I, sequence: S) -> Spike {
        Spike {
            id: id.into(),
            sequence: sequence.into(),
        }
    }
}

///////////////////////////////
/// Flanks shared by every spike of one orientation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnchorPair {
    pub prefix: Vec<u8>,
    pub suffix: Vec<u8>,
}

impl AnchorPair {
    fn from_exemplar(sequence: &str, anchor_len: usize) -> AnchorPair {
        let seq = sequence.as_bytes();
        AnchorPair {
            prefix: seq[..anchor_len].to_vec(),
            suffix: seq[seq.len() - anchor_len..].to_vec(),
        }
    }

    fn flanks(&self, sequence: &str) -> bool {
        let seq = sequence.as_bytes();
        seq.starts_with(&self.prefix) && seq.ends_with(&self.suffix)
    }
}

///////////////////////////////
/// The spikes of one orientation, with their anchors and a sequence lookup
#[derive(Clone, Debug)]
pub struct SpikeSet {
    spikes: Vec<Spike>,
    anchors: AnchorPair,

    //Maps sequence to index of the first spike carrying it
    seq2spike: FxHashMap<Vec<u8>, usize>,
}

impl SpikeSet {
    fn new(spikes: Vec<Spike>, anchor_len: usize) -> SpikeSet {
        let anchors = AnchorPair::from_exemplar(&spikes[exemplar_index(spikes.len())].sequence, anchor_len);

        let mut seq2spike = FxHashMap::default();
        for (i, spike) in spikes.iter().enumerate() {
            seq2spike
                .entry(spike.sequence.as_bytes().to_vec())
                .or_insert(i);
        }

        SpikeSet {
            spikes,
            anchors,
            seq2spike,
        }
    }

    pub fn spikes(&self) -> &[Spike] {
        &self.spikes
    }

    pub fn anchors(&self) -> &AnchorPair {
        &self.anchors
    }

    /// First spike, in file order, whose sequence equals the window
    #[inline(always)]
    pub fn lookup(&self, window: &[u8]) -> Option<&Spike> {
        self.seq2spike.get(window).map(|&i| &self.spikes[i])
    }
}

///////////////////////////////
/// Index of the spike that defines the anchors. The second entry; the first
/// line of a spike file labels the report columns
fn exemplar_index(num_spikes: usize) -> usize {
    if num_spikes > 1 {
        1
    } else {
        0
    }
}

///////////////////////////////
/// All spikes of a run, in forward and reverse-complement orientation
#[derive(Clone, Debug)]
pub struct SpikeLibrary {
    config: MatchConfig,
    forward: SpikeSet,
    reverse: SpikeSet,
}

impl SpikeLibrary {
    pub fn from_path<P: AsRef<Path>>(path: P, config: &MatchConfig) -> Result<SpikeLibrary> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        let library = SpikeLibrary::from_reader(file, path, config)?;
        info!(
            "Read {} spikes from {}",
            library.len(),
            path.display()
        );
        Ok(library)
    }

    ///////////////////////////////
    /// Parse whitespace separated "<id> <sequence>" lines. `source` only names the input in errors
    pub fn from_reader<R: Read>(src: R, source: &Path, config: &MatchConfig) -> Result<SpikeLibrary> {
        let mut forward: Vec<Spike> = Vec::new();
        let reader = BufReader::new(src);
        for (line_index, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| Error::io(source, e))?;
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.is_empty() {
                continue;
            }
            if fields.len() != 2 {
                return Err(Error::parse_error(
                    format!("{} line {}", source.display(), line_index + 1),
                    Some(format!(
                        "expected an identifier and a sequence, found {} fields",
                        fields.len()
                    )),
                ));
            }
            forward.push(Spike::new(fields[0], fields[1]));
        }

        SpikeLibrary::from_spikes(forward, source, config)
    }

    pub fn from_spikes(forward: Vec<Spike>, source: &Path, config: &MatchConfig) -> Result<SpikeLibrary> {
        if forward.is_empty() {
            return Err(Error::parse_error(
                source.display().to_string(),
                Some("no spikes defined"),
            ));
        }
        validate_spikes(&forward, source, config)?;

        let reverse: Vec<Spike> = forward
            .iter()
            .map(|spike| Spike::new(spike.id.as_str(), revcomp(&spike.sequence)))
            .collect();

        let forward = SpikeSet::new(forward, config.anchor_len());
        let reverse = SpikeSet::new(reverse, config.anchor_len());
        debug!(
            "Anchors forward {}..{}, reverse {}..{}",
            String::from_utf8_lossy(&forward.anchors.prefix),
            String::from_utf8_lossy(&forward.anchors.suffix),
            String::from_utf8_lossy(&reverse.anchors.prefix),
            String::from_utf8_lossy(&reverse.anchors.suffix),
        );

        Ok(SpikeLibrary {
            config: *config,
            forward,
            reverse,
        })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.forward.spikes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.spikes.is_empty()
    }

    pub fn spikes(&self, orientation: Orientation) -> &SpikeSet {
        match orientation {
            Orientation::Forward => &self.forward,
            Orientation::Reverse => &self.reverse,
        }
    }

    /// Entry labelling the report header, always taken from the forward set
    pub fn header(&self) -> &Spike {
        &self.forward.spikes[0]
    }
}

///////////////////////////////
/// Every spike that can be counted must have the window length and the exemplar's flanks.
/// Checking the forward set suffices; reverse complements inherit both properties
fn validate_spikes(forward: &[Spike], source: &Path, config: &MatchConfig) -> Result<()> {
    let exemplar = &forward[exemplar_index(forward.len())];
    if exemplar.sequence.len() != config.spike_len() {
        return Err(Error::invalid_spike_library(
            source,
            format!(
                "spike '{}' is {} long, expected {}",
                exemplar.id,
                exemplar.sequence.len(),
                config.spike_len()
            ),
        ));
    }
    if !exemplar.sequence.is_ascii() {
        return Err(Error::invalid_spike_library(
            source,
            format!("spike '{}' has non-ASCII characters", exemplar.id),
        ));
    }
    let anchors = AnchorPair::from_exemplar(&exemplar.sequence, config.anchor_len());

    let first_checked = exemplar_index(forward.len());
    for spike in forward.iter().skip(first_checked) {
        if spike.sequence.len() != config.spike_len() || !spike.sequence.is_ascii() {
            return Err(Error::invalid_spike_library(
                source,
                format!(
                    "spike '{}' is {} long, expected {}",
                    spike.id,
                    spike.sequence.len(),
                    config.spike_len()
                ),
            ));
        }
        if !anchors.flanks(&spike.sequence) {
            return Err(Error::invalid_spike_library(
                source,
                format!(
                    "spike '{}' does not share the flanks {}..{} of spike '{}'",
                    spike.id,
                    String::from_utf8_lossy(&anchors.prefix),
                    String::from_utf8_lossy(&anchors.suffix),
                    exemplar.id
                ),
            ));
        }
    }
    Ok(())
}
