use std::collections::BTreeMap;

use crate::spike::{MatchResult, Orientation, Spike, SpikeLibrary};

///////////////////////////////
/// Per-file spike counts.
///
/// Holds one counter per spike of the scanned orientation, the entry that
/// labels the report header, and a counter for reads without any spike.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CountMapping {
    header: Spike,
    counts: BTreeMap<Spike, u64>,
    no_match: u64,
    reads_scanned: u64,
}

impl CountMapping {
    ///////////////////////////////
    /// Zero counters for all spikes but the first; the first labels the header
    pub fn new(header: &Spike, spikes: &[Spike]) -> CountMapping {
        let counts = spikes
            .iter()
            .skip(1)
            .map(|spike| (spike.clone(), 0))
            .collect();
        CountMapping {
            header: header.clone(),
            counts,
            no_match: 0,
            reads_scanned: 0,
        }
    }

    pub fn for_library(library: &SpikeLibrary, orientation: Orientation) -> CountMapping {
        CountMapping::new(library.header(), library.spikes(orientation).spikes())
    }

    #[inline(always)]
    pub fn record(&mut self, result: &MatchResult) {
        self.reads_scanned += 1;
        match result {
            MatchResult::Matched(spike) => {
                if let Some(count) = self.counts.get_mut(*spike) {
                    *count += 1;
                } else {
                    self.counts.insert((*spike).clone(), 1);
                }
            }
            MatchResult::NoMatch => self.no_match += 1,
        }
    }

    pub fn header(&self) -> &Spike {
        &self.header
    }

    pub fn counts(&self) -> impl Iterator<Item = (&Spike, u64)> {
        self.counts.iter().map(|(spike, &count)| (spike, count))
    }

    pub fn get(&self, spike: &Spike) -> Option<u64> {
        self.counts.get(spike).copied()
    }

    pub fn no_match(&self) -> u64 {
        self.no_match
    }

    pub fn reads_scanned(&self) -> u64 {
        self.reads_scanned
    }

    /// Reads that carried a spike
    pub fn matched(&self) -> u64 {
        self.counts.values().sum()
    }
}
