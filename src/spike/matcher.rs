use super::{Orientation, Spike, SpikeLibrary, SpikeSet};

///////////////////////////////
/// Outcome of scanning one read
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchResult<'a> {
    NoMatch,
    Matched(&'a Spike),
}

impl<'a> MatchResult<'a> {
    pub fn is_match(&self) -> bool {
        matches!(self, MatchResult::Matched(_))
    }

    pub fn spike(&self) -> Option<&'a Spike> {
        match self {
            MatchResult::Matched(spike) => Some(spike),
            MatchResult::NoMatch => None,
        }
    }
}

///////////////////////////////
/// Finds the leftmost anchored spike occurrence in a read.
///
/// A window of the spike length is slid across the read. Only windows whose
/// ends carry the orientation's anchor pair are compared in full against the
/// library. Comparison is exact and case-sensitive.
#[derive(Clone, Copy, Debug)]
pub struct ReadMatcher<'a> {
    set: &'a SpikeSet,
    spike_len: usize,
}

impl<'a> ReadMatcher<'a> {
    pub fn new(library: &'a SpikeLibrary, orientation: Orientation) -> ReadMatcher<'a> {
        ReadMatcher {
            set: library.spikes(orientation),
            spike_len: library.config().spike_len(),
        }
    }

    ///////////////////////////////
    /// Check prefix and suffix anchors pairwise from the outside in, giving up
    /// at the first mismatch on either side
    #[inline(always)]
    fn has_anchors(&self, window: &[u8]) -> bool {
        let anchors = self.set.anchors();
        let m = anchors.prefix.len();
        let last = window.len() - 1;
        for charno in 0..m {
            if window[charno] != anchors.prefix[charno] {
                return false;
            }
            if window[last - charno] != anchors.suffix[m - 1 - charno] {
                return false;
            }
        }
        true
    }

    pub fn find(&self, read: &[u8]) -> MatchResult<'a> {
        if read.len() < self.spike_len {
            return MatchResult::NoMatch;
        }
        for window in read.windows(self.spike_len) {
            if self.has_anchors(window) {
                if let Some(spike) = self.set.lookup(window) {
                    return MatchResult::Matched(spike);
                }
            }
        }
        MatchResult::NoMatch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spike::revcomp::revcomp;
    use crate::spike::testdata::*;
    use proptest::prelude::*;

    fn find_id(library: &SpikeLibrary, orientation: Orientation, read: &str) -> Option<String> {
        ReadMatcher::new(library, orientation)
            .find(read.as_bytes())
            .spike()
            .map(|s| s.id.clone())
    }

    #[test]
    fn test_exact_read_matches() {
        let library = library();
        let read = spike_seq(MIDDLE_2);
        assert_eq!(find_id(&library, Orientation::Forward, &read).as_deref(), Some("SPK2"));
    }

    #[test]
    fn test_spike_inside_longer_read() {
        let library = library();
        let read = format!("NNGATTACA{}CCGGTTAA", spike_seq(MIDDLE_3));
        assert_eq!(find_id(&library, Orientation::Forward, &read).as_deref(), Some("SPK3"));
    }

    #[test]
    fn test_first_entry_is_matchable() {
        let library = library();
        let read = format!("TT{}", spike_seq(MIDDLE_0));
        assert_eq!(find_id(&library, Orientation::Forward, &read).as_deref(), Some("SPK0"));
    }

    #[test]
    fn test_leftmost_window_wins() {
        let library = library();
        let read = format!("{}{}", spike_seq(MIDDLE_3), spike_seq(MIDDLE_1));
        assert_eq!(find_id(&library, Orientation::Forward, &read).as_deref(), Some("SPK3"));
    }

    #[test]
    fn test_anchored_window_without_spike_continues_scan() {
        let library = library();
        // Passes the anchor check but matches no spike, then a real spike follows
        let decoy = spike_seq("TTTTTTTTTTTTTTTT");
        let read = format!("{}{}", decoy, spike_seq(MIDDLE_1));
        assert_eq!(find_id(&library, Orientation::Forward, &read).as_deref(), Some("SPK1"));
        assert_eq!(find_id(&library, Orientation::Forward, &decoy), None);
    }

    #[test]
    fn test_short_read_is_no_match() {
        let library = library();
        let read = &spike_seq(MIDDLE_1)[..33];
        assert_eq!(
            ReadMatcher::new(&library, Orientation::Forward).find(read.as_bytes()),
            MatchResult::NoMatch
        );
        assert_eq!(
            ReadMatcher::new(&library, Orientation::Forward).find(b""),
            MatchResult::NoMatch
        );
    }

    #[test]
    fn test_single_substitution_is_no_match() {
        let library = library();
        let mut read = spike_seq(MIDDLE_1).into_bytes();
        read[15] = b'T';
        assert_eq!(
            ReadMatcher::new(&library, Orientation::Forward).find(&read),
            MatchResult::NoMatch
        );
    }

    #[test]
    fn test_case_sensitive() {
        let library = library();
        let read = spike_seq(MIDDLE_1).to_lowercase();
        assert_eq!(find_id(&library, Orientation::Forward, &read), None);
    }

    #[test]
    fn test_reverse_orientation() {
        let library = library();
        let read = format!("GGC{}A", revcomp(&spike_seq(MIDDLE_2)));
        assert_eq!(find_id(&library, Orientation::Reverse, &read).as_deref(), Some("SPK2"));
        // The forward set does not know the reverse complement
        assert_eq!(find_id(&library, Orientation::Forward, &read), None);
    }

    proptest! {
        #[test]
        fn embedded_spike_is_found(
            left in "[N]{0,20}",
            right in "[N]{0,20}",
            which in 0usize..4,
        ) {
            let library = library();
            let middles = [MIDDLE_0, MIDDLE_1, MIDDLE_2, MIDDLE_3];
            let read = format!("{}{}{}", left, spike_seq(middles[which]), right);
            let expected = format!("SPK{}", which);
            prop_assert_eq!(find_id(&library, Orientation::Forward, &read), Some(expected));
        }

        #[test]
        fn reads_without_anchor_never_match(read in "[CG]{0,120}") {
            // Every spike prefix contains A and T, so no window can pass the anchor check
            let library = library();
            prop_assert_eq!(find_id(&library, Orientation::Forward, &read), None);
        }
    }
}
