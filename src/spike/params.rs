use crate::common::{DEFAULT_ANCHOR_LEN, DEFAULT_SPIKE_LEN};
use crate::runtime::{Error, Result};

///////////////////////////////
/// Window and anchor lengths used when building a library and matching reads
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchConfig {
    spike_len: usize,
    anchor_len: usize,
}

impl MatchConfig {
    pub fn new(spike_len: usize, anchor_len: usize) -> Result<MatchConfig> {
        if spike_len == 0 {
            return Err(Error::invalid_config("spike length must be positive"));
        }
        if anchor_len == 0 {
            return Err(Error::invalid_config("anchor length must be positive"));
        }
        // Prefix and suffix anchors must not overlap
        if anchor_len * 2 > spike_len {
            return Err(Error::invalid_config(format!(
                "anchor length {} does not fit twice into spike length {}",
                anchor_len, spike_len
            )));
        }
        Ok(MatchConfig {
            spike_len,
            anchor_len,
        })
    }

    pub fn spike_len(&self) -> usize {
        self.spike_len
    }

    pub fn anchor_len(&self) -> usize {
        self.anchor_len
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            spike_len: DEFAULT_SPIKE_LEN,
            anchor_len: DEFAULT_ANCHOR_LEN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lengths() {
        let config = MatchConfig::default();
        assert_eq!(config.spike_len(), 34);
        assert_eq!(config.anchor_len(), 9);
    }

    #[test]
    fn test_rejects_overlapping_anchors() {
        assert!(MatchConfig::new(34, 17).is_ok());
        assert!(matches!(
            MatchConfig::new(34, 18),
            Err(Error::InvalidConfig { .. })
        ));
        assert!(MatchConfig::new(0, 0).is_err());
        assert!(MatchConfig::new(20, 0).is_err());
    }
}
