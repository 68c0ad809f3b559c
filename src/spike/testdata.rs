//! Small spike libraries shared by the unit tests

pub const PREFIX: &str = "ACGTACGTA";
pub const SUFFIX: &str = "TTGCAGCAT";

pub const MIDDLE_0: &str = "CCCCCCCCAAAAAAAA";
pub const MIDDLE_1: &str = "GGGGCCCCAAAATTTT";
pub const MIDDLE_2: &str = "CACACACAGTGTGTGT";
pub const MIDDLE_3: &str = "ATATATATCGCGCGCG";

/// A 34bp spike with the shared flanks
pub fn spike_seq(middle: &str) -> String {
    format!("{}{}{}", PREFIX, middle, SUFFIX)
}

pub fn library_text() -> String {
    format!(
        "SPK0 {}\nSPK1 {}\nSPK2 {}\nSPK3 {}\n",
        spike_seq(MIDDLE_0),
        spike_seq(MIDDLE_1),
        spike_seq(MIDDLE_2),
        spike_seq(MIDDLE_3)
    )
}

pub fn library() -> crate::spike::SpikeLibrary {
    crate::spike::SpikeLibrary::from_reader(
        library_text().as_bytes(),
        std::path::Path::new("spikes.txt"),
        &crate::spike::MatchConfig::default(),
    )
    .unwrap()
}
