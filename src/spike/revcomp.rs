///////////////////////////////
/// Complement of one base. A<->T and G<->C; anything else, including N,
/// lowercase and IUPAC codes, passes through unchanged
#[inline(always)]
pub const fn complement(base: char) -> char {
    match base {
        'A' => 'T',
        'T' => 'A',
        'G' => 'C',
        'C' => 'G',
        other => other,
    }
}

///////////////////////////////
/// Reverse complement of a sequence
pub fn revcomp(seq: &str) -> String {
    seq.chars().rev().map(complement).collect()
}
