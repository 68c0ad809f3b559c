///////////////////////////////
/// What to do when one input file fails
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorMode {
    /// Log the failure, continue with the next file
    Continue,
    /// Stop the run at the first failure
    Abort,
}

impl ErrorMode {
    pub fn from_strict(strict: bool) -> ErrorMode {
        if strict {
            ErrorMode::Abort
        } else {
            ErrorMode::Continue
        }
    }
}

///////////////////////////////
/// Run-wide options that are not part of the matching itself
#[derive(Clone, Debug)]
pub struct Config {
    pub error_mode: ErrorMode,
    pub num_threads: usize,
}
