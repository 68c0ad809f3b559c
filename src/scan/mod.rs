mod params;
mod scanner;
mod stage;

pub use params::ScanParams;
pub use scanner::{process_file, scan_file};
pub use stage::OutputStage;
