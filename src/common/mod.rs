mod consts;

pub use consts::*;
