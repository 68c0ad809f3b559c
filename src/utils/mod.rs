mod path_utils;

pub use path_utils::append_to_path;
