use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("File at {:?} not found.", path)]
    FileNotFound { path: std::path::PathBuf },

    #[error("File at {:?} is invalid{}.", path, Error::format_msg_as_detail(msg))]
    FileNotValid {
        path: std::path::PathBuf,
        msg: Option<String>,
    },

    #[error("Failed parsing {}{}", context, Error::format_msg_as_detail(msg))]
    ParseError {
        context: String,
        msg: Option<String>,
    },

    #[error("Spike library {:?} is inconsistent: {}", path, msg)]
    InvalidSpikeLibrary { path: std::path::PathBuf, msg: String },

    #[error("Invalid configuration: {}", msg)]
    InvalidConfig { msg: String },

    #[error("I/O error on {:?}: {}", path, source)]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    #[cold]
    pub fn file_not_found<P: AsRef<std::path::Path>>(path: P) -> Self {
        Error::FileNotFound {
            path: path.as_ref().to_path_buf(),
        }
    }

    #[cold]
    pub fn file_not_valid<P: AsRef<std::path::Path>, M: Into<String>>(
        path: P,
        msg: Option<M>,
    ) -> Self {
        Error::FileNotValid {
            path: path.as_ref().to_path_buf(),
            msg: msg.map(|m| m.into()),
        }
    }

    #[cold]
    pub fn parse_error<C: Into<String>, M: Into<String>>(context: C, msg: Option<M>) -> Self {
        Error::ParseError {
            context: context.into(),
            msg: msg.map(|m| m.into()),
        }
    }

    #[cold]
    pub fn invalid_spike_library<P: AsRef<std::path::Path>, M: Into<String>>(
        path: P,
        msg: M,
    ) -> Self {
        Error::InvalidSpikeLibrary {
            path: path.as_ref().to_path_buf(),
            msg: msg.into(),
        }
    }

    #[cold]
    pub fn invalid_config<M: Into<String>>(msg: M) -> Self {
        Error::InvalidConfig { msg: msg.into() }
    }

    /// Wrap an I/O error, turning NotFound into the dedicated variant
    #[cold]
    pub fn io<P: AsRef<std::path::Path>>(path: P, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            return Error::file_not_found(path);
        }
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn format_msg_as_detail(msg: &Option<String>) -> String {
        match msg {
            Some(m) => format!(" ({})", m),
            None => String::new(),
        }
    }
}
