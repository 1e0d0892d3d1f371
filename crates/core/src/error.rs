use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures reported by a [`crate::navigator::Filter`] implementation.
#[derive(Error, Debug)]
pub enum FilterError {
    #[error("no options provided")]
    NoCandidates,

    #[error("terminal error: {}", .0)]
    Terminal(#[from] std::io::Error),

    #[error("unable to run filter: {}", .0)]
    Other(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("Unable to fetch `{}`: {}", .url, .message)]
    Fetch { url: String, message: String },

    #[error("No content was found. Is the content document empty?")]
    EmptyContent,

    #[error("No children were found after filtering.")]
    NoMatchingContent,

    #[error("The chosen option `{}` is not a child of the current group.", .0)]
    UnknownChoice(String),

    #[error("Filter failed: {}", .0)]
    Filter(#[from] FilterError),

    #[error("Unable to emit output: {}", .0)]
    Output(String),

    #[error("Unknown color name: \"{}\"", .0)]
    UnknownColorName(String),

    #[error("STDIO error: {}", .0)]
    Stdio(#[from] std::io::Error),
}

impl Error {
    pub fn yaml_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action,
            file_description,
            path,
            original,
        }
    }

    pub fn io_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description,
            path,
            original,
        }
    }

    pub fn fetch_error(url: &str, message: impl ToString) -> Self {
        Self::Fetch {
            url: url.to_string(),
            message: message.to_string(),
        }
    }

    /// Process exit code for a fatal error, distinct per failure family.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::NoMatchingContent | Self::EmptyContent => 2,
            Self::Filter(_) => 3,
            _ => 1,
        }
    }
}
