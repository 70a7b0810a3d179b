use thiserror::Error;

use crate::fileformat::FileKind;
use crate::pipeline::Stage;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No {} given.", what)]
    EmptyInput { what: String },

    #[error("Folder {:?} not found or not a directory.", path)]
    FolderNotFound { path: std::path::PathBuf },

    #[error(
        "No {} file matching '{}' in {:?}. Tried the name as given, then the extensions {}.",
        kind,
        raw,
        folder,
        tried.join(", ")
    )]
    FileNotFound {
        kind: FileKind,
        raw: String,
        folder: std::path::PathBuf,
        tried: Vec<String>,
    },

    #[error(
        "The {} file '{}' must be named by its file name inside the folder, not by a path.",
        kind,
        raw
    )]
    NotAFileName { kind: FileKind, raw: String },

    #[error(
        "Utility '{}' is either not installed or not in $PATH. {}",
        tool,
        hint
    )]
    DependencyMissing { tool: String, hint: String },

    #[error("Pipeline stage '{}' failed{}", stage, Error::format_msg_as_detail(msg))]
    PipelineStageFailed { stage: Stage, msg: Option<String> },
}

impl Error {
    #[cold]
    pub fn empty_input<W: Into<String>>(what: W) -> Self {
        Error::EmptyInput { what: what.into() }
    }

    #[cold]
    pub fn folder_not_found<P: AsRef<std::path::Path>>(path: P) -> Self {
        Error::FolderNotFound {
            path: path.as_ref().to_path_buf(),
        }
    }

    #[cold]
    pub fn file_not_found<R: Into<String>, P: AsRef<std::path::Path>>(
        kind: FileKind,
        raw: R,
        folder: P,
    ) -> Self {
        Error::FileNotFound {
            kind,
            raw: raw.into(),
            folder: folder.as_ref().to_path_buf(),
            tried: kind.candidate_extensions().iter().map(|e| e.to_string()).collect(),
        }
    }

    #[cold]
    pub fn not_a_file_name<R: Into<String>>(kind: FileKind, raw: R) -> Self {
        Error::NotAFileName {
            kind,
            raw: raw.into(),
        }
    }

    #[cold]
    pub fn dependency_missing<T: Into<String>, H: Into<String>>(tool: T, hint: H) -> Self {
        Error::DependencyMissing {
            tool: tool.into(),
            hint: hint.into(),
        }
    }

    #[cold]
    pub fn pipeline_stage_failed<M: Into<String>>(stage: Stage, msg: Option<M>) -> Self {
        Error::PipelineStageFailed {
            stage,
            msg: msg.map(|m| m.into()),
        }
    }

    pub fn format_msg_as_detail(msg: &Option<String>) -> String {
        match msg {
            Some(m) => format!(" ({})", m),
            None => String::new(),
        }
    }
}
