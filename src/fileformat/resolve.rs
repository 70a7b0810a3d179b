use core::fmt;
use log::debug;
use std::path::{Component, Path, PathBuf};

use crate::runtime::Error;
use crate::utils::strip_quotes;

/// Suffixes peeled off a typed name, in this order and each at most once, before guessing
pub const STRIP_SUFFIXES: &[&str] = &[".gz", ".fa", ".fasta", ".fna", ".fas", ".fastq", ".fq"];

pub const REFERENCE_EXTENSIONS: &[&str] = &[".fa", ".fasta", ".fna", ".fas"];
pub const READS_EXTENSIONS: &[&str] = &[".fastq", ".fq", ".fastq.gz", ".fq.gz"];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FileKind {
    Reference,
    Reads,
}
impl FileKind {
    /// Extensions to try, in order, when the name does not exist as typed
    pub fn candidate_extensions(&self) -> &'static [&'static str] {
        match self {
            FileKind::Reference => REFERENCE_EXTENSIONS,
            FileKind::Reads => READS_EXTENSIONS,
        }
    }
}
impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FileKind::Reference => write!(f, "reference"),
            FileKind::Reads => write!(f, "reads"),
        }
    }
}

/// A file that existed on disk when it was looked up
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResolvedFile {
    pub kind: FileKind,
    pub path: PathBuf,
}
impl ResolvedFile {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Typed name with the known sequence-file suffixes removed
pub fn base_name(name: &str) -> &str {
    let mut base = name;
    for suffix in STRIP_SUFFIXES {
        if let Some(stripped) = base.strip_suffix(suffix) {
            base = stripped;
        }
    }
    base
}

/// True for a single name like "plasmid.fa"; false for anything with a directory part
fn is_plain_file_name(name: &str) -> bool {
    let mut parts = Path::new(name).components();
    matches!((parts.next(), parts.next()), (Some(Component::Normal(_)), None))
        && !name.ends_with(std::path::MAIN_SEPARATOR)
}

/// Find the file the user most likely meant.
/// The name as typed wins; otherwise the kind's extensions are tried on the base name, first hit wins
pub fn resolve(folder: &Path, raw_name: &str, kind: FileKind) -> Result<ResolvedFile, Error> {
    let name = strip_quotes(raw_name.trim());

    //Outputs go next to the inputs, so the inputs must be in the folder itself
    if !name.is_empty() && !is_plain_file_name(name) {
        return Err(Error::not_a_file_name(kind, raw_name));
    }

    let verbatim = folder.join(name);
    if !name.is_empty() && verbatim.is_file() {
        debug!("Found {} file {} as given", kind, verbatim.display());
        return Ok(ResolvedFile {
            kind,
            path: verbatim,
        });
    }

    let base = base_name(name);
    for ext in kind.candidate_extensions() {
        let candidate = folder.join(format!("{}{}", base, ext));
        debug!("Trying {}", candidate.display());
        if candidate.is_file() {
            return Ok(ResolvedFile {
                kind,
                path: candidate,
            });
        }
    }

    Err(Error::file_not_found(kind, raw_name, folder))
}
