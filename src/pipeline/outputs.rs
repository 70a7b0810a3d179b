use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::fileformat::REFERENCE_EXTENSIONS;

pub const READS_ROOT_SUFFIXES: &[&str] = &[".fastq", ".fq"];

pub const INTERMEDIATE_EXTENSION: &str = "sam";
pub const SORTED_EXTENSION: &str = "sorted.bam";
pub const INDEX_SUFFIX: &str = ".bai";

/// Marks a file still being written. Renamed away once its producer exits cleanly
pub const INCOMPLETE_SUFFIX: &str = ".incomplete";

/// The files a run will write, all next to the inputs
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OutputPlan {
    pub intermediate: PathBuf,
    pub sorted: PathBuf,
    pub index: PathBuf,
}

fn strip_first_suffix<'a>(name: &'a str, suffixes: &[&str]) -> &'a str {
    suffixes
        .iter()
        .find_map(|s| name.strip_suffix(s))
        .unwrap_or(name)
}

pub fn reference_root(file_name: &str) -> &str {
    strip_first_suffix(file_name, REFERENCE_EXTENSIONS)
}

pub fn reads_root(file_name: &str) -> &str {
    let name = file_name.strip_suffix(".gz").unwrap_or(file_name);
    strip_first_suffix(name, READS_ROOT_SUFFIXES)
}

/// Append a suffix to the full file name, unlike with_extension which replaces one
pub fn append_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut s: OsString = path.as_os_str().to_owned();
    s.push(suffix);
    PathBuf::from(s)
}

pub fn incomplete_path(path: &Path) -> PathBuf {
    append_suffix(path, INCOMPLETE_SUFFIX)
}

fn file_name_lossy(p: &Path) -> String {
    p.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Derive output names from the resolved inputs. Pure: nothing is touched on disk
pub fn plan_outputs(folder: &Path, reference: &Path, reads: &Path) -> OutputPlan {
    let reference_name = file_name_lossy(reference);
    let reads_name = file_name_lossy(reads);
    let stem = format!("{}_vs_{}", reference_root(&reference_name), reads_root(&reads_name));

    let intermediate = folder.join(format!("{}.{}", stem, INTERMEDIATE_EXTENSION));
    let sorted = folder.join(format!("{}.{}", stem, SORTED_EXTENSION));
    let index = append_suffix(&sorted, INDEX_SUFFIX);
    OutputPlan {
        intermediate,
        sorted,
        index,
    }
}
