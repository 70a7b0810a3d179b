use log::debug;
use log::info;
use log::warn;
use semver::{Version, VersionReq};
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::runtime::Error;

pub const HINT_MINIMAP2: &str =
    "Install it with 'conda install -c bioconda minimap2' or from https://github.com/lh3/minimap2";
pub const HINT_SAMTOOLS: &str =
    "Install it with 'conda install -c bioconda samtools' or from https://www.htslib.org";

/// Oldest samtools whose index takes both -@ and an explicit output path
pub const SAMTOOLS_VERSION_REQ: &str = ">=1.10";

/// Locate an executable, either given as a path or looked up in $PATH
pub fn check_software(program: &Path, hint: &str) -> Result<PathBuf, Error> {
    debug!("Checking for {}", program.display());
    match which::which(program) {
        Ok(found) => {
            info!("Found {} at {}", program.display(), found.display());
            Ok(found)
        }
        Err(e) => {
            debug!("Lookup of {} failed: {}", program.display(), e);
            Err(Error::dependency_missing(
                program.display().to_string(),
                hint,
            ))
        }
    }
}

pub fn check_minimap2(program: &Path) -> Result<PathBuf, Error> {
    check_software(program, HINT_MINIMAP2)
}

/// Locate samtools and warn if it is too old for the commands we issue.
/// An unreadable version is only reported, never fatal
pub fn check_samtools(program: &Path) -> Result<PathBuf, Error> {
    let found = check_software(program, HINT_SAMTOOLS)?;

    match Command::new(&found).arg("version").output() {
        Ok(output) => match parse_samtools_version(&String::from_utf8_lossy(&output.stdout)) {
            Some(version) if samtools_recent_enough(&version) => {
                debug!("Samtools version {} is recent enough", version);
            }
            Some(version) => {
                warn!(
                    "Samtools {} found, but {} is recommended; indexing may fail",
                    version, SAMTOOLS_VERSION_REQ
                );
            }
            None => {
                warn!("Could not determine the samtools version");
            }
        },
        Err(e) => {
            warn!("Could not run '{} version': {}", found.display(), e);
        }
    }
    Ok(found)
}

pub fn samtools_recent_enough(version: &Version) -> bool {
    VersionReq::parse(SAMTOOLS_VERSION_REQ).map_or(true, |req| req.matches(version))
}

/// Pick the version out of the first line of `samtools version`, e.g. "samtools 1.18" or "samtools 1.21-3-g1234".
/// Missing minor/patch components are taken as 0
pub fn parse_samtools_version(text: &str) -> Option<Version> {
    let token = text.lines().next()?.split_whitespace().last()?;
    let numeric: String = token
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let mut parts = numeric.split('.').filter(|p| !p.is_empty());
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next().map_or(Some(0), |p| p.parse().ok())?;
    let patch = parts.next().map_or(Some(0), |p| p.parse().ok())?;
    Some(Version::new(major, minor, patch))
}
