use std::path::PathBuf;

pub const DEFAULT_MINIMAP2: &str = "minimap2";
pub const DEFAULT_SAMTOOLS: &str = "samtools";
pub const DEFAULT_PRESET: &str = "map-ont";

///////////////////////////////
/// Settings for one run, folded together from the command line and environment
#[derive(Clone, Debug)]
pub struct Config {
    pub minimap2: PathBuf,
    pub samtools: PathBuf,
    pub preset: String,
    pub threads: usize,
    pub keep_sam: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            minimap2: PathBuf::from(DEFAULT_MINIMAP2),
            samtools: PathBuf::from(DEFAULT_SAMTOOLS),
            preset: DEFAULT_PRESET.to_string(),
            threads: 1,
            keep_sam: true,
        }
    }
}
