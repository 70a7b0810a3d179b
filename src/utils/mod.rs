mod command_to_string;
mod detect_software;
mod expand_and_resolve_path;
mod prompt;

pub use command_to_string::command_to_string;

pub use detect_software::check_minimap2;
pub use detect_software::check_samtools;
pub use detect_software::check_software;
pub use detect_software::parse_samtools_version;

pub use expand_and_resolve_path::expand_and_resolve_path;
pub use expand_and_resolve_path::normalize_folder;
pub use expand_and_resolve_path::strip_quotes;

pub use prompt::Prompter;
