mod resolve;

pub use resolve::base_name;
pub use resolve::resolve;
pub use resolve::FileKind;
pub use resolve::ResolvedFile;
pub use resolve::READS_EXTENSIONS;
pub use resolve::REFERENCE_EXTENSIONS;
pub use resolve::STRIP_SUFFIXES;
