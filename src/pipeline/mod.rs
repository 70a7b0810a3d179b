mod outputs;
mod runner;

pub use outputs::append_suffix;
pub use outputs::incomplete_path;
pub use outputs::plan_outputs;
pub use outputs::reads_root;
pub use outputs::reference_root;
pub use outputs::OutputPlan;
pub use outputs::INCOMPLETE_SUFFIX;

pub use runner::align_command;
pub use runner::index_command;
pub use runner::run_pipeline;
pub use runner::sort_command;
pub use runner::view_command;
pub use runner::Stage;
pub use runner::Toolchain;
