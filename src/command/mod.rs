pub mod align;
pub mod inputs;
pub mod plan;
pub mod threadcount;

pub use align::check_dependencies;
pub use align::Align;
pub use align::AlignCMD;
pub use align::AlignOutcome;

pub use inputs::gather_inputs;
pub use inputs::InputArgs;
pub use inputs::Inputs;

pub use plan::PlanCMD;

pub use threadcount::determine_thread_count;
