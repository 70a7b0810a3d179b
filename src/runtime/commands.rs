use std::fmt;

use clap::Subcommand;

use crate::command;

///////////////////////////////
/// Possible subcommands to parse
#[derive(Subcommand)]
pub enum Commands {
    /// Resolve the inputs, confirm, then align, sort and index (default)
    Align(command::AlignCMD),
    /// Resolve the inputs and print the files a run would write, without running anything
    Plan(command::PlanCMD),
}

impl fmt::Debug for Commands {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cmd = match self {
            Commands::Align(_) => "Align",
            Commands::Plan(_) => "Plan",
        };
        write!(f, "{}", cmd)
    }
}
