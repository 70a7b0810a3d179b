use anyhow::Result;
use clap::Args;
use std::io::{self, BufRead, Write};

use super::inputs::{describe_plan, gather_inputs, InputArgs};
use crate::pipeline::{plan_outputs, OutputPlan};
use crate::utils::Prompter;

#[derive(Args, Default)]
pub struct PlanCMD {
    #[command(flatten)]
    pub inputs: InputArgs,
}

impl PlanCMD {
    /// Run the commandline option.
    /// Resolves the inputs and lists the outputs, without touching the external tools
    pub fn try_execute(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let mut prompter = Prompter::new(stdin.lock(), io::stdout());
        plan(&self.inputs, &mut prompter)?;
        Ok(())
    }
}

pub fn plan<R: BufRead, W: Write>(
    args: &InputArgs,
    prompter: &mut Prompter<R, W>,
) -> Result<OutputPlan> {
    let inputs = gather_inputs(prompter, args)?;
    let plan = plan_outputs(&inputs.folder, inputs.reference.path(), inputs.reads.path());
    describe_plan(prompter.output(), &inputs, &plan)?;
    Ok(plan)
}
