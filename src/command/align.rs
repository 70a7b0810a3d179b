use anyhow::Result;
use clap::Args;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use super::determine_thread_count;
use super::inputs::{describe_plan, gather_inputs, InputArgs};
use crate::pipeline::{plan_outputs, run_pipeline, OutputPlan, Toolchain};
use crate::runtime::{Config, Error};
use crate::utils::{check_minimap2, check_samtools, Prompter};

pub const PROMPT_CONFIRM: &str = "Proceed? [y/N]: ";

#[derive(Args, Default)]
pub struct AlignCMD {
    #[command(flatten)]
    pub inputs: InputArgs,

    #[arg(short = 'y', long = "yes")]
    /// Do not ask for confirmation before running
    pub yes: bool,

    //Thread settings
    #[arg(short = '@', long = "threads", value_parser = clap::value_parser!(usize))]
    pub num_threads_total: Option<usize>,

    #[arg(long = "preset")]
    /// minimap2 preset [default: map-ont]
    pub preset: Option<String>,

    #[arg(long = "minimap2", env = "ONTALIGN_MINIMAP2")]
    /// minimap2 executable [default: minimap2 in $PATH]
    pub path_minimap2: Option<PathBuf>,

    #[arg(long = "samtools", env = "ONTALIGN_SAMTOOLS")]
    /// samtools executable [default: samtools in $PATH]
    pub path_samtools: Option<PathBuf>,

    #[arg(long = "no-keep-sam")]
    /// Delete the intermediate SAM once the sorted BAM is indexed
    pub no_keep_sam: bool,
}

impl AlignCMD {
    /// Run the commandline option
    pub fn try_execute(&mut self) -> Result<()> {
        let config = self.config()?;
        println!("Using threads {}", config.threads);

        let params = Align {
            config,
            inputs: self.inputs.clone(),
            assume_yes: self.yes,
        };

        let stdin = io::stdin();
        let mut prompter = Prompter::new(stdin.lock(), io::stdout());
        match Align::run(&params, &mut prompter)? {
            AlignOutcome::Completed(_) => log::info!("Align has finished succesfully"),
            AlignOutcome::Aborted => log::info!("Align was aborted by the user"),
        }
        Ok(())
    }

    pub fn config(&self) -> Result<Config> {
        let defaults = Config::default();
        Ok(Config {
            minimap2: self.path_minimap2.clone().unwrap_or(defaults.minimap2),
            samtools: self.path_samtools.clone().unwrap_or(defaults.samtools),
            preset: self.preset.clone().unwrap_or(defaults.preset),
            threads: determine_thread_count(self.num_threads_total)?,
            keep_sam: !self.no_keep_sam,
        })
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum AlignOutcome {
    Completed(OutputPlan),
    Aborted,
}

/// Both tools must be reachable before anything is planned or asked
pub fn check_dependencies(config: &Config) -> Result<Toolchain, Error> {
    let minimap2 = check_minimap2(&config.minimap2)?;
    let samtools = check_samtools(&config.samtools)?;
    Ok(Toolchain { minimap2, samtools })
}

pub struct Align {
    pub config: Config,
    pub inputs: InputArgs,
    pub assume_yes: bool,
}

impl Align {
    /// Run the whole interactive flow: gather, resolve, check tools, plan, confirm, align
    pub fn run<R: BufRead, W: Write>(
        params: &Align,
        prompter: &mut Prompter<R, W>,
    ) -> Result<AlignOutcome> {
        let inputs = gather_inputs(prompter, &params.inputs)?;

        let tools = check_dependencies(&params.config)?;

        let plan = plan_outputs(&inputs.folder, inputs.reference.path(), inputs.reads.path());
        describe_plan(prompter.output(), &inputs, &plan)?;

        if !params.assume_yes && !prompter.confirm(PROMPT_CONFIRM)? {
            writeln!(prompter.output(), "Aborted by user.")?;
            return Ok(AlignOutcome::Aborted);
        }

        run_pipeline(
            &tools,
            &params.config,
            inputs.reference.path(),
            inputs.reads.path(),
            &plan,
        )?;

        let out = prompter.output();
        writeln!(out, "Done.")?;
        if params.config.keep_sam {
            writeln!(out, "  SAM: {}", plan.intermediate.display())?;
        }
        writeln!(out, "  BAM: {}", plan.sorted.display())?;
        writeln!(out, "  BAI: {}", plan.index.display())?;
        Ok(AlignOutcome::Completed(plan))
    }
}
