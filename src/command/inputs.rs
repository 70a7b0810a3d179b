use anyhow::Result;
use clap::Args;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::fileformat::{resolve, FileKind, ResolvedFile};
use crate::pipeline::OutputPlan;
use crate::runtime::Error;
use crate::utils::{normalize_folder, strip_quotes, Prompter};

pub const PROMPT_FOLDER: &str = "Folder containing the reference and reads: ";
pub const PROMPT_REFERENCE: &str = "Reference file name (extension optional): ";
pub const PROMPT_READS: &str = "ONT reads file name (extension optional): ";

/// Answers that can be given up front instead of at the prompt
#[derive(Args, Clone, Debug, Default)]
pub struct InputArgs {
    #[arg(short = 'd', long = "folder")]
    /// Folder holding the reference and the reads
    pub folder: Option<String>,

    #[arg(short = 'r', long = "reference")]
    /// Reference FASTA, with or without extension
    pub reference: Option<String>,

    #[arg(short = 'q', long = "reads")]
    /// ONT FASTQ, with or without extension
    pub reads: Option<String>,
}

pub struct Inputs {
    pub folder: PathBuf,
    pub reference: ResolvedFile,
    pub reads: ResolvedFile,
}

fn ask<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    preset: Option<&str>,
    question: &str,
    what: &str,
) -> Result<String> {
    let answer = prompter.ask_required(preset, question, what)?;
    //A pasted pair of quotes with nothing inside is still nothing
    if strip_quotes(&answer).trim().is_empty() {
        return Err(Error::empty_input(what).into());
    }
    Ok(answer)
}

/// Ask for the folder and both names, then resolve them to files on disk
pub fn gather_inputs<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    args: &InputArgs,
) -> Result<Inputs> {
    let raw_folder = ask(prompter, args.folder.as_deref(), PROMPT_FOLDER, "folder")?;
    let raw_reference = ask(
        prompter,
        args.reference.as_deref(),
        PROMPT_REFERENCE,
        "reference file name",
    )?;
    let raw_reads = ask(prompter, args.reads.as_deref(), PROMPT_READS, "reads file name")?;

    let folder = normalize_folder(&raw_folder)?;
    let reference = resolve(&folder, &raw_reference, FileKind::Reference)?;
    let reads = resolve(&folder, &raw_reads, FileKind::Reads)?;
    log::info!("Reference: {}", reference.path().display());
    log::info!("Reads: {}", reads.path().display());

    Ok(Inputs {
        folder,
        reference,
        reads,
    })
}

pub fn describe_plan<W: Write>(out: &mut W, inputs: &Inputs, plan: &OutputPlan) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Reference:  {}", inputs.reference.path().display())?;
    writeln!(out, "Reads:      {}", inputs.reads.path().display())?;
    writeln!(out, "Will write:")?;
    writeln!(out, "  {}", plan.intermediate.display())?;
    writeln!(out, "  {}", plan.sorted.display())?;
    writeln!(out, "  {}", plan.index.display())?;
    Ok(())
}
