use anyhow::{Context, Result};
use core::fmt;
use log::{debug, error, info};
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, ChildStdout, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::outputs::{incomplete_path, OutputPlan};
use crate::runtime::{Config, Error};
use crate::utils::command_to_string;

const TEE_BUFFER_SIZE: usize = 64 * 1024;
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Stage {
    Align,
    Tee,
    View,
    Sort,
    Index,
}
impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Stage::Align => "minimap2 align",
            Stage::Tee => "tee to SAM",
            Stage::View => "samtools view",
            Stage::Sort => "samtools sort",
            Stage::Index => "samtools index",
        };
        write!(f, "{}", name)
    }
}

/// Executables located by the dependency check
#[derive(Clone, Debug)]
pub struct Toolchain {
    pub minimap2: PathBuf,
    pub samtools: PathBuf,
}

pub fn align_command(tools: &Toolchain, config: &Config, reference: &Path, reads: &Path) -> Command {
    let mut cmd = Command::new(&tools.minimap2);
    cmd.arg("-ax")
        .arg(&config.preset)
        .arg("--secondary=no")
        .arg("-t")
        .arg(format!("{}", config.threads))
        .arg(reference)
        .arg(reads);
    cmd
}

pub fn view_command(tools: &Toolchain, config: &Config) -> Command {
    let mut cmd = Command::new(&tools.samtools);
    cmd.arg("view")
        .arg("-b")
        .arg("-@")
        .arg(format!("{}", config.threads))
        .arg("-");
    cmd
}

pub fn sort_command(tools: &Toolchain, config: &Config, path_out: &Path) -> Command {
    let mut cmd = Command::new(&tools.samtools);
    cmd.arg("sort")
        .arg("-@")
        .arg(format!("{}", config.threads))
        .arg("-O")
        .arg("bam")
        .arg("-o")
        .arg(path_out)
        .arg("-");
    cmd
}

pub fn index_command(tools: &Toolchain, config: &Config, path_bam: &Path, path_index: &Path) -> Command {
    let mut cmd = Command::new(&tools.samtools);
    cmd.arg("index")
        .arg("-@")
        .arg(format!("{}", config.threads))
        .arg(path_bam)
        .arg(path_index);
    cmd
}

struct StageFailure {
    stage: Stage,
    msg: String,
    /// Died because a neighbour in the pipe went away, not the root cause
    collateral: bool,
}

#[cfg(unix)]
fn killed_by_sigpipe(status: &ExitStatus) -> bool {
    use std::os::unix::process::ExitStatusExt;
    status.signal() == Some(13)
}

#[cfg(not(unix))]
fn killed_by_sigpipe(_status: &ExitStatus) -> bool {
    false
}

fn check_status(stage: Stage, status: io::Result<ExitStatus>) -> Option<StageFailure> {
    match status {
        Ok(status) if status.success() => {
            debug!("{} finished", stage);
            None
        }
        Ok(status) => Some(StageFailure {
            stage,
            msg: format!("{}", status),
            collateral: killed_by_sigpipe(&status),
        }),
        Err(e) => Some(StageFailure {
            stage,
            msg: format!("could not wait for process: {}", e),
            collateral: false,
        }),
    }
}

fn copy_failure(joined: thread::Result<io::Result<u64>>) -> Option<StageFailure> {
    match joined {
        Ok(Ok(bytes)) => {
            debug!("Copied {} bytes of alignments", bytes);
            None
        }
        Ok(Err(e)) => Some(StageFailure {
            stage: Stage::Tee,
            collateral: e.kind() == io::ErrorKind::BrokenPipe,
            msg: e.to_string(),
        }),
        Err(_) => Some(StageFailure {
            stage: Stage::Tee,
            msg: "copy thread panicked".to_string(),
            collateral: false,
        }),
    }
}

/// Wait for the processes and the copy thread, listing failures in the order the stages ended.
/// A stage that breaks takes its neighbours down after it, whichever side of the pipe they are on
fn wait_in_exit_order(
    mut pending: Vec<(Stage, Child)>,
    copier: JoinHandle<io::Result<u64>>,
) -> Vec<StageFailure> {
    let mut failures = Vec::new();
    let mut copier = Some(copier);
    loop {
        if copier.as_ref().map_or(false, |h| h.is_finished()) {
            if let Some(handle) = copier.take() {
                failures.extend(copy_failure(handle.join()));
            }
        }

        let mut i = 0;
        while i < pending.len() {
            match pending[i].1.try_wait() {
                Ok(None) => i += 1,
                Ok(Some(status)) => {
                    let (stage, _) = pending.remove(i);
                    failures.extend(check_status(stage, Ok(status)));
                }
                Err(e) => {
                    let (stage, _) = pending.remove(i);
                    failures.extend(check_status(stage, Err(e)));
                }
            }
        }

        if pending.is_empty() && copier.is_none() {
            return failures;
        }
        thread::sleep(WAIT_POLL_INTERVAL);
    }
}

/// Turn all failed stages into one error, blaming the earliest failure that did not merely die of a broken pipe
fn report_failures(failures: Vec<StageFailure>) -> Result<()> {
    if failures.is_empty() {
        return Ok(());
    }
    for f in &failures {
        error!("Stage '{}' failed: {}", f.stage, f.msg);
    }

    let primary = failures
        .iter()
        .find(|f| !f.collateral)
        .unwrap_or(&failures[0]);
    let others: Vec<String> = failures
        .iter()
        .filter(|f| f.stage != primary.stage)
        .map(|f| f.stage.to_string())
        .collect();
    let msg = if others.is_empty() {
        primary.msg.clone()
    } else {
        format!("{}; also failed: {}", primary.msg, others.join(", "))
    };
    Err(Error::pipeline_stage_failed(primary.stage, Some(msg)).into())
}

fn spawn_stage(stage: Stage, mut cmd: Command) -> Result<Child> {
    info!("Running {}", command_to_string(&cmd));
    cmd.spawn().map_err(|e| {
        anyhow::Error::from(Error::pipeline_stage_failed(
            stage,
            Some(format!("could not start: {}", e)),
        ))
    })
}

fn kill_all(running: &mut [Child]) {
    for child in running.iter_mut() {
        let _ = child.kill();
        let _ = child.wait();
    }
}

/// Copy the aligner output both to the SAM file and into samtools view
fn tee(mut source: ChildStdout, file: File, mut sink: ChildStdin) -> io::Result<u64> {
    let mut file = BufWriter::new(file);
    let mut buf = vec![0u8; TEE_BUFFER_SIZE];
    let mut total: u64 = 0;
    loop {
        let n = match source.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(io::Error::new(e.kind(), format!("reading aligner output: {}", e))),
        };
        file.write_all(&buf[..n])
            .map_err(|e| io::Error::new(e.kind(), format!("writing SAM: {}", e)))?;
        sink.write_all(&buf[..n])
            .map_err(|e| io::Error::new(e.kind(), format!("feeding samtools view: {}", e)))?;
        total += n as u64;
    }
    file.flush()
        .map_err(|e| io::Error::new(e.kind(), format!("writing SAM: {}", e)))?;
    //Dropping sink here closes the pipe so samtools view sees the end of input
    Ok(total)
}

/// minimap2 | tee SAM | samtools view | samtools sort, with every exit status checked
fn align_and_sort(
    tools: &Toolchain,
    config: &Config,
    reference: &Path,
    reads: &Path,
    sam_file: File,
    path_bam: &Path,
) -> Result<()> {
    let mut running: Vec<Child> = Vec::with_capacity(3);

    let mut cmd = align_command(tools, config, reference, reads);
    cmd.stdout(Stdio::piped());
    running.push(spawn_stage(Stage::Align, cmd)?);

    let mut cmd = view_command(tools, config);
    cmd.stdin(Stdio::piped()).stdout(Stdio::piped());
    match spawn_stage(Stage::View, cmd) {
        Ok(child) => running.push(child),
        Err(e) => {
            kill_all(&mut running);
            return Err(e);
        }
    }

    //The Command holding the pipe is dropped inside spawn_stage, so only sort keeps the read end
    let view_stdout = running[1].stdout.take();
    let mut cmd = sort_command(tools, config, path_bam);
    if let Some(out) = view_stdout {
        cmd.stdin(Stdio::from(out));
    }
    match spawn_stage(Stage::Sort, cmd) {
        Ok(child) => running.push(child),
        Err(e) => {
            kill_all(&mut running);
            return Err(e);
        }
    }

    let (aligner_stdout, view_stdin) = match (running[0].stdout.take(), running[1].stdin.take()) {
        (Some(out), Some(inp)) => (out, inp),
        _ => {
            kill_all(&mut running);
            anyhow::bail!("Pipes between pipeline stages were not set up");
        }
    };
    let tee_handle = thread::spawn(move || tee(aligner_stdout, sam_file, view_stdin));

    let stages: Vec<(Stage, Child)> = [Stage::Align, Stage::View, Stage::Sort]
        .into_iter()
        .zip(running)
        .collect();
    let failures = wait_in_exit_order(stages, tee_handle);
    report_failures(failures)
}

fn build_index(tools: &Toolchain, config: &Config, path_bam: &Path, path_index: &Path) -> Result<()> {
    let cmd = index_command(tools, config, path_bam, path_index);
    let mut child = spawn_stage(Stage::Index, cmd)?;
    let failure = check_status(Stage::Index, child.wait());
    report_failures(failure.into_iter().collect())
}

fn remove_partial(paths: &[&Path]) {
    for p in paths {
        if p.exists() {
            match fs::remove_file(p) {
                Ok(()) => debug!("Removed partial output {}", p.display()),
                Err(e) => error!("Could not remove partial output {}: {}", p.display(), e),
            }
        }
    }
}

fn promote(from: &Path, to: &Path) -> Result<()> {
    fs::rename(from, to)
        .with_context(|| format!("Failed to move {} to {}", from.display(), to.display()))
}

/// Run the whole alignment. Outputs are written under an .incomplete name and only get
/// their final name once every stage producing them has exited cleanly
pub fn run_pipeline(
    tools: &Toolchain,
    config: &Config,
    reference: &Path,
    reads: &Path,
    plan: &OutputPlan,
) -> Result<()> {
    let sam_partial = incomplete_path(&plan.intermediate);
    let bam_partial = incomplete_path(&plan.sorted);
    let bai_partial = incomplete_path(&plan.index);

    let sam_file = File::create(&sam_partial)
        .with_context(|| format!("Failed to create {}", sam_partial.display()))?;

    if let Err(e) = align_and_sort(tools, config, reference, reads, sam_file, &bam_partial) {
        remove_partial(&[&sam_partial, &bam_partial]);
        return Err(e);
    }
    promote(&sam_partial, &plan.intermediate)?;
    promote(&bam_partial, &plan.sorted)?;
    info!("Sorted alignment written to {}", plan.sorted.display());

    if let Err(e) = build_index(tools, config, &plan.sorted, &bai_partial) {
        remove_partial(&[&bai_partial]);
        return Err(e);
    }
    promote(&bai_partial, &plan.index)?;

    if !config.keep_sam {
        fs::remove_file(&plan.intermediate)
            .with_context(|| format!("Failed to remove {}", plan.intermediate.display()))?;
        info!("Removed intermediate {}", plan.intermediate.display());
    }
    Ok(())
}
