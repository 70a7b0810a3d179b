mod common;

use std::fs;
use std::path::Path;

use ontalign::command::{Align, AlignOutcome, InputArgs};
use ontalign::fileformat::FileKind;
use ontalign::runtime::{Config, Error};

use common::*;

fn answers(folder: &Path, rest: &str) -> String {
    format!("{}\n{}", folder.display(), rest)
}

fn align(config: Config) -> Align {
    Align {
        config,
        inputs: InputArgs::default(),
        assume_yes: false,
    }
}

fn domain_error(err: &anyhow::Error) -> &Error {
    err.downcast_ref::<Error>()
        .unwrap_or_else(|| panic!("not a domain error: {:#}", err))
}

#[cfg(unix)]
#[test]
fn declining_writes_nothing() {
    let tools = tempfile::tempdir().unwrap();
    let (minimap2, samtools) = fake_tools(tools.path());
    let data = data_folder();
    let before = listing(data.path());

    for reply in ["n\n", "\n", "yes\n", ""] {
        let mut p = prompter(&answers(data.path(), &format!("plasmid\nsample1\n{}", reply)));
        let outcome = Align::run(&align(config_with(&minimap2, &samtools)), &mut p).unwrap();
        assert_eq!(outcome, AlignOutcome::Aborted);

        let shown = String::from_utf8(p.into_output()).unwrap();
        assert!(shown.contains("plasmid_vs_sample1.sam"));
        assert!(shown.contains("plasmid_vs_sample1.sorted.bam"));
        assert!(shown.contains("plasmid_vs_sample1.sorted.bam.bai"));
        assert!(shown.contains("Aborted by user."));
    }
    assert_eq!(listing(data.path()), before);
}

#[cfg(unix)]
#[test]
fn accepting_runs_the_pipeline() {
    let tools = tempfile::tempdir().unwrap();
    let (minimap2, samtools) = fake_tools(tools.path());
    let data = data_folder();

    let mut p = prompter(&answers(data.path(), "\"plasmid.fasta\"\nsample1.fastq\nY\n"));
    let outcome = Align::run(&align(config_with(&minimap2, &samtools)), &mut p).unwrap();

    let plan = match outcome {
        AlignOutcome::Completed(plan) => plan,
        other => panic!("unexpected outcome {:?}", other),
    };
    assert_eq!(plan.intermediate, data.path().join("plasmid_vs_sample1.sam"));
    assert_eq!(fs::read_to_string(&plan.intermediate).unwrap(), SAM);
    assert_eq!(fs::read_to_string(&plan.sorted).unwrap(), SAM);
    assert!(plan.index.exists());
    assert_eq!(
        listing(data.path()),
        vec![
            "plasmid.fasta",
            "plasmid_vs_sample1.sam",
            "plasmid_vs_sample1.sorted.bam",
            "plasmid_vs_sample1.sorted.bam.bai",
            "sample1.fastq.gz",
        ]
    );

    let shown = String::from_utf8(p.into_output()).unwrap();
    assert!(shown.contains("Done."));
}

#[cfg(unix)]
#[test]
fn assume_yes_and_preset_answers_skip_all_prompts() {
    let tools = tempfile::tempdir().unwrap();
    let (minimap2, samtools) = fake_tools(tools.path());
    let data = data_folder();

    let params = Align {
        config: config_with(&minimap2, &samtools),
        inputs: InputArgs {
            folder: Some(format!("{}/", data.path().display())),
            reference: Some("plasmid".to_string()),
            reads: Some("sample1".to_string()),
        },
        assume_yes: true,
    };
    let mut p = prompter("");
    let outcome = Align::run(&params, &mut p).unwrap();
    assert!(matches!(outcome, AlignOutcome::Completed(_)));

    let shown = String::from_utf8(p.into_output()).unwrap();
    assert!(!shown.contains("Proceed?"));
    assert!(!shown.contains("Folder containing"));
}

#[test]
fn missing_dependency_stops_before_the_plan() {
    let data = data_folder();
    let before = listing(data.path());
    let config = config_with(
        &data.path().join("no-such-minimap2"),
        &data.path().join("no-such-samtools"),
    );

    let mut p = prompter(&answers(data.path(), "plasmid\nsample1\ny\n"));
    let err = Align::run(&align(config), &mut p).unwrap_err();
    match domain_error(&err) {
        Error::DependencyMissing { tool, .. } => assert!(tool.ends_with("no-such-minimap2")),
        other => panic!("unexpected error {:?}", other),
    }

    let shown = String::from_utf8(p.into_output()).unwrap();
    assert!(!shown.contains("Will write"));
    assert!(!shown.contains("Proceed?"));
    assert_eq!(listing(data.path()), before);
}

#[cfg(unix)]
#[test]
fn missing_samtools_stops_before_the_plan() {
    let tools = tempfile::tempdir().unwrap();
    let (minimap2, _) = fake_tools(tools.path());
    let data = data_folder();
    let before = listing(data.path());
    let config = config_with(&minimap2, &tools.path().join("no-such-samtools"));

    let mut p = prompter(&answers(data.path(), "plasmid\nsample1\ny\n"));
    let err = Align::run(&align(config), &mut p).unwrap_err();
    match domain_error(&err) {
        Error::DependencyMissing { tool, hint } => {
            assert!(tool.ends_with("no-such-samtools"));
            assert!(hint.contains("samtools"));
        }
        other => panic!("unexpected error {:?}", other),
    }

    let shown = String::from_utf8(p.into_output()).unwrap();
    assert!(!shown.contains("Will write"));
    assert!(!shown.contains("Proceed?"));
    assert_eq!(listing(data.path()), before);
}

#[test]
fn input_outside_the_folder_is_refused() {
    let data = data_folder();
    let elsewhere = data_folder();
    let typed = elsewhere.path().join("plasmid.fasta");

    let mut p = prompter(&answers(data.path(), &format!("{}\nsample1\ny\n", typed.display())));
    let err = Align::run(&align(Config::default()), &mut p).unwrap_err();
    assert!(matches!(
        domain_error(&err),
        Error::NotAFileName {
            kind: FileKind::Reference,
            ..
        }
    ));
}

#[test]
fn unresolved_reads_are_reported_before_tools_are_checked() {
    let data = data_folder();
    let config = config_with(Path::new("no-such-minimap2"), Path::new("no-such-samtools"));

    let mut p = prompter(&answers(data.path(), "plasmid\nsample2\ny\n"));
    let err = Align::run(&align(config), &mut p).unwrap_err();
    match domain_error(&err) {
        Error::FileNotFound { kind, raw, .. } => {
            assert_eq!(*kind, FileKind::Reads);
            assert_eq!(raw, "sample2");
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn empty_answer_is_rejected() {
    let data = data_folder();
    let mut p = prompter(&answers(data.path(), "\n"));
    let err = Align::run(&align(Config::default()), &mut p).unwrap_err();
    assert!(matches!(domain_error(&err), Error::EmptyInput { .. }));
}

#[test]
fn missing_folder_is_rejected() {
    let data = data_folder();
    let missing = data.path().join("elsewhere");
    let mut p = prompter(&answers(&missing, "plasmid\nsample1\ny\n"));
    let err = Align::run(&align(Config::default()), &mut p).unwrap_err();
    assert!(matches!(domain_error(&err), Error::FolderNotFound { .. }));
}
