#![allow(dead_code)]

use std::fs::{self, File};
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use ontalign::runtime::Config;
use ontalign::utils::Prompter;

pub const SAM: &str =
    "@HD\tVN:1.6\tSO:unsorted\n@SQ\tSN:ref\tLN:4\nread1\t0\tref\t1\t60\t4M\t*\t0\t0\tACGT\t!!!!\n";

#[cfg(unix)]
fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    {
        let mut f = File::create(&path).unwrap();
        f.write_all(body.as_bytes()).unwrap();
        f.sync_all().unwrap();
    }
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

/// Stand-ins for minimap2 and samtools that behave just enough like the real thing
#[cfg(unix)]
pub fn fake_tools(dir: &Path) -> (PathBuf, PathBuf) {
    let minimap2 = write_script(
        dir,
        "minimap2",
        "#!/bin/sh\nprintf '@HD\\tVN:1.6\\tSO:unsorted\\n@SQ\\tSN:ref\\tLN:4\\n'\nprintf 'read1\\t0\\tref\\t1\\t60\\t4M\\t*\\t0\\t0\\tACGT\\t!!!!\\n'\n",
    );
    let samtools = write_script(
        dir,
        "samtools",
        r#"#!/bin/sh
case "$1" in
    version) echo "samtools 1.19" ;;
    view) cat ;;
    sort)
        out=""
        while [ $# -gt 0 ]; do
            if [ "$1" = "-o" ]; then out="$2"; fi
            shift
        done
        cat > "$out" ;;
    index)
        for last in "$@"; do :; done
        echo "index" > "$last" ;;
esac
"#,
    );
    (minimap2, samtools)
}

pub fn config_with(minimap2: &Path, samtools: &Path) -> Config {
    Config {
        minimap2: minimap2.to_path_buf(),
        samtools: samtools.to_path_buf(),
        ..Config::default()
    }
}

/// A folder holding plasmid.fasta and sample1.fastq.gz
pub fn data_folder() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("plasmid.fasta"), ">ref\nACGT\n").unwrap();
    fs::write(dir.path().join("sample1.fastq.gz"), b"").unwrap();
    dir
}

pub fn prompter(answers: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
    Prompter::new(Cursor::new(answers.as_bytes().to_vec()), Vec::new())
}

pub fn listing(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
