//! Line-oriented comparison of two transcoder outputs.
//!
//! A diagnostic tool, not part of the transcoding engine: lines are
//! normalized (lowercased, trimmed, whitespace runs collapsed) before
//! comparison, so case and incidental spacing differences introduced by
//! a round trip are ignored. Comparison stops at the shorter file.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::PathBuf,
    process,
};

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "morsecmp",
    version,
    about = "Compare two files line by line after whitespace normalization"
)]
struct Cli {
    /// First file
    file1: PathBuf,

    /// Second file
    file2: PathBuf,
}

struct Diff {
    line: usize,
    left: String,
    right: String,
}

fn normalize(line: &str) -> String {
    line.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn compare(left: impl BufRead, right: impl BufRead) -> io::Result<Vec<Diff>> {
    let mut diffs = Vec::new();
    let mut left_lines = left.lines();
    let mut right_lines = right.lines();
    let mut line = 1;
    while let (Some(left_line), Some(right_line)) = (left_lines.next(), right_lines.next()) {
        let left_line = normalize(&left_line?);
        let right_line = normalize(&right_line?);
        if left_line != right_line {
            diffs.push(Diff {
                line,
                left: left_line,
                right: right_line,
            });
        }
        line += 1;
    }
    Ok(diffs)
}

fn open(path: &PathBuf) -> BufReader<File> {
    match File::open(path) {
        Ok(file) => BufReader::new(file),
        Err(err) => {
            eprintln!("error: cannot open {}: {err}", path.display());
            process::exit(1);
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let left = open(&cli.file1);
    let right = open(&cli.file2);

    match compare(left, right) {
        Ok(diffs) => {
            for (index, diff) in diffs.iter().enumerate() {
                println!(
                    "difference #{index} at line={}:\nfile1_line=[{}]\nfile2_line=[{}]",
                    diff.line, diff.left, diff.right
                );
            }
        }
        Err(err) => {
            eprintln!("error: comparing files: {err}");
            process::exit(1);
        }
    }
}
