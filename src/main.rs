use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use log::{debug, info};
use memmap2::Mmap;
use rayon::prelude::*;
use serde::Serialize;

use nepali_unicode::utils;
use nepali_unicode::{Conversion, ConverterConfig, LegacyFont, TargetFont};

const SAMPLE_TEXT: &str = "g]kfn ;/sf/sf] cfly{s jif{ @)*! sf] ah]6 ;+;bdf k]z ul/Psf] 5 .";

#[derive(Parser, Debug)]
#[clap(author, about, version)]
struct Cli {
    /// Legacy text to convert
    text: Vec<String>,

    /// Font the input was typed in
    #[clap(long, default_value = "preeti")]
    from: LegacyFont,

    /// unicode, preeti or hisab
    #[clap(long, default_value = "unicode")]
    to: TargetFont,

    /// Input files, converted line by line
    #[clap(long, alias = "file", num_args = 1..)]
    input: Vec<PathBuf>,

    #[clap(long)]
    output: Option<PathBuf>,

    #[clap(long, default_value_t = 4)]
    threads: usize,

    /// Stop after this many lines in total
    #[clap(long)]
    limit: Option<usize>,

    #[clap(long, alias = "bench")]
    benchmark: bool,

    /// JSON converter config; flags below override it
    #[clap(long)]
    config: Option<PathBuf>,

    #[clap(long)]
    no_norm: bool,

    #[clap(long)]
    no_reph: bool,

    #[clap(long)]
    strip_tags: bool,

    /// One JSON record per line instead of text blocks
    #[clap(long)]
    json: bool,
}

#[derive(Serialize)]
struct Record<'a> {
    original: &'a str,
    converted: &'a str,
}

fn load_config(cli: &Cli) -> Result<ConverterConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let json = fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
            ConverterConfig::from_json(&json).with_context(|| format!("parsing config {}", path.display()))?
        }
        None => ConverterConfig::default(),
    };
    if cli.no_norm {
        config.enable_normalization = false;
    }
    if cli.no_reph {
        config.enable_reph_reordering = false;
    }
    Ok(config)
}

fn read_lines(files: &[PathBuf], limit: Option<usize>) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    for path in files {
        debug!("reading {}", path.display());
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let len = file.metadata()?.len();
        if len == 0 {
            continue;
        }
        let mmap = unsafe { Mmap::map(&file) }.with_context(|| format!("mapping {}", path.display()))?;
        // Legacy documents are often saved as Windows-1252; keep going on bad bytes.
        let text = String::from_utf8_lossy(&mmap);
        for line in text.lines() {
            if limit.is_some_and(|n| lines.len() >= n) {
                return Ok(lines);
            }
            lines.push(utils::strip_bom(line).to_string());
        }
    }
    Ok(lines)
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(File::create(path).with_context(|| format!("creating {}", path.display()))?),
        None => Box::new(io::stdout()),
    })
}

fn write_results(out: &mut dyn Write, lines: &[String], results: &[String], json: bool) -> Result<()> {
    for (orig, res) in lines.iter().zip(results.iter()) {
        if json {
            serde_json::to_writer(&mut *out, &Record { original: orig, converted: res })?;
            writeln!(out)?;
        } else {
            writeln!(out, "Original:  {}", orig)?;
            writeln!(out, "Converted: {}", res)?;
            writeln!(out, "----------------------------------------")?;
        }
    }
    Ok(())
}

fn run_benchmark(conversion: &Conversion, lines: &[String], threads: usize) {
    let sample;
    let lines = if lines.is_empty() {
        sample = vec![SAMPLE_TEXT.to_string(); 5000];
        &sample[..]
    } else {
        lines
    };

    println!("\n--- Benchmark ({} lines) ---", lines.len());
    println!("[Output Check] {}", conversion.convert(&lines[0]));

    let start = Instant::now();
    let _seq: Vec<String> = lines.iter().map(|l| conversion.convert(l)).collect();
    let duration = start.elapsed();
    println!(
        "[1 Thread] {:.3}s ({:.2} lines/sec)",
        duration.as_secs_f64(),
        lines.len() as f64 / duration.as_secs_f64()
    );

    if threads > 1 {
        let start = Instant::now();
        let _par: Vec<String> = lines.par_iter().map(|l| conversion.convert(l)).collect();
        let duration_par = start.elapsed();
        println!(
            "[{} Threads] {:.3}s ({:.2} lines/sec)",
            threads,
            duration_par.as_secs_f64(),
            lines.len() as f64 / duration_par.as_secs_f64()
        );
        println!("Speedup: {:.2}x", duration.as_secs_f64() / duration_par.as_secs_f64());
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    debug!("{:?}", cli);

    let config = load_config(&cli)?;
    let conversion = Conversion::with_config(cli.from, cli.to, config).strip_tags(cli.strip_tags);
    info!("converting {} -> {}", conversion.source(), conversion.target());

    rayon::ThreadPoolBuilder::new()
        .num_threads(cli.threads.max(1))
        .build_global()
        .context("building thread pool")?;

    let lines = read_lines(&cli.input, cli.limit)?;

    if cli.benchmark {
        run_benchmark(&conversion, &lines, cli.threads);
    } else if !cli.input.is_empty() {
        info!("read {} lines", lines.len());
        let results: Vec<String> = if cli.threads > 1 {
            lines.par_iter().map(|l| conversion.convert(l)).collect()
        } else {
            lines.iter().map(|l| conversion.convert(l)).collect()
        };
        let mut out = open_output(cli.output.as_deref())?;
        write_results(&mut *out, &lines, &results, cli.json)?;
        if let Some(path) = &cli.output {
            eprintln!("Results saved to {}", path.display());
        }
    } else if !cli.text.is_empty() {
        let text = cli.text.join(" ");
        let res = conversion.convert(&text);
        let mut out = open_output(cli.output.as_deref())?;
        if cli.json {
            write_results(&mut *out, &[text], &[res], true)?;
        } else {
            writeln!(out, "{}", res)?;
        }
    } else {
        Cli::command().print_help()?;
    }

    Ok(())
}
