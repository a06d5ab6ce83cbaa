use anyhow::{Context, Result};
use cdetect::{examine, logging, DetectionConfig, Error, Examination};
use clap::Parser;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Report the compiler that produced ELF executables
#[derive(Parser)]
#[command(
    name = "cdetect",
    about = "Detect which compiler (and version) produced an ELF executable",
    version
)]
struct Cli {
    /// Files to examine; bare names not found locally are looked up on $PATH
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Also report whether each file is stripped and statically linked
    #[arg(long)]
    details: bool,

    /// Print one JSON record per file
    #[arg(long)]
    json: bool,

    /// Window size in bytes for streamed sections (even)
    #[arg(long, value_name = "BYTES")]
    window_size: Option<usize>,

    /// Tail margin in bytes inside each window
    #[arg(long, value_name = "BYTES")]
    margin: Option<usize>,

    /// JSON file with detection settings; flags take precedence
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Emit logs as JSON on stderr
    #[arg(long)]
    log_json: bool,
}

impl Cli {
    fn detection_config(&self) -> cdetect::Result<DetectionConfig> {
        let mut config = match &self.config {
            Some(path) => DetectionConfig::from_json_file(path)?,
            None => DetectionConfig::default(),
        };
        if let Some(window_size) = self.window_size {
            config.window_size = window_size;
        }
        if let Some(margin) = self.margin {
            config.margin = margin;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Resolve a command-line argument to a file, falling back to `$PATH` for
/// bare names, the way a shell finds a command.
fn resolve(arg: &Path) -> cdetect::Result<PathBuf> {
    if arg.exists() {
        return Ok(arg.to_path_buf());
    }
    let bare = arg.components().count() == 1 && arg.parent() == Some(Path::new(""));
    if bare {
        if let Some(paths) = std::env::var_os("PATH") {
            if let Some(found) = std::env::split_paths(&paths)
                .map(|dir| dir.join(arg))
                .find(|candidate| candidate.is_file())
            {
                debug!(name = %arg.display(), path = %found.display(), "Resolved on PATH");
                return Ok(found);
            }
        }
    }
    Err(Error::NotFound(arg.to_path_buf()))
}

fn render(examination: &Examination, details: bool) -> String {
    if !details {
        return examination.compiler.clone();
    }
    format!(
        "{} (stripped: {}, static: {})",
        examination.compiler,
        yes_no(examination.stripped),
        yes_no(examination.static_linked)
    )
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

fn main() {
    let cli = Cli::parse();
    if cli.log_json {
        logging::init_tracing_json();
    } else {
        logging::init_tracing();
    }

    // Errors print as one line, e.g. "a.out: not an ELF", without a prefix.
    if let Err(e) = run(&cli) {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli
        .detection_config()
        .context("invalid detection settings")?;
    debug!(?config, files = cli.files.len(), "Starting detection");

    let results: Vec<cdetect::Result<Examination>> = cli
        .files
        .par_iter()
        .map(|arg| examine(resolve(arg)?, &config))
        .collect();

    let many = cli.files.len() > 1;
    for (arg, result) in cli.files.iter().zip(results) {
        let examination = result?;
        if cli.json {
            println!("{}", serde_json::to_string(&examination)?);
        } else if many {
            println!("{}: {}", arg.display(), render(&examination, cli.details));
        } else {
            println!("{}", render(&examination, cli.details));
        }
    }
    Ok(())
}
