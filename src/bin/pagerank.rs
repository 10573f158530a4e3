//! pagerank CLI
//!
//! Ranks the HTML pages of a directory by sampling and by iteration.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rapid_pagerank::report::{format_json, format_text, Method, RankReport};
use rapid_pagerank::{crawl, IterativePageRank, RankConfig, RankError, SamplingPageRank};

#[derive(Parser)]
#[command(name = "pagerank")]
#[command(author, version, about = "Rank the pages of a directory of HTML files")]
struct Cli {
    /// Directory containing the corpus of .html pages
    corpus: PathBuf,

    /// JSON config file; flags below override its values
    #[arg(long, env = "PAGERANK_CONFIG")]
    config: Option<PathBuf>,

    /// Damping factor in [0, 1]
    #[arg(long)]
    damping: Option<f64>,

    /// Number of samples drawn by the random surfer
    #[arg(long)]
    samples: Option<usize>,

    /// Seed for reproducible sampling
    #[arg(long)]
    seed: Option<u64>,

    /// Independent walkers sharing the sample budget
    #[arg(long)]
    walkers: Option<usize>,

    /// Convergence threshold for iteration
    #[arg(long)]
    threshold: Option<f64>,

    /// Iteration cap
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Estimators to run
    #[arg(long, value_enum, default_value = "both")]
    method: MethodArg,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum MethodArg {
    Sampling,
    Iteration,
    Both,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl Cli {
    fn rank_config(&self) -> Result<RankConfig> {
        let mut config = match &self.config {
            Some(path) => RankConfig::from_json_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => RankConfig::default(),
        };

        if let Some(damping) = self.damping {
            config.damping = damping;
        }
        if let Some(samples) = self.samples {
            config.samples = samples;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(walkers) = self.walkers {
            config.walkers = walkers;
        }
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        if let Some(max_iterations) = self.max_iterations {
            config.max_iterations = max_iterations;
        }

        config.validate()?;
        Ok(config)
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.rank_config()?;
    let corpus = crawl(&cli.corpus)?;

    let mut reports = Vec::new();

    if matches!(cli.method, MethodArg::Sampling | MethodArg::Both) {
        let sampler = SamplingPageRank::from_config(&config);
        let result = if config.walkers > 1 {
            sampler.run_parallel(&corpus)?
        } else {
            sampler.run_seeded(&corpus)?
        };
        reports.push(RankReport::new(Method::Sampling, &result, &corpus));
    }

    if matches!(cli.method, MethodArg::Iteration | MethodArg::Both) {
        let result = IterativePageRank::from_config(&config).run(&corpus)?;
        reports.push(RankReport::new(Method::Iteration, &result, &corpus));
    }

    let output = match cli.format {
        OutputFormat::Text => format_text(&reports),
        OutputFormat::Json => format_json(&reports)?,
    };
    print!("{output}");
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    if let Err(err) = run(&cli) {
        eprintln!("Error: {err:#}");
        let code = err
            .downcast_ref::<RankError>()
            .map(RankError::exit_code)
            .unwrap_or(rapid_pagerank::errors::exit_codes::GENERAL_ERROR);
        std::process::exit(code);
    }
}
