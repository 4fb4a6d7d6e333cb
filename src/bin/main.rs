use clap::{Args, Parser, Subcommand, ValueEnum};
use crossterm::style::Stylize;
use serde::Serialize;
use spell_core::corpus::read_text_file;
use spell_core::misspell::read_misspells_file;
use spell_core::persistence::{load_scorer, save_scorer};
use spell_core::{
    EvaluationReport, LocalSearchLearner, ProbabilisticLearner, Result, SpellConfig, SpellEngine,
    Suggestion, TrainedScorer,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

/// Approximate term matcher with learned ranking
#[derive(Parser)]
#[command(name = "spell_engine")]
#[command(about = "Train, tune and query a typo-tolerant term index", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML file with [index] and [learner] settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an index from a text corpus
    Train(TrainArgs),
    /// Learn ranking weights from labeled misspellings
    Learn(LearnArgs),
    /// Print ranked corrections for the given queries
    Suggest(SuggestArgs),
    /// Measure top-1 accuracy on labeled misspellings
    Evaluate(EvaluateArgs),
}

#[derive(Args)]
struct TrainArgs {
    /// Plain or gzipped text
    #[arg(short, long)]
    corpus: PathBuf,

    /// Where to write the index
    #[arg(short, long, default_value = "index.bin")]
    out: PathBuf,

    /// Maximum edit distance of a correction
    #[arg(long)]
    depth: Option<usize>,

    /// Keep terms seen at least this often
    #[arg(long)]
    min_count: Option<f64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Algorithm {
    Linear,
    Probabilistic,
}

#[derive(Args)]
struct LearnArgs {
    #[arg(short, long, default_value = "index.bin")]
    index: PathBuf,

    /// `$term` blocks of misspellings, plain or gzipped
    #[arg(short, long)]
    misspells: PathBuf,

    #[arg(short, long, value_enum, default_value_t = Algorithm::Linear)]
    algorithm: Algorithm,

    /// Seed for reproducible local search
    #[arg(long)]
    seed: Option<u64>,

    #[arg(short, long, default_value = "scorer.bin")]
    out: PathBuf,
}

#[derive(Args)]
struct SuggestArgs {
    #[arg(short, long, default_value = "index.bin")]
    index: PathBuf,

    #[arg(short, long, default_value = "scorer.bin")]
    scorer: PathBuf,

    /// Show at most this many suggestions per query
    #[arg(short, long, default_value_t = 5)]
    limit: usize,

    /// Print the edit steps of each suggestion
    #[arg(short, long)]
    prescription: bool,

    #[arg(long)]
    json: bool,

    #[arg(required = true)]
    queries: Vec<String>,
}

#[derive(Args)]
struct EvaluateArgs {
    #[arg(short, long, default_value = "index.bin")]
    index: PathBuf,

    #[arg(short, long, default_value = "scorer.bin")]
    scorer: PathBuf,

    #[arg(short, long)]
    misspells: PathBuf,

    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => SpellConfig::load(path)?,
        None => SpellConfig::default(),
    };
    match cli.command {
        Commands::Train(args) => train(config, args),
        Commands::Learn(args) => learn(config, args),
        Commands::Suggest(args) => suggest(args),
        Commands::Evaluate(args) => evaluate(args),
    }
}

fn train(mut config: SpellConfig, args: TrainArgs) -> Result<()> {
    if let Some(depth) = args.depth {
        config.index.depth = depth;
    }
    if let Some(min_count) = args.min_count {
        config.index.min_term_count = min_count;
    }
    let text = read_text_file(&args.corpus)?;
    let mut engine = SpellEngine::new(config)?;
    let added = engine.train_text(&text);
    engine.save(&args.out)?;
    println!(
        "{} {} terms -> {}",
        "Indexed".green().bold(),
        added,
        args.out.display()
    );
    Ok(())
}

fn learn(mut config: SpellConfig, args: LearnArgs) -> Result<()> {
    if args.seed.is_some() {
        config.learner.seed = args.seed;
    }
    let mut engine = SpellEngine::load(&args.index)?;
    let blocks = read_misspells_file(&args.misspells)?;
    let before = engine.index().len();
    let examples = engine.collect_examples(&blocks);
    if engine.index().len() > before {
        info!(added = engine.index().len() - before, "index gained labeled terms");
        engine.save(&args.index)?;
    }

    let scorer = match args.algorithm {
        Algorithm::Linear => engine.learn(&LocalSearchLearner::new(config.learner), &examples),
        Algorithm::Probabilistic => engine.learn(&ProbabilisticLearner::new(), &examples),
    };
    save_scorer(&scorer, &args.out)?;

    match scorer.weights() {
        Some(weights) => println!(
            "{} {} scorer from {} examples -> {}\n  weights: {}",
            "Learned".green().bold(),
            scorer.kind(),
            examples.len(),
            args.out.display(),
            weights
        ),
        None => println!(
            "{} no usable examples; {} scorer saved untrained",
            "Warning:".yellow().bold(),
            scorer.kind()
        ),
    }
    Ok(())
}

#[derive(Serialize)]
struct QueryResult<'a> {
    query: &'a str,
    suggestions: &'a [Suggestion],
}

fn load_pair(index: &Path, scorer: &Path) -> Result<(SpellEngine, TrainedScorer)> {
    Ok((SpellEngine::load(index)?, load_scorer(scorer)?))
}

fn suggest(args: SuggestArgs) -> Result<()> {
    let (engine, scorer) = load_pair(&args.index, &args.scorer)?;
    let mut batch = engine.suggest_batch(&args.queries, &scorer, args.prescription)?;
    for suggestions in &mut batch {
        suggestions.truncate(args.limit);
    }

    if args.json {
        let results: Vec<QueryResult> = args
            .queries
            .iter()
            .zip(&batch)
            .map(|(query, suggestions)| QueryResult {
                query,
                suggestions,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    for (query, suggestions) in args.queries.iter().zip(&batch) {
        println!("{}", query.as_str().bold());
        if suggestions.is_empty() {
            println!("  {}", "no suggestions".dark_grey());
        }
        for (rank, suggestion) in suggestions.iter().enumerate() {
            println!(
                "  {}. {} {}",
                rank + 1,
                suggestion.term.as_str().cyan(),
                format!(
                    "(distance {}, score {:.4})",
                    suggestion.distance, suggestion.score
                )
                .dark_grey()
            );
            if let Some(prescription) = &suggestion.prescription {
                for row in prescription.to_string().lines() {
                    println!("       {row}");
                }
            }
        }
    }
    Ok(())
}

fn evaluate(args: EvaluateArgs) -> Result<()> {
    let (mut engine, scorer) = load_pair(&args.index, &args.scorer)?;
    let blocks = read_misspells_file(&args.misspells)?;
    let examples = engine.collect_examples(&blocks);
    let report = engine.evaluate(&examples, &scorer)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &EvaluationReport) {
    for miss in &report.misses {
        println!(
            "{} {} -> {} (expected {})",
            "miss".red(),
            miss.misspell,
            miss.got.as_deref().unwrap_or("-"),
            miss.expected.as_str().green()
        );
    }
    println!(
        "{} {}/{} correct ({:.1}%)",
        "Accuracy:".bold(),
        report.correct,
        report.total,
        report.accuracy() * 100.0
    );
}
