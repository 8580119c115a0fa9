use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;

use clap::{ArgAction, Args, Parser, Subcommand};
use log::LevelFilter;
use ndarray::{array, Array2};
use serde::Serialize;

use rs_ngrams_core::io::read_words;
use rs_ngrams_core::model::generation_input::GenerationInput;
use rs_ngrams_core::model::generator::{generate, NgramGenerator};
use rs_ngrams_core::softmax::{
    apply_softmax, attention_scores, max_abs_diff, random_matrix, rows_sum_to_one, stable_softmax,
};

/// Input used when nothing else is given
const DEFAULT_TEXT: &str = "hello";

#[derive(Parser)]
#[command(name = "rs-ngrams", version, about = "Gated n-gram generation and a softmax reference check")]
struct Cli {
    /// Log verbosity: -v info, -vv debug, -vvv trace (RUST_LOG also works)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the n-grams of one or more inputs
    Generate(GenerateArgs),
    /// Check the hand-written softmax and time it against the stable one
    Softmax(SoftmaxArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// Input strings (defaults to "hello")
    texts: Vec<String>,

    /// Read inputs from a text file, one per line
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// JSON generation config; explicit flags override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Starting depth
    #[arg(short, long)]
    level: Option<usize>,

    /// Starting accumulator
    #[arg(short, long, allow_negative_numbers = true)]
    q: Option<i64>,

    /// Skip repeated n-grams
    #[arg(short, long)]
    distinct: bool,

    /// One JSON object per input
    #[arg(long)]
    json: bool,

    /// Also report the 2^n node bound
    #[arg(long)]
    count: bool,
}

#[derive(Args)]
struct SoftmaxArgs {
    /// Side of the random square matrix
    #[arg(long, default_value_t = 1000)]
    size: usize,

    /// Timed runs per implementation
    #[arg(long, default_value_t = 5)]
    loops: u32,

    /// Seed of the random matrix
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

#[derive(Serialize)]
struct NgramsOutput<'a> {
    input: &'a str,
    ngrams: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    node_bound: Option<u128>,
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        let mut current_err = e.source();
        while let Some(source) = current_err {
            eprintln!("Caused by: {}", source);
            current_err = source.source();
        }
        std::process::exit(1);
    }
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    match cli.command {
        // Same output as running the reference script directly
        None => {
            println!("{:?}", generate(DEFAULT_TEXT).collect::<Vec<_>>());
            Ok(())
        }
        Some(Command::Generate(args)) => run_generate(&args),
        Some(Command::Softmax(args)) => run_softmax(&args),
    }
}

/// Builds the generation config: JSON file first, then flags on top.
fn generation_input(args: &GenerateArgs) -> Result<GenerationInput, Box<dyn Error>> {
    let mut input = match &args.config {
        Some(path) => GenerationInput::from_json_file(path)?,
        None => GenerationInput::default(),
    };
    if let Some(level) = args.level {
        input.level = level;
    }
    if let Some(q) = args.q {
        input.q = q;
    }
    if args.distinct {
        input.distinct = true;
    }
    Ok(input)
}

fn run_generate(args: &GenerateArgs) -> Result<(), Box<dyn Error>> {
    let input = generation_input(args)?;

    let mut texts = args.texts.clone();
    if let Some(path) = &args.file {
        texts.extend(read_words(path)?);
    }
    if texts.is_empty() {
        texts.push(DEFAULT_TEXT.to_owned());
    }
    log::info!("generating for {} input(s)", texts.len());

    for text in texts {
        let generator = NgramGenerator::new(text, input.clone());
        let ngrams: Vec<&str> = generator.iter().collect();
        let node_bound = if args.count { Some(generator.node_bound()?) } else { None };

        if args.json {
            let output = NgramsOutput { input: generator.text(), ngrams, node_bound };
            println!("{}", serde_json::to_string(&output)?);
        } else {
            println!("{:?}", ngrams);
            if let Some(bound) = node_bound {
                println!("{}: {} n-grams, node bound {}", generator.text(), ngrams.len(), bound);
            }
        }
    }

    Ok(())
}

/// Mean wall time of `loops` runs, in seconds.
fn mean_seconds<F>(loops: u32, mut f: F) -> Result<f64, Box<dyn Error>>
where
    F: FnMut() -> rs_ngrams_core::Result<Array2<f64>>,
{
    let start = Instant::now();
    for _ in 0..loops {
        f()?;
    }
    Ok(start.elapsed().as_secs_f64() / f64::from(loops))
}

fn run_softmax(args: &SoftmaxArgs) -> Result<(), Box<dyn Error>> {
    if args.loops == 0 {
        return Err("loops must be at least 1".into());
    }

    // Attention logic: x . x^T then row-wise softmax
    let x = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
    let w_prime = attention_scores(&x);
    println!("W_prime => {}", w_prime);

    let w = apply_softmax(&w_prime)?;
    println!("W => {}", w);
    println!("reference softmax: {}", stable_softmax(&w_prime)?);
    if !rows_sum_to_one(&w, 1e-9) {
        return Err("softmax rows do not sum to one".into());
    }

    log::info!("timing on a {}x{} matrix, {} loop(s)", args.size, args.size, args.loops);
    let m = random_matrix(args.size, args.size, args.seed);

    let reference = mean_seconds(args.loops, || stable_softmax(&m))?;
    println!("reference: {}", reference);
    let ours = mean_seconds(args.loops, || apply_softmax(&m))?;
    println!("our_softmax: {}", ours);

    if reference < ours {
        println!("Reference win {}", ours - reference);
    } else {
        println!("Our softmax win {}", reference - ours);
    }

    let diff = max_abs_diff(&apply_softmax(&m)?, &stable_softmax(&m)?)?;
    println!("max abs diff: {:e}", diff);

    Ok(())
}
