//! Command-line prover for TPTP problems
//!
//! Prints the derivation trace followed by an SZS status line. Exit code 0
//! means proved, 1 not proved or gave up, 2 an error.

use clap::{Parser, ValueEnum};
use prooftrace::{
    parse_tptp_file, ProofJson, ProofResult, Prover, ProverConfig, ProverError, QueueOrder, StopReason,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "prove")]
#[command(about = "Resolution refutation prover for TPTP fof/cnf problems")]
#[command(version)]
struct Cli {
    /// TPTP problem file
    file: PathBuf,

    /// Directory searched for included files (repeatable)
    #[arg(short = 'I', long = "include", value_name = "DIR")]
    include: Vec<String>,

    /// JSON configuration file; flags given on the command line override it
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Work queue discipline
    #[arg(long, value_enum)]
    queue: Option<QueueArg>,

    /// Stop after this many resolution iterations (0 = unlimited)
    #[arg(long, value_name = "N")]
    max_iterations: Option<usize>,

    /// Stop once the trace holds this many clauses (0 = unlimited)
    #[arg(long, value_name = "N")]
    max_clauses: Option<usize>,

    /// Wall-clock limit in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<f64>,

    /// Print the result as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Do not print the trace
    #[arg(long)]
    no_trace: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum QueueArg {
    Shortest,
    Fifo,
}

impl From<QueueArg> for QueueOrder {
    fn from(arg: QueueArg) -> Self {
        match arg {
            QueueArg::Shortest => QueueOrder::ShortestFirst,
            QueueArg::Fifo => QueueOrder::Fifo,
        }
    }
}

impl Cli {
    fn prover_config(&self) -> Result<ProverConfig, ProverError> {
        let mut config = match &self.config {
            Some(path) => ProverConfig::from_json_file(path)?,
            None => ProverConfig::default(),
        };
        if let Some(queue) = self.queue {
            config.queue_order = queue.into();
        }
        if let Some(n) = self.max_iterations {
            config.max_iterations = n;
        }
        if let Some(n) = self.max_clauses {
            config.max_clauses = n;
        }
        if let Some(secs) = self.timeout {
            if !secs.is_finite() || secs < 0.0 {
                return Err(ProverError::Config(format!("invalid timeout: {}", secs)));
            }
            config.timeout = Some(Duration::from_secs_f64(secs));
        }
        Ok(config)
    }
}

/// SZS status for a finished attempt
fn szs_status(result: ProofResult, has_conjecture: bool, first_order: bool) -> &'static str {
    match result {
        ProofResult::Proved if has_conjecture => "Theorem",
        ProofResult::Proved => "Unsatisfiable",
        // Without unification a saturated first-order clause set says nothing
        ProofResult::NotProved if first_order => "GaveUp",
        ProofResult::NotProved if has_conjecture => "CounterSatisfiable",
        ProofResult::NotProved => "Satisfiable",
        ProofResult::Inconclusive(StopReason::Timeout) => "Timeout",
        ProofResult::Inconclusive(_) => "GaveUp",
    }
}

fn run(cli: &Cli) -> Result<ProofResult, ProverError> {
    let config = cli.prover_config()?;
    let include_dirs: Vec<&str> = cli.include.iter().map(String::as_str).collect();
    let problem = parse_tptp_file(&cli.file, &include_dirs)?;
    let has_conjecture = problem.conjectures().next().is_some();

    let mut prover = Prover::new(problem, config);
    let result = prover.prove()?;

    if cli.json {
        let json = ProofJson::from_prover(&prover, !cli.no_trace);
        println!("{}", json.to_json_string()?);
    } else {
        if !cli.no_trace {
            let steps = prover.trace();
            print!("{}", prover.display_trace(&steps));
        }
        println!(
            "% SZS status {} for {}",
            szs_status(result, has_conjecture, prover.is_first_order()),
            cli.file.display()
        );
    }
    Ok(result)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(ProofResult::Proved) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(1),
        Err(e) => {
            if !cli.json {
                println!("% SZS status Error for {}", cli.file.display());
            }
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}
