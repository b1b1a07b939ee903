//! Cache simulator CLI.
//!
//! Replays a valgrind trace through a simulated cache and prints
//! `hits:<h> misses:<m> evictions:<e>`.

use anyhow::Context;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use std::process;

use cachesim::config::{SimConfig, SimConfigBuilder};
use cachesim::stats::{Counters, RESULTS_FILE};
use cachesim::{Dispatch, Simulator, TraceReader};

#[derive(Parser, Debug)]
#[command(
    name = "csim",
    author,
    version,
    about = "Trace-driven set-associative cache simulator",
    long_about = None,
)]
struct Cli {
    /// Number of set index bits (the cache has 2^s sets).
    #[arg(short = 's', value_name = "s")]
    set_bits: Option<u32>,

    /// Associativity (number of lines per set).
    #[arg(short = 'E', value_name = "E")]
    ways: Option<usize>,

    /// Number of block offset bits (blocks are 2^b bytes).
    #[arg(short = 'b', value_name = "b")]
    block_bits: Option<u32>,

    /// Valgrind trace to replay.
    #[arg(short = 't', value_name = "tracefile")]
    trace: Option<PathBuf>,

    /// Print the outcome of every trace record.
    #[arg(short = 'v')]
    verbose: bool,

    /// Print the summary as JSON.
    #[arg(long)]
    json: bool,

    /// Where to write the "<hits> <misses> <evictions>" results line.
    #[arg(long, value_name = "PATH", default_value = RESULTS_FILE)]
    results: PathBuf,

    /// Do not write a results file.
    #[arg(long, conflicts_with = "results")]
    no_results: bool,
}

impl Cli {
    fn to_config(&self) -> Result<SimConfig, cachesim::ConfigError> {
        let mut builder = SimConfigBuilder::new().verbose(self.verbose);
        if let Some(s) = self.set_bits {
            builder = builder.set_bits(s);
        }
        if let Some(e) = self.ways {
            builder = builder.ways(e);
        }
        if let Some(b) = self.block_bits {
            builder = builder.block_bits(b);
        }
        if let Some(t) = &self.trace {
            builder = builder.trace(t);
        }
        builder.build()
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let config = match cli.to_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {}", Cli::command().get_name(), e);
            eprintln!("{}", Cli::command().render_help());
            process::exit(1);
        }
    };

    if let Err(e) = run(&cli, &config) {
        eprintln!("error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli, config: &SimConfig) -> anyhow::Result<()> {
    let trace = TraceReader::open(&config.trace)
        .with_context(|| format!("could not open trace file '{}'", config.trace.display()))?;
    let sim = Simulator::new(&config.geometry)?;

    let counters = if config.verbose {
        sim.run_with(trace, |record, dispatch| {
            if *dispatch != Dispatch::Ignored {
                println!("{} {}", record, dispatch);
            }
        })
    } else {
        sim.run(trace)
    };

    report(cli, &counters)
}

fn report(cli: &Cli, counters: &Counters) -> anyhow::Result<()> {
    log::info!(
        "{} accesses, hit rate {:.2}%",
        counters.accesses(),
        counters.hit_rate() * 100.0
    );

    if cli.json {
        println!("{}", counters.to_json()?);
    } else {
        counters.print();
    }

    if !cli.no_results {
        counters
            .write_results(&cli.results)
            .with_context(|| format!("could not write '{}'", cli.results.display()))?;
    }
    Ok(())
}
