use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::LevelFilter;
use seqlib::{
    commands::{seqlib_simulate, seqlib_sites, seqlib_stats, SiteFilters},
    prelude::{SeqLibError, SimulationParams},
    reporting::Report,
    simulate::{DEFAULT_MISSING_RATE, DEFAULT_MUTATION_RATE},
};

const INFO: &str = "\
seqlib: simulate sequence arrays and compute population-genetic summary statistics
usage: seqlib [--help] <subcommand>

Subcommands:

  simulate: simulate a sequence array with mutations and missing data.
  stats:    compute summary statistics for a sequence array.
  sites:    per-site minor allele frequency and missing fraction.

";

#[derive(Parser)]
#[clap(name = "seqlib")]
#[clap(about = INFO)]
struct Cli {
    /// increase logging verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    debug: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    Simulate {
        /// number of individuals (rows)
        #[arg(long, required = true)]
        ninds: usize,

        /// number of sites (columns)
        #[arg(long, required = true)]
        nsites: usize,

        /// random seed (system entropy is used if not specified)
        #[arg(long)]
        seed: Option<u64>,

        /// per-cell mutation probability
        #[arg(long, default_value_t = DEFAULT_MUTATION_RATE)]
        mutation_rate: f64,

        /// per-cell missing data probability
        #[arg(long, default_value_t = DEFAULT_MISSING_RATE)]
        missing_rate: f64,

        /// drop sites with minor allele frequency below this
        #[arg(long)]
        min_maf: Option<f64>,

        /// drop sites with a fraction of missing calls above this
        #[arg(long)]
        max_missing: Option<f64>,

        /// an optional output file (standard output will be used if not specified)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    Stats {
        /// a sequence array file, one individual per line
        #[arg(required = true)]
        seqfile: PathBuf,

        /// drop sites with minor allele frequency below this
        #[arg(long)]
        min_maf: Option<f64>,

        /// drop sites with a fraction of missing calls above this
        #[arg(long)]
        max_missing: Option<f64>,

        /// an optional output file (standard output will be used if not specified)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    Sites {
        /// a sequence array file, one individual per line
        #[arg(required = true)]
        seqfile: PathBuf,

        /// an optional output file (standard output will be used if not specified)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn init_logging(debug: u8) {
    let level = match debug {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level.as_str()))
        .init();
}

fn print_report(report: &Report) {
    for entry in report.entries() {
        eprintln!("{}", entry);
    }
}

fn run() -> Result<(), SeqLibError> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let report = match &cli.command {
        Some(Commands::Simulate {
            ninds,
            nsites,
            seed,
            mutation_rate,
            missing_rate,
            min_maf,
            max_missing,
            output,
        }) => {
            let params = SimulationParams::new(*mutation_rate, *missing_rate)?;
            let filters = SiteFilters::from_options(*min_maf, *max_missing);
            seqlib_simulate(*ninds, *nsites, params, *seed, filters, output.as_ref())?.report
        }
        Some(Commands::Stats {
            seqfile,
            min_maf,
            max_missing,
            output,
        }) => {
            let filters = SiteFilters::from_options(*min_maf, *max_missing);
            seqlib_stats(seqfile, filters, output.as_ref())?.report
        }
        Some(Commands::Sites { seqfile, output }) => seqlib_sites(seqfile, output.as_ref())?.report,
        None => {
            println!("{}\n", INFO);
            std::process::exit(1);
        }
    };
    print_report(&report);
    Ok(())
}

fn main() {
    match run() {
        Ok(_) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
