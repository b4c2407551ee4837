//! Command-line access to binary dissimilarity matrix stores

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use bdsm::{
    convert_file, write_tsv, AccessorConfig, ConvertOptions, DistanceMatrix, DistanceRecord,
    MatrixStore,
};
use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(about = "BDSM CLI - Convert and query binary dissimilarity matrix stores")]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a tab-delimited text matrix into a binary store
    Convert {
        /// Text distance matrix
        input: PathBuf,

        /// Store file to create
        output: PathBuf,

        /// Replace the output if it already exists
        #[arg(long)]
        overwrite: bool,
    },
    /// Show store header and attributes
    Info {
        /// Store file
        store: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Distances from one identifier
    Get {
        /// Store file
        store: PathBuf,

        /// Source identifier
        id: String,

        /// Restrict targets to these identifiers
        #[arg(long, num_args = 1..)]
        mask: Option<Vec<String>>,

        #[command(flatten)]
        output: QueryOutput,
    },
    /// All pairwise distances among a group
    Within {
        /// Store file
        store: PathBuf,

        /// Group identifiers
        #[arg(required = true)]
        ids: Vec<String>,

        #[command(flatten)]
        output: QueryOutput,
    },
    /// Distances from one group to another
    Between {
        /// Store file
        store: PathBuf,

        /// Source identifiers
        #[arg(long, required = true, num_args = 1..)]
        from: Vec<String>,

        /// Target identifiers
        #[arg(long, required = true, num_args = 1..)]
        to: Vec<String>,

        #[command(flatten)]
        output: QueryOutput,
    },
}

#[derive(clap::Args)]
struct QueryOutput {
    /// Read columns instead of rows
    #[arg(long)]
    transpose: bool,

    /// Print records as a JSON array
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Convert {
            input,
            output,
            overwrite,
        } => {
            let options = ConvertOptions::default().with_overwrite(overwrite);
            let summary = convert_file(&input, &output, &options)?;
            println!(
                "Wrote {} x {} matrix to {}",
                summary.identifiers,
                summary.identifiers,
                output.display()
            );
        }
        Commands::Info { store, json } => handle_info(&store, json)?,
        Commands::Get {
            store,
            id,
            mask,
            output,
        } => {
            let mut config = AccessorConfig::new(&store).with_transposed(output.transpose);
            if let Some(mask) = mask {
                config = config.with_mask(mask);
            }
            let dm = DistanceMatrix::open(&config)?;
            print_records(&dm.get(&id)?, output.json)?;
        }
        Commands::Within { store, ids, output } => {
            let dm = open_accessor(&store, output.transpose)?;
            print_records(&dm.within(ids.as_slice())?, output.json)?;
        }
        Commands::Between {
            store,
            from,
            to,
            output,
        } => {
            let dm = open_accessor(&store, output.transpose)?;
            print_records(&dm.between(from.as_slice(), to.as_slice())?, output.json)?;
        }
    }
    Ok(())
}

fn open_accessor(store: &Path, transpose: bool) -> bdsm::Result<DistanceMatrix> {
    DistanceMatrix::open(&AccessorConfig::new(store).with_transposed(transpose))
}

fn handle_info(path: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = MatrixStore::open(path)?;
    let header = store.header();

    if json {
        let info = serde_json::json!({
            "path": path.display().to_string(),
            "n": store.len(),
            "header": header,
            "attributes": store.attributes(),
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("Store: {}", path.display());
    println!("  Identifiers: {}", store.len());
    println!("  Format version: {}", header.version);
    println!("  Matrix bytes: {}", header.matrix_size);
    for (key, value) in store.attributes() {
        println!("  {key}: {value}");
    }
    Ok(())
}

fn print_records(records: &[DistanceRecord], json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        serde_json::to_writer_pretty(&mut out, records)?;
        writeln!(out)?;
    } else {
        write_tsv(records, &mut out)?;
    }
    Ok(())
}
