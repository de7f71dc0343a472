use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use html2runs::{Config, Error};

#[derive(Parser)]
#[command(name = "html2runs")]
#[command(about = "Convert rich-text HTML into styled paragraph runs")]
struct Cli {
    /// Input HTML file (reads stdin when omitted or `-`)
    input: Option<PathBuf>,

    /// Output JSON file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Style table in TOML; sections left out keep their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Emit single-line JSON instead of indented output
    #[arg(long)]
    compact: bool,

    /// Print the shipped style table and exit
    #[arg(long)]
    print_default_config: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn read_input(input: Option<&Path>) -> Result<String, Error> {
    match input {
        Some(path) if path != Path::new("-") => {
            fs::read_to_string(path).map_err(|source| Error::Read {
                path: path.to_path_buf(),
                source,
            })
        }
        _ => {
            let mut markup = String::new();
            io::stdin()
                .read_to_string(&mut markup)
                .map_err(|source| Error::Read {
                    path: PathBuf::from("<stdin>"),
                    source,
                })?;
            Ok(markup)
        }
    }
}

fn write_output(output: Option<&Path>, json: &str) -> Result<(), Error> {
    match output {
        Some(path) => fs::write(path, format!("{json}\n")).map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        }),
        None => writeln!(io::stdout(), "{json}").map_err(|source| Error::Write {
            path: PathBuf::from("<stdout>"),
            source,
        }),
    }
}

fn run(cli: &Cli) -> Result<(), Error> {
    if cli.print_default_config {
        return write_output(cli.output.as_deref(), html2runs::DEFAULT_CONFIG_TOML.trim_end());
    }

    let config = match &cli.config {
        Some(path) => Config::try_load(path)?,
        None => Config::default(),
    };

    let markup = read_input(cli.input.as_deref())?;
    let document = html2runs::resolve_with_config(&markup, &config);
    tracing::debug!(paragraphs = document.len(), "resolved document");

    let json = if cli.compact {
        html2runs::to_json(&document)?
    } else {
        html2runs::to_json_pretty(&document)?
    };
    write_output(cli.output.as_deref(), &json)
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
