//! Proxygen CLI
//!
//! Generates C# client proxy classes for a `*.HttpApi.Client` project from
//! the API description its server publishes.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use proxygen_gen::errors::GeneratorError;
use proxygen_gen::generator::{
    DEFAULT_MODULE, GenerateProxyArgs, GenerationReport, ProxyCommand, ProxyGenerator,
    remove_proxies,
};
use proxygen_gen::source::{FileApiDescriptionSource, HttpApiDescriptionSource, JsonAssemblyReader};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

/// Usage errors exit with this status; every other failure exits with 1.
const USAGE_ERROR_EXIT: u8 = 2;

#[derive(Parser)]
#[command(name = "proxygen")]
#[command(author, version, about = "Generates C# client proxies from a server's API description", long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    log_verbosity: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate (or regenerate) client proxy files
    Generate(GenerateArgs),

    /// Delete the client proxy folder
    Remove(TargetArgs),
}

#[derive(Args)]
struct TargetArgs {
    /// Directory containing the *.HttpApi.Client.csproj file
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    work_directory: PathBuf,

    /// Output folder relative to the working directory [default: ClientProxies]
    #[arg(short, long, value_name = "FOLDER")]
    folder: Option<String>,
}

#[derive(Args)]
struct GenerateArgs {
    #[command(flatten)]
    target: TargetArgs,

    /// Module to generate proxies for
    #[arg(short, long, default_value = DEFAULT_MODULE)]
    module: String,

    /// Root URL of the running server
    #[arg(short, long, value_name = "URL")]
    url: Option<Url>,

    /// Saved API description JSON to read instead of contacting a server
    #[arg(long, value_name = "FILE", conflicts_with = "url")]
    api_file: Option<PathBuf>,

    /// Print generated files without writing them
    #[arg(long)]
    dry_run: bool,
}

/// Initialize tracing subscriber based on verbosity
fn init_tracing(verbose: u8) {
    // RUST_LOG wins over -v flags
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,proxygen_gen=info".to_string(),
            2 => "info,proxygen_gen=debug".to_string(),
            _ => "debug,proxygen_gen=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_file(verbose >= 3)
                .with_line_number(verbose >= 3)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

async fn generate(args: GenerateArgs) -> Result<GenerationReport, GeneratorError> {
    let run_args = GenerateProxyArgs {
        command: ProxyCommand::Generate,
        work_directory: args.target.work_directory,
        module: args.module,
        folder: args.target.folder,
        dry_run: args.dry_run,
    };

    match (args.url, args.api_file) {
        (Some(url), _) => {
            let source = HttpApiDescriptionSource::new(url)?;
            ProxyGenerator::new(source, JsonAssemblyReader)
                .run(&run_args)
                .await
        }
        (None, Some(api_file)) => {
            ProxyGenerator::new(FileApiDescriptionSource::new(api_file), JsonAssemblyReader)
                .run(&run_args)
                .await
        }
        (None, None) => Err(GeneratorError::ConfigError(
            "one of --url or --api-file is required".to_string(),
        )),
    }
}

fn print_report(report: &GenerationReport, dry_run: bool) {
    for file in &report.files {
        if dry_run {
            println!("{} {}", "//".dimmed(), file.path.display().to_string().cyan());
            println!("{}", file.contents);
        } else {
            println!("{} {}", "wrote".green(), file.path.display());
        }
    }

    let summary = format!(
        "{} proxies generated, {} services skipped",
        report.proxies_generated(),
        report.services_skipped
    );
    println!("{}", summary.bold());
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_verbosity);

    let result = match cli.command {
        Commands::Generate(args) => {
            let dry_run = args.dry_run;
            generate(args).await.map(|report| print_report(&report, dry_run))
        }
        Commands::Remove(args) => {
            let run_args = GenerateProxyArgs {
                command: ProxyCommand::Remove,
                folder: args.folder,
                ..GenerateProxyArgs::new(args.work_directory)
            };
            remove_proxies(&run_args).and_then(|report| {
                match report.removed {
                    Some(path) => println!("{} {}", "removed".yellow(), path.display()),
                    None => println!("nothing to remove at {}", run_args.output_dir()?.display()),
                }
                Ok(())
            })
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            if e.is_usage_error() {
                ExitCode::from(USAGE_ERROR_EXIT)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
