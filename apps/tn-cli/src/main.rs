use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tn_app::{AppResult, OutputFormat, RunRequest, compile, project_service, run_service};

#[derive(Parser)]
#[command(name = "thermonet")]
#[command(about = "thermonet - lumped thermal network simulation", long_about = None)]
struct Cli {
    /// Log debug output (construction details, saved files)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a project file and report every problem found
    Validate {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
    },
    /// Build the network and print its nodes, interfaces and links
    Describe {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
    },
    /// Run a simulation and save the temperature history
    Run {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
        /// Output file (defaults to <project name>.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Override the simulated duration in seconds
        #[arg(long)]
        duration: Option<f64>,
        /// Override the time step in seconds
        #[arg(long)]
        timestep: Option<f64>,
        /// Evaluate node powers on all cores
        #[arg(long)]
        parallel: bool,
        /// Output format (defaults to the output file extension)
        #[arg(long, value_enum)]
        format: Option<Format>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Csv,
    Json,
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    match cli.command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Describe { project_path } => cmd_describe(&project_path),
        Commands::Run {
            project_path,
            output,
            duration,
            timestep,
            parallel,
            format,
        } => cmd_run(&project_path, output, duration, timestep, parallel, format),
    }
}

fn cmd_validate(project_path: &Path) -> AppResult<()> {
    println!("Validating project: {}", project_path.display());
    let project = project_service::load_project(project_path)?;
    project_service::validate_project(&project)?;
    let summary = project_service::summarize(&project);
    println!("✓ Project is valid");
    println!(
        "  {}: {} nodes, {} interfaces, {} links",
        summary.name, summary.node_count, summary.interface_count, summary.link_count
    );
    println!(
        "  {} s in steps of {} s",
        summary.duration_s, summary.timestep_s
    );
    Ok(())
}

fn cmd_describe(project_path: &Path) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let engine = compile::compile_project(&project, false)?;
    println!("{}", project.name);
    print!("{engine}");
    Ok(())
}

fn cmd_run(
    project_path: &Path,
    output: Option<PathBuf>,
    duration: Option<f64>,
    timestep: Option<f64>,
    parallel: bool,
    format: Option<Format>,
) -> AppResult<()> {
    let output = match output {
        Some(path) => path,
        None => {
            let project = project_service::load_project(project_path)?;
            let ext = match format {
                Some(Format::Json) => "json",
                _ => "csv",
            };
            PathBuf::from(format!("{}.{ext}", project.name))
        }
    };
    let format = match format {
        Some(Format::Csv) => OutputFormat::Csv,
        Some(Format::Json) => OutputFormat::Json,
        None => OutputFormat::from_path(&output),
    };

    let request = RunRequest {
        duration_s: duration,
        timestep_s: timestep,
        parallel,
        output: Some(&output),
        format,
        ..RunRequest::new(project_path)
    };
    let response = run_service::run(&request)?;

    println!(
        "✓ Simulated {} steps to t = {} s in {:.3} s",
        response.steps, response.t_final_s, response.elapsed_s
    );
    println!("  Final temperatures:");
    for (name, kelvin) in &response.final_temperatures {
        let celsius = tn_core::to_celsius(tn_core::k(*kelvin));
        println!("    {name:<24} {kelvin:>10.3} K  ({celsius:>8.3} °C)");
    }
    println!("  Saved to {}", output.display());
    Ok(())
}
