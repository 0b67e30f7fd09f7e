use anyhow::Context;
use clap::Parser;
use project_tree::{AccessPolicy, Config, Pipeline, RunStats};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "project-tree",
    version,
    about = "Save a directory's structure as a tree diagram",
    long_about = "Walks a directory and writes a tree diagram of its contents to a text file.\n\n\
    Hidden entries (names starting with '.') are skipped. Run without arguments to \
    render ./src into ./project_structure.txt.\n\n\
    USAGE EXAMPLES:\n  \
      # Render ./src\n  \
      project-tree\n\n  \
      # Render another directory into a custom file\n  \
      project-tree --root ./backend --output backend_tree.txt\n\n  \
      # Print the tree without writing anything\n  \
      project-tree --dry-run"
)]
struct Cli {
    /// Directory to render
    #[arg(short, long, default_value = "src", value_name = "PATH")]
    root: PathBuf,

    /// File to write the tree to
    #[arg(short, long, default_value = "project_structure.txt", value_name = "FILE")]
    output: PathBuf,

    /// Mark unreadable subdirectories instead of aborting
    #[arg(long)]
    skip_unreadable: bool,

    /// Print the tree to stdout instead of writing the file
    #[arg(long)]
    dry_run: bool,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose);

    let policy = if cli.skip_unreadable {
        AccessPolicy::Skip
    } else {
        AccessPolicy::Abort
    };

    let config = Config::builder()
        .root_dir(cli.root)
        .output_file(cli.output)
        .access_policy(policy)
        .dry_run(cli.dry_run)
        .build()
        .context("Failed to build configuration")?;

    let stats = generate(config, &mut std::io::stdout())?;
    if cli.verbose > 0 {
        stats.print_summary();
    }

    Ok(())
}

/// Runs the pipeline, reporting progress to `out`.
///
/// Nothing is reported before the root directory has been found.
fn generate(config: Config, out: &mut impl Write) -> anyhow::Result<RunStats> {
    let pipeline = Pipeline::new(config)?;
    // Reported bare: "'src' directory not found".
    pipeline.check_root()?;

    let dry_run = pipeline.config().dry_run;
    if !dry_run {
        writeln!(
            out,
            "Generating directory structure for {}...",
            pipeline.config().root_label
        )?;
    }

    let stats = pipeline.run().context("Tree generation failed")?;

    if !dry_run {
        writeln!(out, "Directory structure written to: {}", stats.output_file)?;
    }

    Ok(stats)
}

fn setup_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => EnvFilter::new("project_tree=warn"),
        1 => EnvFilter::new("project_tree=debug"),
        _ => EnvFilter::new("project_tree=trace"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
