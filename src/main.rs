use clap::{ArgAction, Parser, Subcommand};
use folio::{config, generate, output, scan};
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    if env!("FOLIO_RELEASE_BUILD") == "true" {
        return env!("CARGO_PKG_VERSION");
    }
    match env!("FOLIO_GIT_HASH") {
        "" => "dev@unknown",
        // Called once per process
        hash => Box::leak(format!("dev@{hash}").into_boxed_str()),
    }
}

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Static site generator for single-page developer portfolios")]
#[command(long_about = "\
Static site generator for single-page developer portfolios

One TOML file describes the page. The output is a single index.html with
scroll-triggered reveals, a spring-animated cursor ring and a light/dark
toggle, plus the images it references.

Content structure:

  content/
  ├── config.toml          # Colors, motion and theme settings (optional)
  ├── portfolio.toml       # Profile, hero facts, projects, contact, footer
  ├── about.md             # Replaces [about].paragraphs when present
  └── assets/              # Images, copied to dist/assets/
      ├── avatar.jpg
      └── moodboard/       # NNN-name.ext, replaces [[moodboard]] when non-empty
          ├── 010-workspace.jpg
          └── 020-sketches.jpg

Missing images are replaced by a placeholder and reported as warnings.

Run 'folio gen-content > content/portfolio.toml' for a starting point and
'folio gen-config' for every option with its default.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for the intermediate manifest
    #[arg(long, default_value = ".folio-temp", global = true)]
    temp_dir: PathBuf,

    /// Log diagnostics (RUST_LOG overrides)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan content into a manifest
    Scan,
    /// Produce the site from a scanned manifest
    Generate,
    /// Run the full pipeline: scan → generate
    Build,
    /// Validate content and report how the configured motion behaves
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
    /// Print a sample portfolio.toml
    GenContent,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Scan => {
            let manifest = scan::scan(&cli.source)?;
            write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest, &cli.source);
        }
        Command::Generate => {
            let manifest_path = cli.temp_dir.join("manifest.json");
            let report = generate::generate(&manifest_path, &cli.source, &cli.output)?;
            output::print_generate_output(&report);
        }
        Command::Build => {
            println!("==> Stage 1: Scanning {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            let manifest_path = write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest, &cli.source);

            println!("==> Stage 2: Generating HTML → {}", cli.output.display());
            let report = generate::generate(&manifest_path, &cli.source, &cli.output)?;
            output::print_generate_output(&report);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            output::print_scan_output(&manifest, &cli.source);
            println!();
            output::print_motion_report(&manifest.config);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::GenContent => {
            print!("{}", scan::sample_portfolio_toml());
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = if verbose > 0 { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Write the scan manifest into `temp_dir`, returning its path.
fn write_manifest(manifest: &scan::Manifest, temp_dir: &Path) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(temp_dir)?;
    let path = temp_dir.join("manifest.json");
    let json = serde_json::to_string_pretty(manifest).map_err(std::io::Error::other)?;
    std::fs::write(&path, json)?;
    log::debug!("wrote manifest to {}", path.display());
    Ok(path)
}
