use anyhow::{Context, Result, bail};
use clap::Parser;
use cypherdoc_config::Config;
use cypherdoc_engine::{CommandEngine, QueryEngine};
use std::path::{Path, PathBuf};
use std::{fs, process};

/// Render cypherdoc documents, executing and verifying their Cypher queries.
#[derive(Debug, Parser)]
#[command(name = "cypherdoc", version, about)]
struct Cli {
    /// Documents to render; glob patterns are expanded
    #[arg(required_unless_present = "write_config", value_name = "FILES")]
    files: Vec<String>,

    /// Config file (defaults to ~/.config/cypherdoc/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Query engine program, overriding the config file
    #[arg(long, value_name = "PROG")]
    program: Option<String>,

    /// Write `<name>.asciidoc` files here instead of printing
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Save the effective config to the config file and exit
    #[arg(long)]
    write_config: bool,
}

fn main() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        log::error!("{e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;

    if cli.write_config {
        let path = cli.config.unwrap_or_else(Config::config_path);
        config
            .save_to_path(&path)
            .with_context(|| format!("Failed to write config file '{}'", path.display()))?;
        log::info!("Wrote config to {}", path.display());
        return Ok(());
    }

    let engine = build_engine(&config);

    let inputs = expand_inputs(&cli.files)?;
    if let Some(dir) = &cli.output_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory '{}'", dir.display()))?;
    }

    for input in &inputs {
        log::info!("Rendering {}", input.display());
        let output = render_file(input, &engine)?;
        match &cli.output_dir {
            Some(dir) => {
                let target = output_path(dir, input);
                fs::write(&target, output)
                    .with_context(|| format!("Failed to write '{}'", target.display()))?;
                log::info!("Wrote {}", target.display());
            }
            None => {
                println!("\n\n/// RESULT ///\n");
                println!("{output}");
            }
        }
    }
    Ok(())
}

/// Loads the config file and applies command-line overrides.
///
/// An explicit `--config` that does not exist is an error, except when it is
/// about to be written.
fn resolve_config(cli: &Cli) -> Result<Config> {
    let loaded = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    let mut config = match (loaded, &cli.config) {
        (Some(config), _) => config,
        (None, Some(path)) if !cli.write_config => {
            bail!("Config file '{}' not found", path.display())
        }
        (None, _) => Config::default(),
    };
    if let Some(program) = &cli.program {
        config.engine.program = program.clone();
    }
    Ok(config)
}

fn build_engine(config: &Config) -> CommandEngine {
    let engine = &config.engine;
    CommandEngine::new(engine.program.clone())
        .with_args(engine.args.iter().cloned())
        .with_reset_query(engine.reset_query.clone())
}

/// Expands glob patterns in order. Existing files are taken literally even
/// when their names contain glob metacharacters. Plain paths are kept even if
/// missing so reading them reports the real error.
fn expand_inputs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();
    for pattern in patterns {
        if !pattern.contains(['*', '?', '[']) || Path::new(pattern).exists() {
            inputs.push(PathBuf::from(pattern));
            continue;
        }
        let mut matched = glob::glob(pattern)
            .with_context(|| format!("Invalid glob pattern '{pattern}'"))?
            .collect::<Result<Vec<_>, _>>()?;
        if matched.is_empty() {
            bail!("No files match '{pattern}'");
        }
        matched.sort();
        inputs.extend(matched);
    }
    Ok(inputs)
}

fn render_file<E: QueryEngine>(path: &Path, engine: &E) -> Result<String> {
    let input = fs::read_to_string(path)
        .with_context(|| format!("Failed to read '{}'", path.display()))?;
    cypherdoc_engine::parse(&input, engine)
        .with_context(|| format!("Failed to render '{}'", path.display()))
}

fn output_path(dir: &Path, input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    dir.join(format!("{stem}.asciidoc"))
}
