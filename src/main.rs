mod cli;

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use webpath_config::{load_config, load_file, Config};
use webpath_core::logging::{default_log_file_path, ensure_log_dir, log_level_to_filter, LogRotation};
use webpath_core::{PathTransformer, SessionConfigurable};
use webpath_dap::{SetBreakpointsArguments, Source, StackTraceResponseBody};

use crate::cli::{CliArgs, USAGE};

/// Send tracing output to the configured log file so it never mixes with
/// the resolved paths on stdout. `RUST_LOG` overrides the configured level.
fn init_logging(config: &Config) {
    let log_path = config.log.file.clone().unwrap_or_else(default_log_file_path);
    if let Err(e) = ensure_log_dir(&log_path) {
        eprintln!("webpath: cannot create log directory: {e}");
        return;
    }
    if let Err(e) = LogRotation::default().rotate(&log_path) {
        eprintln!("webpath: log rotation failed: {e}");
    }
    let log_file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("webpath: cannot open log file {}: {e}", log_path.display());
            return;
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level_to_filter(config.log.level.as_str())));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();
}

fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(env::temp_dir)
        .join("webpath")
}

fn load(args: &CliArgs) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => load_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => {
            let project_dir = env::current_dir().ok();
            load_config(&config_dir(), project_dir.as_deref())
                .context("failed to load configuration")?
        }
    };

    let resolver = &mut config.resolver;
    if let Some(web_root) = &args.web_root {
        resolver.web_root = Some(web_root.clone());
    }
    if let Some(url) = &args.url {
        resolver.url = Some(url.clone());
    }
    for (prefix, dir) in &args.mappings {
        resolver.path_mapping.insert(prefix.clone(), dir.clone());
    }
    if args.case_insensitive.is_some() {
        resolver.case_insensitive_paths = args.case_insensitive;
    }
    Ok(config)
}

fn rewrite_stack_trace(transformer: &PathTransformer, path: &Path) -> Result<String> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let mut body: StackTraceResponseBody = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a stackTrace response body", path.display()))?;
    transformer.stack_trace_response(&mut body);
    serde_json::to_string_pretty(&body).context("failed to encode stack trace")
}

fn run(args: CliArgs) -> Result<()> {
    let config = load(&args)?;
    init_logging(&config);

    let mut transformer = PathTransformer::new();
    if let Some(case_insensitive) = config.resolver.case_insensitive_paths {
        transformer = transformer.case_insensitive(case_insensitive);
    }
    transformer
        .launch(&config.resolver.to_launch_arguments())
        .context("failed to configure path transformer")?;

    for url in &args.script_urls {
        let resolved = transformer.script_parsed(url);
        println!("{url}\t{resolved}");
    }

    for path in &args.breakpoints {
        let mut request = SetBreakpointsArguments {
            source: Source::from_path(path.as_str()),
            breakpoints: None,
            source_modified: None,
        };
        transformer.set_breakpoints(&mut request);
        println!("{path}\t{}", request.source.path.unwrap_or_default());
    }

    if let Some(stack_trace) = &args.stack_trace {
        println!("{}", rewrite_stack_trace(&transformer, stack_trace)?);
    }

    info!(
        scripts = args.script_urls.len(),
        cached = transformer.state().cache.len(),
        "webpath finished"
    );
    Ok(())
}

fn main() {
    let args = match CliArgs::parse(env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("webpath: {e:#}\n\n{USAGE}");
            std::process::exit(2);
        }
    };
    if args.help {
        println!("{USAGE}");
        return;
    }

    if let Err(e) = run(args) {
        error!("{e:#}");
        eprintln!("webpath: {e:#}");
        std::process::exit(1);
    }
}
