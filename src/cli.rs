//! Command-line argument parsing.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

pub const USAGE: &str = "\
usage: webpath [options] [SCRIPT_URL...]

Resolve target script URLs to client paths.

options:
  -c, --config FILE        read configuration from FILE only
  -w, --web-root DIR       fallback root directory
  -m, --map PREFIX=DIR     add a pathMapping rule (repeatable)
  -u, --url URL            page URL; webRoot only resolves its origin
  -b, --breakpoint PATH    translate a client path as setBreakpoints would
  -s, --stack-trace FILE   rewrite a stackTrace response body (JSON)
  -i, --ignore-case        compare client paths case-insensitively
      --match-case         compare client paths case-sensitively
                           (default: ignore case on Windows/macOS)
  -h, --help               show this help";

/// Parsed command line.
#[derive(Debug, Default, PartialEq)]
pub struct CliArgs {
    pub config: Option<PathBuf>,
    pub web_root: Option<String>,
    pub mappings: Vec<(String, String)>,
    pub url: Option<String>,
    pub breakpoints: Vec<String>,
    pub stack_trace: Option<PathBuf>,
    /// `Some` when `--ignore-case` or `--match-case` was given.
    pub case_insensitive: Option<bool>,
    pub help: bool,
    pub script_urls: Vec<String>,
}

impl CliArgs {
    /// Parse arguments, excluding the program name.
    pub fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Self> {
        let mut parsed = CliArgs::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            let mut value = |name: &str| {
                args.next()
                    .with_context(|| format!("{name} requires a value"))
            };
            match arg.as_str() {
                "-c" | "--config" => parsed.config = Some(PathBuf::from(value(&arg)?)),
                "-w" | "--web-root" => parsed.web_root = Some(value(&arg)?),
                "-u" | "--url" => parsed.url = Some(value(&arg)?),
                "-b" | "--breakpoint" => parsed.breakpoints.push(value(&arg)?),
                "-s" | "--stack-trace" => parsed.stack_trace = Some(PathBuf::from(value(&arg)?)),
                "-m" | "--map" => {
                    let rule = value(&arg)?;
                    let Some((prefix, dir)) = rule.split_once('=') else {
                        bail!("--map expects PREFIX=DIR, got {rule:?}");
                    };
                    parsed.mappings.push((prefix.to_string(), dir.to_string()));
                }
                "-i" | "--ignore-case" => parsed.case_insensitive = Some(true),
                "--match-case" => parsed.case_insensitive = Some(false),
                "-h" | "--help" => parsed.help = true,
                flag if flag.starts_with('-') && flag.len() > 1 => {
                    bail!("unknown option {flag:?}")
                }
                _ => parsed.script_urls.push(arg.clone()),
            }
        }
        Ok(parsed)
    }
}
