//! Command-line entry point for apiforge.

use std::{
    io::{self, IsTerminal, Write},
    path::PathBuf,
    process::{Command, Stdio},
    time::Duration,
};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use libapiforge::{Config, DEFAULT_FORMATTER, DEFAULT_NAMESPACE, DEFAULT_TARGET, DocFormat, Source};
use tracing_subscriber::EnvFilter;

/// Where to read the documentation from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SourceArg {
    /// Fetch over HTTP(S)
    Web,
    /// Read a local file
    File,
}

/// Layout of the documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Html,
    Json,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line options.
struct Cli {
    /// Where to read the documentation from
    #[arg(long, value_enum, default_value = "web", env = "APIFORGE_SOURCE")]
    source: SourceArg,

    /// URL or path of the document, defaulting per source
    #[arg(long, env = "APIFORGE_LOCATION")]
    location: Option<String>,

    /// Document layout, html for web and json for file sources when omitted
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Splice the output into the target file between the marker lines
    #[arg(long, default_value_t = false)]
    replace: bool,

    /// File to splice into
    #[arg(long, default_value = DEFAULT_TARGET, env = "APIFORGE_TARGET")]
    target: PathBuf,

    /// Formatter command run on the target after splicing
    #[arg(long, default_value = DEFAULT_FORMATTER, env = "APIFORGE_FORMATTER")]
    formatter: String,

    /// Skip running the formatter after splicing
    #[arg(long, default_value_t = false)]
    no_format: bool,

    /// Namespace qualifying named return types
    #[arg(long, default_value = DEFAULT_NAMESPACE)]
    namespace: String,

    /// Extra section names to treat as generic types
    #[arg(long = "generic", value_delimiter = ',')]
    generics: Vec<String>,

    /// Extra section names documented without a table
    #[arg(long = "no-table", value_delimiter = ',')]
    tableless: Vec<String>,

    /// Section names to ignore
    #[arg(long, value_delimiter = ',')]
    skip: Vec<String>,

    /// Warn about referenced types that are never declared
    #[arg(long, default_value_t = false)]
    check_references: bool,

    /// Omit the settings comment under the banner
    #[arg(long, default_value_t = false)]
    no_header: bool,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Disable paging
    #[arg(long, default_value_t = false)]
    no_page: bool,

    /// Enable verbose tracing on stderr
    #[arg(long, default_value_t = false)]
    debug: bool,
}

impl Cli {
    /// Translate command-line options into a pipeline configuration.
    fn config(&self) -> Config {
        let source = match self.source {
            SourceArg::Web => Source::Remote,
            SourceArg::File => Source::Local,
        };
        let mut config = Config::new()
            .with_debug(self.debug)
            .with_splice(self.replace)
            .with_source(source)
            .with_target(self.target.clone())
            .with_formatter((!self.no_format).then(|| self.formatter.clone()))
            .with_namespace(self.namespace.clone())
            .with_frontmatter(!self.no_header)
            .with_timeout(Duration::from_secs(self.timeout))
            .with_generics(self.generics.clone())
            .with_tableless(self.tableless.clone())
            .with_skipped(self.skip.clone())
            .with_check_references(self.check_references);
        if let Some(location) = &self.location {
            config = config.with_location(location.clone());
        }
        if let Some(format) = self.format {
            config = config.with_format(match format {
                FormatArg::Html => DocFormat::Html,
                FormatArg::Json => DocFormat::Json,
            });
        }
        config
    }
}

/// Install the stderr log subscriber. `RUST_LOG` overrides the level chosen by `--debug`.
fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Generate, then print or page the result.
fn run_cmdline(cli: &Cli) -> Result<()> {
    let config = cli.config();
    init_tracing(&config);

    let output = libapiforge::run(&config)?;

    if io::stdout().is_terminal() && !cli.no_page {
        page_output(output)?;
    } else {
        print!("{output}");
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run_cmdline(&cli) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

/// Pipe `content` through `$PAGER`, defaulting to `less`.
fn page_output(content: String) -> Result<()> {
    let pager = std::env::var("PAGER").unwrap_or_else(|_| "less".to_string());
    let mut child = Command::new(&pager)
        .stdin(Stdio::piped())
        .spawn()
        .with_context(|| format!("failed to start pager {pager}"))?;

    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| io::Error::other("Failed to open stdin for pager"))?;

    std::thread::spawn(move || {
        stdin.write_all(content.as_bytes()).ok();
        // Explicitly drop stdin to signal EOF to the pager
        drop(stdin);
    });

    let status = child.wait().context("failed to wait for pager")?;
    if !status.success() {
        eprintln!("Pager exited with non-zero status: {status}");
    }
    Ok(())
}
