use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{
    extract::DocFormat,
    fetch::Location,
    frontmatter::FrontmatterConfig,
    registry::Registry,
    render::{DEFAULT_NAMESPACE, Renderer},
    sink::DEFAULT_FORMATTER,
};

/// Published documentation page read when the source is remote.
pub const DEFAULT_URL: &str = "https://core.telegram.org/bots/api";
/// JSON mirror read when the source is local.
pub const DEFAULT_LOCAL_PATH: &str = "api.json";
/// File receiving generated code when splicing.
pub const DEFAULT_TARGET: &str = "lib/ex_gram.ex";
/// Timeout applied to remote requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the document comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Source {
    /// Fetched over HTTP(S).
    #[default]
    Remote,
    /// Read from the local filesystem.
    Local,
}

/// Settings for one generation run.
///
/// Unset options fall back per source: remote runs read [`DEFAULT_URL`] as HTML, local runs
/// read [`DEFAULT_LOCAL_PATH`] as JSON.
#[derive(Debug, Clone)]
pub struct Config {
    /// Verbose tracing.
    debug: bool,
    /// Write into the target file in addition to returning the output.
    splice: bool,
    source: Source,
    location: Option<String>,
    format: Option<DocFormat>,
    target: PathBuf,
    /// Command line run on the target after splicing. `None` skips formatting.
    formatter: Option<String>,
    namespace: String,
    frontmatter: bool,
    timeout: Duration,
    generics: Vec<String>,
    tableless: Vec<String>,
    skip: Vec<String>,
    /// Warn about named types with no declaration.
    check_references: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// A configuration reading the published page, splicing disabled.
    pub fn new() -> Self {
        Self {
            debug: false,
            splice: false,
            source: Source::Remote,
            location: None,
            format: None,
            target: PathBuf::from(DEFAULT_TARGET),
            formatter: Some(DEFAULT_FORMATTER.to_string()),
            namespace: DEFAULT_NAMESPACE.to_string(),
            frontmatter: true,
            timeout: DEFAULT_TIMEOUT,
            generics: Vec::new(),
            tableless: Vec::new(),
            skip: Vec::new(),
            check_references: false,
        }
    }

    /// Enables or disables verbose tracing.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Enables or disables writing the output into the target file.
    pub fn with_splice(mut self, splice: bool) -> Self {
        self.splice = splice;
        self
    }

    /// Sets where the document comes from.
    pub fn with_source(mut self, source: Source) -> Self {
        self.source = source;
        self
    }

    /// Overrides the URL or path of the source document.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Overrides the document layout.
    pub fn with_format(mut self, format: DocFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Sets the file spliced into.
    pub fn with_target(mut self, target: impl Into<PathBuf>) -> Self {
        self.target = target.into();
        self
    }

    /// Sets the formatter command line, or disables formatting with `None`.
    pub fn with_formatter(mut self, formatter: Option<String>) -> Self {
        self.formatter = formatter;
        self
    }

    /// Sets the namespace qualifying named return types.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Enables or disables the settings comment under the banner.
    pub fn with_frontmatter(mut self, frontmatter: bool) -> Self {
        self.frontmatter = frontmatter;
        self
    }

    /// Sets the timeout for remote requests.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Adds section names handled as generic types.
    pub fn with_generics(mut self, names: Vec<String>) -> Self {
        self.generics.extend(names);
        self
    }

    /// Adds section names extracted without a table.
    pub fn with_tableless(mut self, names: Vec<String>) -> Self {
        self.tableless.extend(names);
        self
    }

    /// Adds section names that are ignored.
    pub fn with_skipped(mut self, names: Vec<String>) -> Self {
        self.skip.extend(names);
        self
    }

    /// Enables or disables warnings for undeclared type references.
    pub fn with_check_references(mut self, check_references: bool) -> Self {
        self.check_references = check_references;
        self
    }

    /// Whether verbose tracing is enabled.
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Whether output is written into the target file.
    pub fn splice(&self) -> bool {
        self.splice
    }

    /// Where the document comes from.
    pub fn source(&self) -> Source {
        self.source
    }

    /// File spliced into.
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Formatter command line, if formatting is enabled.
    pub fn formatter(&self) -> Option<&str> {
        self.formatter.as_deref()
    }

    /// Timeout for remote requests.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Whether undeclared type references are reported.
    pub fn check_references(&self) -> bool {
        self.check_references
    }

    /// Default log filter for this configuration.
    pub fn log_filter(&self) -> &'static str {
        if self.debug { "debug" } else { "warn" }
    }

    /// Resolved document location.
    pub fn location(&self) -> Location {
        match (&self.location, self.source) {
            (Some(location), _) => Location::parse(location),
            (None, Source::Remote) => Location::Url(DEFAULT_URL.to_string()),
            (None, Source::Local) => Location::Path(PathBuf::from(DEFAULT_LOCAL_PATH)),
        }
    }

    /// Resolved document format.
    pub fn format(&self) -> DocFormat {
        self.format.unwrap_or(match self.source {
            Source::Remote => DocFormat::Html,
            Source::Local => DocFormat::Json,
        })
    }

    /// A fresh registry for one run.
    pub fn registry(&self) -> Registry {
        Registry::new()
            .with_generics(self.generics.iter().cloned())
            .with_tableless(self.tableless.iter().cloned())
            .with_skipped(self.skip.iter().cloned())
    }

    /// A renderer using this configuration's namespace and header settings.
    pub fn renderer(&self) -> Renderer {
        let frontmatter = if self.frontmatter {
            FrontmatterConfig::for_source(self.location().display()).with_format(self.format())
        } else {
            FrontmatterConfig::disabled()
        };
        Renderer::new()
            .with_namespace(self.namespace.clone())
            .with_frontmatter(frontmatter)
    }
}
