use crate::extract::DocFormat;

/// Marker line opening every generated block.
pub const GENERATED_BANNER: &str = "# AUTO GENERATED";

/// Configuration describing the comment block rendered ahead of generated declarations.
#[derive(Debug, Clone, Default)]
pub struct FrontmatterConfig {
    /// Whether the settings line should be rendered. The banner is always present.
    pub enabled: bool,
    /// Location the document was read from.
    pub source: Option<String>,
    /// Layout of the source document.
    pub format: Option<DocFormat>,
}

impl FrontmatterConfig {
    /// Create a configuration with frontmatter enabled for the provided source location.
    pub fn for_source(source: impl Into<String>) -> Self {
        Self {
            enabled: true,
            source: Some(source.into()),
            format: None,
        }
    }

    /// Disable the settings line entirely.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Record the layout of the source document.
    pub fn with_format(mut self, format: DocFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Render the banner and, when enabled, a settings comment.
    ///
    /// Only stable inputs appear here so regenerating from the same document is byte-identical.
    pub fn render(&self, namespace: &str) -> String {
        let mut output = String::new();
        output.push_str(GENERATED_BANNER);
        output.push('\n');

        if self.enabled {
            let mut settings = Vec::new();
            if let Some(source) = &self.source {
                settings.push(format!("source={source}"));
            }
            if let Some(format) = self.format {
                let format = match format {
                    DocFormat::Html => "html",
                    DocFormat::Json => "json",
                };
                settings.push(format!("format={format}"));
            }
            settings.push(format!("namespace={namespace}"));
            output.push_str("# settings: ");
            output.push_str(&settings.join(", "));
            output.push('\n');
        }
        output.push('\n');
        output
    }
}
