//! Apiforge generates client library declarations from bot API documentation.
//!
//! A run fetches the published HTML page (or a JSON mirror of it), classifies each section as
//! a method, a model or a generic union, maps the documented types onto [`TypeExpr`] and
//! renders `method`/`model`/`defmodule` declarations. The output can be spliced into an
//! existing source file between `START AUTO GENERATED` and `END AUTO GENERATED` marker lines,
//! after which an external formatter is run on that file.

mod config;
mod error;
mod extract;
mod fetch;
mod frontmatter;
mod model;
mod registry;
mod render;
mod returns;
mod sink;
mod typemap;

use tracing::{debug, warn};

pub use crate::config::{
    Config, DEFAULT_LOCAL_PATH, DEFAULT_TARGET, DEFAULT_TIMEOUT, DEFAULT_URL, Source,
};
pub use crate::error::{FetchError, ForgeError, Result};
pub use crate::extract::{
    DocFormat, RawField, RawReturn, RawSection, RawType, START_ANCHOR, extract_html,
    extract_json, lower,
};
pub use crate::fetch::{Location, USER_AGENT, fetch};
pub use crate::frontmatter::{FrontmatterConfig, GENERATED_BANNER};
pub use crate::model::{
    ApiDefinition, Field, GenericType, Method, Model, Primitive, TypeAlternatives, TypeExpr, Verb,
};
pub use crate::registry::{DEFAULT_GENERICS, DEFAULT_TABLELESS, Registry, SectionKind};
pub use crate::render::{DEFAULT_NAMESPACE, Renderer, param_type, render_generic, render_model};
pub use crate::returns::{Extract, RETURN_RULES, ReturnRule, infer_return_type, infer_with};
pub use crate::sink::{
    DEFAULT_FORMATTER, END_MARKER, START_MARKER, run_formatter, splice, splice_file,
};
pub use crate::typemap::{
    StructuredType, TypeParseError, map_return_word, map_structured, map_type, parse_single,
};

/// Extract definitions from an already retrieved document.
pub fn parse_document(config: &Config, document: &str) -> Result<ApiDefinition> {
    let mut registry = config.registry();
    let sections = match config.format() {
        DocFormat::Html => extract_html(document, &mut registry)?,
        DocFormat::Json => extract_json(document, &mut registry)?,
    };
    let api = lower(sections)?;
    debug!(
        methods = api.methods.len(),
        models = api.models.len(),
        generics = api.generics.len(),
        "extracted definitions"
    );

    if config.check_references() {
        for name in api.unresolved_references() {
            warn!(%name, "type reference has no declaration");
        }
    }
    Ok(api)
}

/// Render an already retrieved document.
pub fn render_document(config: &Config, document: &str) -> Result<String> {
    let api = parse_document(config, document)?;
    Ok(config.renderer().render(&api))
}

/// Fetch, extract and render without touching any file.
pub fn generate(config: &Config) -> Result<String> {
    let document = fetch(&config.location(), config.timeout())?;
    render_document(config, &document)
}

/// Generate, then splice into the target file and format it when splicing is enabled.
///
/// Returns the rendered text. Nothing is written when any stage fails.
pub fn run(config: &Config) -> Result<String> {
    let rendered = generate(config)?;
    if config.splice() {
        splice_file(config.target(), &rendered)?;
        if let Some(formatter) = config.formatter() {
            run_formatter(formatter, config.target())?;
        }
    }
    Ok(rendered)
}
