//! Extraction from a JSON mirror of the documentation.
//!
//! The document has the shape `{models: [...], methods: [...], generics: [...]}`. Sections are
//! explicit, so the registry is only used to drop skipped and duplicate names.

use serde::Deserialize;
use tracing::debug;

use super::{RawField, RawReturn, RawSection, RawType};
use crate::{
    error::{FetchError, Result},
    model::Verb,
    registry::{Registry, SectionKind},
    typemap::StructuredType,
};

#[derive(Debug, Deserialize)]
struct Document {
    #[serde(default)]
    models: Vec<JsonModel>,
    #[serde(default)]
    methods: Vec<JsonMethod>,
    #[serde(default)]
    generics: Vec<JsonGeneric>,
}

#[derive(Debug, Deserialize)]
struct JsonParam {
    name: String,
    #[serde(rename = "type")]
    ty: StructuredType,
    #[serde(default)]
    optional: bool,
}

impl From<JsonParam> for RawField {
    fn from(param: JsonParam) -> Self {
        Self {
            name: param.name,
            ty: RawType::Structured(param.ty),
            optional: param.optional,
        }
    }
}

#[derive(Debug, Deserialize)]
struct JsonModel {
    name: String,
    #[serde(default)]
    params: Vec<JsonParam>,
}

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(rename_all = "lowercase")]
enum JsonVerb {
    Get,
    Post,
}

impl From<JsonVerb> for Verb {
    fn from(verb: JsonVerb) -> Self {
        match verb {
            JsonVerb::Get => Self::Get,
            JsonVerb::Post => Self::Post,
        }
    }
}

#[derive(Debug, Deserialize)]
struct JsonMethod {
    name: String,
    #[serde(rename = "type")]
    verb: Option<JsonVerb>,
    #[serde(default)]
    params: Vec<JsonParam>,
    #[serde(rename = "return")]
    returns: Option<StructuredType>,
}

#[derive(Debug, Deserialize)]
struct JsonGeneric {
    name: String,
    #[serde(default)]
    subtypes: Vec<String>,
}

/// Keep a section unless the registry skips it.
fn wanted(registry: &mut Registry, name: &str) -> bool {
    registry.classify(name) != SectionKind::Skip
}

/// Extract sections from a JSON mirror. Methods come first, then models, then generics.
pub fn extract_json(json: &str, registry: &mut Registry) -> Result<Vec<RawSection>> {
    let document: Document = serde_json::from_str(json).map_err(FetchError::Json)?;
    debug!(
        methods = document.methods.len(),
        models = document.models.len(),
        generics = document.generics.len(),
        "decoded JSON document"
    );

    let mut sections = Vec::new();
    for method in document.methods {
        if !wanted(registry, &method.name) {
            continue;
        }
        sections.push(RawSection::Method {
            verb: method
                .verb
                .map_or_else(|| Verb::for_method(&method.name), Verb::from),
            fields: method.params.into_iter().map(RawField::from).collect(),
            returns: RawReturn::Structured(
                method
                    .returns
                    .unwrap_or_else(|| StructuredType::Atom("any".to_string())),
            ),
            name: method.name,
        });
    }
    for model in document.models {
        if !wanted(registry, &model.name) {
            continue;
        }
        sections.push(RawSection::Model {
            name: model.name,
            fields: model.params.into_iter().map(RawField::from).collect(),
        });
    }
    for generic in document.generics {
        if !wanted(registry, &generic.name) {
            continue;
        }
        sections.push(RawSection::Generic {
            name: generic.name,
            subtypes: generic.subtypes,
        });
    }
    Ok(sections)
}
