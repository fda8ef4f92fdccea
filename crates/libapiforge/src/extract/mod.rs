//! Section extraction from HTML pages and JSON mirrors.

mod html;
mod json;

use std::collections::HashSet;

pub use html::{START_ANCHOR, extract_html};
pub use json::extract_json;

use crate::{
    error::{ForgeError, Result},
    model::{ApiDefinition, Field, GenericType, Method, Model, TypeAlternatives, TypeExpr, Verb},
    returns::infer_return_type,
    typemap::{StructuredType, map_structured, map_type},
};

/// Layout of a source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocFormat {
    /// The published HTML documentation page.
    Html,
    /// A pre-parsed JSON mirror of the documentation.
    Json,
}

/// A type as it appears in the source document, before mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawType {
    /// Prose such as `Array of String`.
    Text(String),
    /// A JSON type.
    Structured(StructuredType),
}

impl RawType {
    fn map(&self) -> TypeAlternatives {
        match self {
            Self::Text(text) => map_type(text),
            Self::Structured(ty) => map_structured(ty),
        }
    }
}

/// Where a method's return type comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawReturn {
    /// Method description searched with the return phrase table.
    Prose(String),
    /// Return type given by the JSON mirror.
    Structured(StructuredType),
}

/// One row of a parameter or field table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawField {
    /// Parameter or field name.
    pub name: String,
    /// Unmapped type.
    pub ty: RawType,
    /// Whether the row is marked optional.
    pub optional: bool,
}

/// A classified documentation section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawSection {
    /// A method section.
    Method {
        /// Heading text.
        name: String,
        /// HTTP verb.
        verb: Verb,
        /// Parameter rows.
        fields: Vec<RawField>,
        /// Source of the return type.
        returns: RawReturn,
    },
    /// A model section.
    Model {
        /// Heading text.
        name: String,
        /// Field rows.
        fields: Vec<RawField>,
    },
    /// A generic union section.
    Generic {
        /// Heading text.
        name: String,
        /// Member names from the section's list.
        subtypes: Vec<String>,
    },
}

/// Map the fields of one section, rejecting repeated names.
fn lower_fields(section: &str, fields: Vec<RawField>) -> Result<Vec<Field>> {
    let mut names = HashSet::new();
    fields
        .into_iter()
        .map(|raw| {
            if !names.insert(raw.name.clone()) {
                return Err(ForgeError::extraction(
                    section,
                    format!("field {} is declared twice", raw.name),
                ));
            }
            Ok(Field {
                types: raw.ty.map(),
                name: raw.name,
                optional: raw.optional,
            })
        })
        .collect()
}

fn lower_return(returns: &RawReturn) -> TypeExpr {
    match returns {
        RawReturn::Prose(text) => infer_return_type(text),
        RawReturn::Structured(ty) => map_structured(ty).primary(),
    }
}

/// Run the type mapper over extracted sections.
pub fn lower(sections: Vec<RawSection>) -> Result<ApiDefinition> {
    let mut api = ApiDefinition::default();
    for section in sections {
        match section {
            RawSection::Method {
                name,
                verb,
                fields,
                returns,
            } => {
                let fields = lower_fields(&name, fields)?;
                api.methods.push(Method {
                    return_type: lower_return(&returns),
                    name,
                    verb,
                    fields,
                });
            }
            RawSection::Model { name, fields } => {
                let fields = lower_fields(&name, fields)?;
                api.models.push(Model { name, fields });
            }
            RawSection::Generic { name, subtypes } => {
                api.generics.push(GenericType { name, subtypes });
            }
        }
    }
    Ok(api)
}
