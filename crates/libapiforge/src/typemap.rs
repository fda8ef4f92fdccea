//! Mapping of documentation type expressions onto [`TypeExpr`].
//!
//! Prose type expressions follow a small grammar:
//!
//! ```text
//! alternatives := single (" or " single)*
//! single       := keyword | "Array of " alternatives | list | bare-name
//! list         := single (", " single)* " and " single
//! ```
//!
//! Unrecognised expressions are not fatal. They are logged and dropped, and single-type
//! contexts fall back to `any`.

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::model::{Primitive, TypeAlternatives, TypeExpr};

/// Keyword table for prose type expressions.
const KEYWORDS: &[(&str, Primitive)] = &[
    ("Integer", Primitive::Integer),
    ("String", Primitive::String),
    ("Boolean", Primitive::Boolean),
    ("True", Primitive::Boolean),
    ("Float", Primitive::Float),
    ("Float number", Primitive::Float),
    ("InputFile", Primitive::File),
];

/// Short names accepted in structured (JSON) type atoms.
const STRUCTURED_KEYWORDS: &[(&str, Primitive)] = &[
    ("int", Primitive::Integer),
    ("integer", Primitive::Integer),
    ("str", Primitive::String),
    ("string", Primitive::String),
    ("bool", Primitive::Boolean),
    ("boolean", Primitive::Boolean),
    ("true", Primitive::Boolean),
    ("float", Primitive::Float),
    ("file", Primitive::File),
    ("any", Primitive::Any),
];

/// A type expression the mapper could not interpret.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognised type expression {0:?}")]
pub struct TypeParseError(pub String);

/// A type as written in the JSON mirror of the documentation.
///
/// Atoms are strings, arrays are `{"array": T}` and a list holds alternatives. A list nested
/// inside an array is a fixed group instead.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum StructuredType {
    /// A primitive key such as `int`, or a type name.
    Atom(String),
    /// `{"array": T}`.
    Array { array: Box<Self> },
    /// A list of types.
    List(Vec<Self>),
}

fn keyword(text: &str) -> Option<Primitive> {
    KEYWORDS
        .iter()
        .find(|(word, _)| *word == text)
        .map(|(_, primitive)| *primitive)
}

/// Whether `text` is a single identifier starting with an uppercase letter.
fn is_bare_name(text: &str) -> bool {
    let mut chars = text.chars();
    chars.next().is_some_and(char::is_uppercase)
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Log a miss and substitute `any`.
fn or_any(result: Result<TypeExpr, TypeParseError>) -> TypeExpr {
    result.unwrap_or_else(|err| {
        debug!("{err}, using any");
        TypeExpr::ANY
    })
}

/// Map a prose type expression such as `Integer or String` or `Array of PhotoSize`.
pub fn map_type(text: &str) -> TypeAlternatives {
    let alternatives = text
        .split(" or ")
        .filter_map(|alternative| match parse_single(alternative.trim()) {
            Ok(ty) => Some(ty),
            Err(err) => {
                debug!("{err}");
                None
            }
        })
        .collect();
    TypeAlternatives(alternatives)
}

/// Parse one alternative.
pub fn parse_single(text: &str) -> Result<TypeExpr, TypeParseError> {
    if let Some(primitive) = keyword(text) {
        return Ok(primitive.into());
    }

    if text.starts_with("Array") {
        let element = text
            .split_once(" of ")
            .map(|(_, rest)| map_type(rest).primary())
            .unwrap_or(TypeExpr::ANY);
        return Ok(TypeExpr::array(element));
    }

    if let Some((head, last)) = text.split_once(" and ") {
        let mut items: Vec<TypeExpr> = head
            .split(", ")
            .map(|item| or_any(parse_single(item.trim())))
            .collect();
        items.push(map_type(last).primary());
        return Ok(TypeExpr::Union(items));
    }

    if is_bare_name(text) {
        return Ok(TypeExpr::named(text));
    }

    Err(TypeParseError(text.to_string()))
}

/// Map a word lifted out of a method description into a return type.
///
/// Surrounding punctuation is discarded. `Int` is accepted alongside the prose keywords
/// since descriptions use it for integer results.
pub fn map_return_word(word: &str) -> TypeExpr {
    let word = word.trim_matches(|c: char| c == '.' || c == ',' || c.is_whitespace());
    if word == "Int" {
        return Primitive::Integer.into();
    }
    or_any(parse_single(word))
}

fn structured_atom(atom: &str) -> Result<TypeExpr, TypeParseError> {
    if let Some((_, primitive)) = STRUCTURED_KEYWORDS.iter().find(|(word, _)| *word == atom) {
        return Ok((*primitive).into());
    }
    if atom == "array" {
        return Ok(TypeExpr::array(TypeExpr::ANY));
    }
    if let Some(primitive) = keyword(atom) {
        return Ok(primitive.into());
    }
    if is_bare_name(atom) {
        return Ok(TypeExpr::named(atom));
    }
    Err(TypeParseError(atom.to_string()))
}

/// Map a structured type in single-type position.
pub fn structured_single(ty: &StructuredType) -> Result<TypeExpr, TypeParseError> {
    match ty {
        StructuredType::Atom(atom) => structured_atom(atom),
        StructuredType::Array { array } => Ok(TypeExpr::array(or_any(structured_single(array)))),
        StructuredType::List(items) => Ok(TypeExpr::Union(
            items
                .iter()
                .map(|item| or_any(structured_single(item)))
                .collect(),
        )),
    }
}

/// Map a structured type, treating a top-level list as alternatives.
pub fn map_structured(ty: &StructuredType) -> TypeAlternatives {
    let items: Vec<&StructuredType> = match ty {
        StructuredType::List(items) => items.iter().collect(),
        other => vec![other],
    };
    let alternatives = items
        .into_iter()
        .filter_map(|item| match structured_single(item) {
            Ok(ty) => Some(ty),
            Err(err) => {
                debug!("{err}");
                None
            }
        })
        .collect();
    TypeAlternatives(alternatives)
}
