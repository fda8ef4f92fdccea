//! Definitions extracted from API documentation.

use std::fmt;

/// Primitive type kinds understood by the generated DSL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// Whole numbers.
    Integer,
    /// Text.
    String,
    /// Booleans, including the `True` literal type.
    Boolean,
    /// Floating point numbers.
    Float,
    /// Uploaded files.
    File,
    /// Unknown or unparsed types.
    Any,
}

impl Primitive {
    /// The DSL atom for this primitive.
    pub fn token(self) -> &'static str {
        match self {
            Self::Integer => ":integer",
            Self::String => ":string",
            Self::Boolean => ":boolean",
            Self::Float => ":float",
            Self::File => ":file",
            Self::Any => ":any",
        }
    }
}

/// A canonical type descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeExpr {
    /// A builtin type.
    Primitive(Primitive),
    /// Reference to a model or generic type by name.
    Named(String),
    /// A list of the inner type.
    Array(Box<Self>),
    /// Fixed group of types, produced by `A and B` or `A, B and C`.
    Union(Vec<Self>),
}

impl TypeExpr {
    /// Shorthand for `TypeExpr::Primitive(Primitive::Any)`.
    pub const ANY: Self = Self::Primitive(Primitive::Any);

    /// Construct a named reference.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Construct an array of `inner`.
    pub fn array(inner: Self) -> Self {
        Self::Array(Box::new(inner))
    }

    /// Visit every named reference in this expression.
    pub fn walk_names<'a>(&'a self, visit: &mut impl FnMut(&'a str)) {
        match self {
            Self::Primitive(_) => {}
            Self::Named(name) => visit(name.as_str()),
            Self::Array(inner) => inner.walk_names(visit),
            Self::Union(items) => items.iter().for_each(|item| item.walk_names(visit)),
        }
    }
}

impl From<Primitive> for TypeExpr {
    fn from(primitive: Primitive) -> Self {
        Self::Primitive(primitive)
    }
}

/// Ordered alternatives of a type expression joined by `or`.
///
/// Single-type contexts use the first alternative.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeAlternatives(pub Vec<TypeExpr>);

impl TypeAlternatives {
    /// Wrap a single type.
    pub fn single(ty: TypeExpr) -> Self {
        Self(vec![ty])
    }

    /// The first alternative, or `any` when nothing parsed.
    pub fn primary(&self) -> TypeExpr {
        self.0.first().cloned().unwrap_or(TypeExpr::ANY)
    }

    /// Whether no alternative parsed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Alternatives in documented order.
    pub fn iter(&self) -> std::slice::Iter<'_, TypeExpr> {
        self.0.iter()
    }
}

/// A parameter of a method or a field of a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Parameter or field name.
    pub name: String,
    /// Documented types, in order.
    pub types: TypeAlternatives,
    /// Whether the value may be omitted.
    pub optional: bool,
}

/// HTTP verb used to call a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    /// `GET` request.
    Get,
    /// `POST` request.
    Post,
}

impl Verb {
    /// Derive the verb from a method name: `get*` methods are `GET`, everything else `POST`.
    pub fn for_method(name: &str) -> Self {
        if name.starts_with("get") {
            Self::Get
        } else {
            Self::Post
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => f.write_str(":get"),
            Self::Post => f.write_str(":post"),
        }
    }
}

/// A remote operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    /// Method name as documented, e.g. `sendMessage`.
    pub name: String,
    /// HTTP verb.
    pub verb: Verb,
    /// Parameters in table order.
    pub fields: Vec<Field>,
    /// Type of a successful result.
    pub return_type: TypeExpr,
}

/// A record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    /// Model name.
    pub name: String,
    /// Fields in table order.
    pub fields: Vec<Field>,
}

/// A tagged union over a closed set of models.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericType {
    /// Union name.
    pub name: String,
    /// Member model names.
    pub subtypes: Vec<String>,
}

/// Everything extracted from one document, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiDefinition {
    /// Methods.
    pub methods: Vec<Method>,
    /// Models.
    pub models: Vec<Model>,
    /// Generic unions.
    pub generics: Vec<GenericType>,
}

impl ApiDefinition {
    /// Named references that resolve to no declared model or generic.
    pub fn unresolved_references(&self) -> Vec<String> {
        let declared: std::collections::HashSet<&str> = self
            .models
            .iter()
            .map(|model| model.name.as_str())
            .chain(self.generics.iter().map(|generic| generic.name.as_str()))
            .collect();

        let mut missing = Vec::new();
        let mut note = |name: &str| {
            if !declared.contains(name) && !missing.iter().any(|seen: &String| seen == name) {
                missing.push(name.to_string());
            }
        };

        let fields = self
            .methods
            .iter()
            .flat_map(|method| &method.fields)
            .chain(self.models.iter().flat_map(|model| &model.fields));
        for field in fields {
            for ty in field.types.iter() {
                ty.walk_names(&mut note);
            }
        }
        for method in &self.methods {
            method.return_type.walk_names(&mut note);
        }
        for generic in &self.generics {
            for subtype in &generic.subtypes {
                note(subtype.as_str());
            }
        }

        missing
    }
}
