use crate::{
    frontmatter::FrontmatterConfig,
    model::{ApiDefinition, Field, GenericType, Method, Model, TypeExpr},
};

/// Namespace prefixed to named return types by default.
pub const DEFAULT_NAMESPACE: &str = "ExGram.Model";

/// Renders extracted definitions into DSL declarations.
///
/// Output has three titled sections: methods, then models and generics nested in the model
/// module.
#[derive(Debug, Clone)]
pub struct Renderer {
    /// Qualifies named types in return position.
    namespace: String,
    frontmatter: FrontmatterConfig,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    /// A renderer with the default namespace and no settings line.
    pub fn new() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            frontmatter: FrontmatterConfig::disabled(),
        }
    }

    /// Sets the namespace used in return position.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Sets the header block rendered first.
    pub fn with_frontmatter(mut self, frontmatter: FrontmatterConfig) -> Self {
        self.frontmatter = frontmatter;
        self
    }

    /// Render the whole definition set.
    pub fn render(&self, api: &ApiDefinition) -> String {
        let mut output = self.frontmatter.render(&self.namespace);

        output.push_str("# Methods\n\n");
        let methods: Vec<String> = api
            .methods
            .iter()
            .map(|method| self.render_method(method))
            .collect();
        push_block(&mut output, &methods.join("\n\n"));

        output.push_str("# Models\n\ndefmodule Model do\n");
        let models: Vec<String> = api.models.iter().map(render_model).collect();
        if !models.is_empty() {
            output.push_str("  ");
            output.push_str(&models.join("\n\n  "));
            output.push_str("\n\n");
        }

        output.push_str("  # Generics\n\n");
        let generics: Vec<String> = api.generics.iter().map(render_generic).collect();
        push_block(&mut output, &generics.join("\n\n"));

        output.push_str("end\n");
        output
    }

    /// `method :post, "sendMessage", [{chat_id, [:integer, :string]}], ExGram.Model.Message`
    pub fn render_method(&self, method: &Method) -> String {
        let fields: Vec<String> = method.fields.iter().map(render_method_field).collect();
        format!(
            "method {}, \"{}\", [{}], {}",
            method.verb,
            method.name,
            fields.join(", "),
            self.return_type(&method.return_type)
        )
    }

    /// Render a type in return position, qualifying named types with the namespace.
    pub fn return_type(&self, ty: &TypeExpr) -> String {
        match ty {
            TypeExpr::Primitive(primitive) => primitive.token().to_string(),
            TypeExpr::Named(name) => format!("{}.{}", self.namespace, name),
            TypeExpr::Array(inner) => format!("[{}]", self.return_type(inner)),
            TypeExpr::Union(items) => {
                let items: Vec<String> = items.iter().map(|item| self.return_type(item)).collect();
                format!("[{}]", items.join(", "))
            }
        }
    }
}

/// Push a non-empty block followed by a blank line.
fn push_block(output: &mut String, block: &str) {
    if !block.is_empty() {
        output.push_str(block);
        output.push_str("\n\n");
    }
}

/// Render a type in parameter or field position.
pub fn param_type(ty: &TypeExpr) -> String {
    match ty {
        TypeExpr::Primitive(primitive) => primitive.token().to_string(),
        TypeExpr::Named(name) => name.clone(),
        TypeExpr::Array(inner) => format!("{{:array, {}}}", param_type(inner)),
        TypeExpr::Union(items) => {
            let items: Vec<String> = items.iter().map(param_type).collect();
            format!("[{}]", items.join(", "))
        }
    }
}

fn optional_suffix(field: &Field) -> &'static str {
    if field.optional { ", :optional" } else { "" }
}

/// `{name, [alt, ...]}` with an `:optional` marker when needed.
fn render_method_field(field: &Field) -> String {
    let types: Vec<String> = field.types.iter().map(param_type).collect();
    format!(
        "{{{}, [{}]{}}}",
        field.name,
        types.join(", "),
        optional_suffix(field)
    )
}

/// `{:name, type}` using the primary alternative.
fn render_model_field(field: &Field) -> String {
    format!(
        "{{:{}, {}{}}}",
        field.name,
        param_type(&field.types.primary()),
        optional_suffix(field)
    )
}

/// `model User, [{:id, :integer}, {:username, :string, :optional}]`
pub fn render_model(model: &Model) -> String {
    let fields: Vec<String> = model.fields.iter().map(render_model_field).collect();
    format!("model {}, [{}]", model.name, fields.join(", "))
}

/// A module declaring the union type and its `subtypes()` list.
pub fn render_generic(generic: &GenericType) -> String {
    let union: Vec<String> = generic
        .subtypes
        .iter()
        .map(|name| format!("{name}.t()"))
        .collect();
    format!(
        "  defmodule {name} do
    @type t :: {union}

    def decode_as(), do: %{{}}

    def subtypes() do
      [{subtypes}]
    end
  end",
        name = generic.name,
        union = union.join(" | "),
        subtypes = generic.subtypes.join(", "),
    )
}
