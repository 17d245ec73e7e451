//! Template renderer for file contents.
//! Wraps a MiniJinja environment configured with tmpl's transform functions
//! and its "no value" placeholder for undefined variables.
use crate::vars::VariableMap;
use cruet::Inflector;
use indexmap::IndexMap;
use minijinja::{AutoEscape, Environment, ErrorKind, Value};
use std::fmt::Write as _;
use thiserror::Error;

/// Text written in place of a placeholder whose variable is not defined.
pub const NO_VALUE: &str = "<no value>";

/// A named text transform callable from templates.
pub type Transform = fn(&str) -> String;

/// Rendering failures, tagged with the name of the file being rendered.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The template source is not valid syntax.
    #[error("{name} template failed: {message}")]
    Parse { name: String, message: String },

    /// The template parsed but could not be executed, e.g. it calls an
    /// unknown function.
    #[error("failed executing {name} template: {message}")]
    Execute { name: String, message: String },
}

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders `content` against `variables`.
    ///
    /// # Arguments
    /// * `name` - Name of the file being rendered, used to tag errors
    /// * `content` - Raw template source
    /// * `variables` - Values for the placeholders
    ///
    /// # Returns
    /// * `Result<String, RenderError>` - Rendered text
    fn render(
        &self,
        name: &str,
        content: &str,
        variables: &VariableMap,
    ) -> Result<String, RenderError>;
}

/// Lookup table of transforms exposed to templates, both as filters
/// (`{{ name | yell }}`) and as functions (`{{ yell(name) }}`).
#[derive(Clone)]
pub struct FunctionRegistry {
    entries: IndexMap<&'static str, Transform>,
}

impl std::fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl FunctionRegistry {
    /// A registry without any transform.
    pub fn empty() -> Self {
        Self { entries: IndexMap::new() }
    }

    /// Adds or replaces the transform called `name`.
    pub fn register(&mut self, name: &'static str, transform: Transform) -> &mut Self {
        self.entries.insert(name, transform);
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry
            .register("yell", yell)
            .register("title", title)
            .register("snake", snake)
            .register("kebab", kebab)
            .register("camel", camel)
            .register("pascal", pascal);
        registry
    }
}

fn yell(value: &str) -> String {
    value.to_uppercase()
}

fn title(value: &str) -> String {
    value.to_title_case()
}

fn snake(value: &str) -> String {
    value.to_snake_case()
}

fn kebab(value: &str) -> String {
    value.to_kebab_case()
}

fn camel(value: &str) -> String {
    value.to_camel_case()
}

fn pascal(value: &str) -> String {
    value.to_pascal_case()
}

/// Runs `transform` on a template value. An undefined argument yields the
/// no-value sentinel untouched, the same text a bare `{{ missing }}` renders.
fn apply(transform: Transform, value: &Value) -> String {
    if value.is_undefined() {
        return NO_VALUE.to_string();
    }
    transform(&value.to_string())
}

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment instance
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a renderer with the default transforms.
    pub fn new() -> Self {
        Self::with_registry(&FunctionRegistry::default())
    }

    /// Creates a renderer exposing the transforms of `registry`.
    pub fn with_registry(registry: &FunctionRegistry) -> Self {
        let mut env = Environment::new();

        // Generated files are written verbatim whatever their extension.
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_keep_trailing_newline(true);

        env.set_formatter(|out, state, value| {
            if value.is_undefined() {
                return out.write_str(NO_VALUE).map_err(|_| {
                    minijinja::Error::new(ErrorKind::WriteFailure, "failed to write output")
                });
            }
            minijinja::escape_formatter(out, state, value)
        });

        for (name, transform) in &registry.entries {
            let transform = *transform;
            env.add_filter(*name, move |value: Value| apply(transform, &value));
            env.add_function(*name, move |value: Value| apply(transform, &value));
        }

        Self { env }
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    /// Renders a template string using MiniJinja.
    ///
    /// # Errors
    /// * `RenderError::Parse` if the source has a syntax error
    /// * `RenderError::Execute` for any other failure while rendering
    fn render(
        &self,
        name: &str,
        content: &str,
        variables: &VariableMap,
    ) -> Result<String, RenderError> {
        self.env.render_named_str(name, content, variables).map_err(|e| {
            let message = e.to_string();
            match e.kind() {
                ErrorKind::SyntaxError => RenderError::Parse { name: name.to_string(), message },
                _ => RenderError::Execute { name: name.to_string(), message },
            }
        })
    }
}
