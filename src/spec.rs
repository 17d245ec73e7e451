//! Spec documents: the decoded generation request.
//! A spec holds the variables and the template tree of one project
//! template and is the only entry point for building it.

use crate::error::{BuildError, Result};
use crate::renderer::{MiniJinjaRenderer, TemplateRenderer};
use crate::template::TemplateTree;
use crate::vars::{self, VariableMap};
use log::debug;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// A project template: variables plus the tree of files and directories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Spec {
    /// Informational display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub variables: VariableMap,
    #[serde(default)]
    pub template: TemplateTree,
}

impl Spec {
    /// Decodes a spec from YAML bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_yaml::from_slice(bytes)?)
    }

    /// Reads the whole stream and decodes it as a spec.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut buffer = Vec::new();
        reader.read_to_end(&mut buffer)?;
        Self::from_slice(&buffer)
    }

    /// Applies variable overrides; overrides win over the spec's defaults.
    /// Must be called before [`Spec::build`].
    pub fn merge_variables(&mut self, overrides: &VariableMap) {
        if overrides.is_empty() {
            return;
        }
        debug!("Overriding variables: {}", vars::describe(overrides));
        self.variables = vars::merge(&self.variables, overrides);
    }

    /// Builds the template tree under `root` with the default renderer.
    pub fn build<P: AsRef<Path>>(&self, root: P) -> std::result::Result<(), BuildError> {
        self.build_with(root, &MiniJinjaRenderer::new())
    }

    /// Builds the template tree under `root` using `renderer`.
    pub fn build_with<P: AsRef<Path>>(
        &self,
        root: P,
        renderer: &dyn TemplateRenderer,
    ) -> std::result::Result<(), BuildError> {
        self.template.build(root.as_ref(), &self.variables, renderer)
    }
}

impl FromStr for Spec {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_slice(s.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::BLANK_SPEC;
    use crate::error::Error;

    #[test]
    fn test_decode() {
        let spec: Spec = r#"
name: demo
variables:
  project: tmpl
template:
  files:
    - name: README.md
      content: |
        # {{ project }}
  dirs:
    - name: src
      dirs:
        - name: bin
          files:
            - name: main.rs
"#
        .parse()
        .unwrap();

        assert_eq!(spec.name.as_deref(), Some("demo"));
        assert_eq!(spec.variables.get("project").map(String::as_str), Some("tmpl"));
        assert_eq!(spec.template.files[0].content, "# {{ project }}\n");
        assert_eq!(spec.template.dirs[0].dirs[0].files[0].name, "main.rs");
    }

    #[test]
    fn test_decode_empty_document_fields() {
        let spec = Spec::from_slice(b"variables: {}\n").unwrap();
        assert!(spec.name.is_none());
        assert!(spec.template.is_empty());
    }

    #[test]
    fn test_decode_error() {
        assert!(matches!(Spec::from_slice(b"template: [oops"), Err(Error::SpecParseError(_))));
        assert!(matches!(Spec::from_slice(b"varibles: {}\n"), Err(Error::SpecParseError(_))));
    }

    #[test]
    fn test_blank_spec_decodes() {
        let spec = Spec::from_reader(BLANK_SPEC.as_bytes()).unwrap();
        assert_eq!(spec.variables.get("project").map(String::as_str), Some("test-project"));
        assert_eq!(spec.template.files[0].name, "CMakeLists.txt");
        assert_eq!(spec.template.dirs[0].name, "src");
    }

    #[test]
    fn test_merge_variables() {
        let mut spec = Spec::from_slice(b"variables:\n  a: '1'\n  b: '2'\n").unwrap();
        let overrides: VariableMap = [("b".to_string(), "3".to_string())].into_iter().collect();

        spec.merge_variables(&overrides);

        assert_eq!(spec.variables.get("a").map(String::as_str), Some("1"));
        assert_eq!(spec.variables.get("b").map(String::as_str), Some("3"));
    }
}
