//! The template tree: files and directories declared by a spec, and the
//! depth-first walk that writes them to disk.
//!
//! Every node is built against an explicit base directory; the process
//! working directory is never changed. A failing node is recorded and its
//! siblings are still built, so one walk reports every problem at once.

use crate::constants::DEFAULT_PERMISSIONS;
use crate::error::{BuildError, Failure, FailureKind};
use crate::renderer::{RenderError, TemplateRenderer};
use crate::vars::VariableMap;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{is_separator, Component, Path};

/// Files and directories declared at one nesting level.
///
/// Files are always built before directories, each in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateTree {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<FileNode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dirs: Vec<DirNode>,
}

/// A directory and its children: a named [`TemplateTree`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DirNode {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<FileNode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dirs: Vec<DirNode>,
}

/// A file with its raw, unrendered content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileNode {
    pub name: String,
    #[serde(default)]
    pub content: String,
}

/// Checks that `name` is a single normal path segment, so a node can never
/// write outside of its parent directory.
pub fn validate_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("name is empty".to_string());
    }
    if name.chars().any(is_separator) {
        return Err("name must not contain path separators".to_string());
    }
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        (Some(Component::CurDir), None) | (Some(Component::ParentDir), None) => {
            Err(format!("'{name}' is not allowed"))
        }
        _ => Err("name must be a plain file name".to_string()),
    }
}

fn create_dir(path: &Path) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DEFAULT_PERMISSIONS);
    }
    builder.create(path)
}

/// Builds files then directories, collecting every failure.
fn build_children(
    files: &[FileNode],
    dirs: &[DirNode],
    base: &Path,
    variables: &VariableMap,
    renderer: &dyn TemplateRenderer,
) -> BuildError {
    let mut errors = BuildError::new();

    for file in files {
        if let Err(failure) = file.build(base, variables, renderer) {
            warn!("{failure}");
            errors.push(failure);
        }
    }

    for dir in dirs {
        if let Err(err) = dir.build(base, variables, renderer) {
            errors.extend(err);
        }
    }

    errors
}

impl TemplateTree {
    /// Builds every node of the tree under `base`.
    ///
    /// # Errors
    /// * `BuildError` carrying every failed node, in traversal order
    pub fn build(
        &self,
        base: &Path,
        variables: &VariableMap,
        renderer: &dyn TemplateRenderer,
    ) -> Result<(), BuildError> {
        debug!("Building template tree in '{}'", base.display());
        build_children(&self.files, &self.dirs, base, variables, renderer).into_result()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.dirs.is_empty()
    }
}

impl DirNode {
    /// Creates `base/name` and builds the children inside it.
    ///
    /// An invalid name or a directory that cannot be created fails the whole
    /// subtree immediately; failures of children do not stop their siblings.
    pub fn build(
        &self,
        base: &Path,
        variables: &VariableMap,
        renderer: &dyn TemplateRenderer,
    ) -> Result<(), BuildError> {
        let path = base.join(&self.name);

        if let Err(reason) = validate_name(&self.name) {
            let failure = Failure::new(path, FailureKind::InvalidName, reason);
            warn!("{failure}");
            return Err(failure.into());
        }

        if let Err(e) = create_dir(&path) {
            let failure = Failure::new(path, FailureKind::CreateDir, e.to_string());
            warn!("{failure}");
            return Err(failure.into());
        }
        info!("Created directory '{}'", path.display());

        build_children(&self.files, &self.dirs, &path, variables, renderer).into_result()
    }
}

impl FileNode {
    /// Renders the content and writes it to `base/name`, truncating any
    /// existing file.
    ///
    /// A write that fails midway leaves the partial file on disk.
    pub fn build(
        &self,
        base: &Path,
        variables: &VariableMap,
        renderer: &dyn TemplateRenderer,
    ) -> Result<(), Failure> {
        let path = base.join(&self.name);

        validate_name(&self.name)
            .map_err(|reason| Failure::new(&path, FailureKind::InvalidName, reason))?;

        let rendered = renderer.render(&self.name, &self.content, variables).map_err(|e| {
            let kind = match e {
                RenderError::Parse { .. } => FailureKind::Parse,
                RenderError::Execute { .. } => FailureKind::Execute,
            };
            Failure::new(&path, kind, e.to_string())
        })?;

        let mut file = File::create(&path)
            .map_err(|e| Failure::new(&path, FailureKind::CreateFile, e.to_string()))?;
        file.write_all(rendered.as_bytes())
            .map_err(|e| Failure::new(&path, FailureKind::WriteFile, e.to_string()))?;

        info!("Wrote '{}'", path.display());
        Ok(())
    }
}
