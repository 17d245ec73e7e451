//! The template store: a directory of spec files addressed by name.

use crate::constants::{DEFAULT_TEMPLATES_DIR, TEMPLATES_DIR_ENV};
use crate::error::{Error, Result};
use crate::spec::Spec;
use log::debug;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Resolves the store directory: an explicit path wins, then
/// `$TMPL_TEMPLATES_DIR`, then `~/.tmpl/templates`.
pub fn templates_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    if let Some(dir) = std::env::var_os(TEMPLATES_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    let home = dirs::home_dir().ok_or_else(|| {
        Error::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "unable to locate the home directory",
        ))
    })?;
    Ok(DEFAULT_TEMPLATES_DIR.iter().fold(home, |path, part| path.join(part)))
}

/// Spec files co-located in one directory.
#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
}

impl Store {
    /// Opens the store at `dir`, creating the directory when missing.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        debug!("Using template store '{}'", dir.display());
        Ok(Self { dir: dir.to_path_buf() })
    }

    /// Ensures `name` is a plain file name inside the store.
    fn validate_name(&self, name: &str) -> Result<()> {
        let invalid = |reason: &str| Error::InvalidNameError {
            name: name.to_string(),
            reason: reason.to_string(),
        };

        if name.is_empty() {
            return Err(invalid("name is empty"));
        }
        if name == "." || name == ".." {
            return Err(invalid("reserved name"));
        }
        if Path::new(name).file_name() != Some(OsStr::new(name)) {
            return Err(invalid("must be a simple file name"));
        }
        Ok(())
    }

    /// Names of every spec in the store, sorted.
    pub fn names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in WalkDir::new(&self.dir).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| Error::IoError(e.into()))?;
            if entry.file_type().is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        Ok(names)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.validate_name(name).is_ok() && self.dir.join(name).is_file()
    }

    /// Full path of an existing spec.
    pub fn path_of(&self, name: &str) -> Result<PathBuf> {
        self.validate_name(name)?;
        let path = self.dir.join(name);
        if !path.is_file() {
            return Err(Error::TemplateDoesNotExistError { name: name.to_string() });
        }
        Ok(path)
    }

    /// Raw bytes of a spec.
    pub fn read(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.path_of(name)?;
        Ok(fs::read(path)?)
    }

    pub fn read_spec(&self, name: &str) -> Result<Spec> {
        Spec::from_slice(&self.read(name)?)
    }

    /// Writes a new spec; an existing one is never replaced.
    pub fn write_new(&self, name: &str, contents: &str) -> Result<PathBuf> {
        self.validate_name(name)?;
        let path = self.dir.join(name);
        if path.exists() {
            return Err(Error::TemplateExistsError { name: name.to_string() });
        }
        fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn remove(&self, name: &str) -> Result<()> {
        let path = self.path_of(name)?;
        fs::remove_file(path)?;
        Ok(())
    }

    /// Copies `src` to `dest`, replacing `dest` if it exists.
    pub fn copy(&self, src: &str, dest: &str) -> Result<()> {
        let src_path = self.path_of(src)?;
        self.validate_name(dest)?;
        if src == dest {
            return Err(Error::InvalidNameError {
                name: dest.to_string(),
                reason: "cannot copy a template onto itself".to_string(),
            });
        }
        fs::copy(src_path, self.dir.join(dest))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_name() {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::open(temp_dir.path()).unwrap();

        assert!(store.validate_name("rust.yaml").is_ok());
        assert!(store.validate_name("").is_err());
        assert!(store.validate_name("..").is_err());
        assert!(store.validate_name("../escape").is_err());
        assert!(store.validate_name("nested/spec").is_err());
    }

    #[test]
    fn test_templates_dir_prefers_explicit_path() {
        let dir = templates_dir(Some(PathBuf::from("/tmp/specs"))).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/specs"));
    }
}
