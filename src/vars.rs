//! Template variables: merging spec defaults with user overrides, and reading
//! overrides from `key=value` arguments or a JSON document on stdin.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use std::io::Read;

/// Variables available to every placeholder of a spec.
pub type VariableMap = IndexMap<String, String>;

/// Merges `overrides` into `base`. Keys present in both take the override's
/// value, so users can change spec defaults from the command line.
pub fn merge(base: &VariableMap, overrides: &VariableMap) -> VariableMap {
    let mut merged = base.clone();
    for (key, value) in overrides {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Parses arguments of the form `key=value` into a variable map.
///
/// Parsing is all-or-nothing: the first argument with zero or more than one
/// `=`, or with an empty key, aborts the parse with
/// [`Error::KeyValueError`] naming that argument.
pub fn parse_key_values<I, S>(args: I) -> Result<VariableMap>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut variables = VariableMap::new();
    for arg in args {
        let arg = arg.as_ref();
        let mut parts = arg.split('=');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(key), Some(value), None) if !key.is_empty() => {
                variables.insert(key.to_string(), value.to_string());
            }
            _ => return Err(Error::KeyValueError { arg: arg.to_string() }),
        }
    }
    Ok(variables)
}

/// Reads variable overrides from a JSON object, e.g. piped on stdin.
///
/// Blank input yields an empty map. Scalars are stringified (`true`, `42`);
/// arrays, objects and anything other than a top-level object are rejected.
pub fn load_from_reader<R: Read>(mut reader: R) -> Result<VariableMap> {
    let mut buffer = String::new();
    reader.read_to_string(&mut buffer)?;
    let buffer = buffer.trim();
    if buffer.is_empty() {
        return Ok(VariableMap::new());
    }

    let value: serde_json::Value =
        serde_json::from_str(buffer).map_err(|e| Error::AnswersError(e.to_string()))?;
    let object = value
        .as_object()
        .ok_or_else(|| Error::AnswersError("expected a JSON object".to_string()))?;

    let mut variables = VariableMap::new();
    for (key, value) in object {
        let text = match value {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => String::new(),
            serde_json::Value::Bool(_) | serde_json::Value::Number(_) => value.to_string(),
            _ => {
                return Err(Error::AnswersError(format!(
                    "value of '{key}' must be a string, number or boolean"
                )))
            }
        };
        variables.insert(key.clone(), text);
    }
    Ok(variables)
}

/// Formats variables as `key=value` pairs separated by commas.
pub fn describe(variables: &VariableMap) -> String {
    variables.iter().map(|(k, v)| format!("{k}={v}")).collect::<Vec<_>>().join(", ")
}
