//! User interaction: confirmations and picking a template from the store.

use crate::error::{Error, Result};
use dialoguer::{Confirm, FuzzySelect};

/// Trait for asking the user questions.
pub trait Prompter {
    /// Asks a yes/no question. Returns `true` without asking when `skip` is set.
    fn confirm(&self, skip: bool, question: String) -> Result<bool>;

    /// Lets the user pick one of `items`, returning its index.
    fn select(&self, question: String, items: &[String]) -> Result<usize>;
}

/// Terminal prompter backed by dialoguer.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DialoguerPrompter {
    fn confirm(&self, skip: bool, question: String) -> Result<bool> {
        if skip {
            return Ok(true);
        }
        Ok(Confirm::new().with_prompt(question).default(false).interact()?)
    }

    fn select(&self, question: String, items: &[String]) -> Result<usize> {
        Ok(FuzzySelect::new().with_prompt(question).items(items).default(0).interact()?)
    }
}

/// Asks the user which template to use.
///
/// # Errors
/// * `Error::TemplateDoesNotExistError` if there is nothing to choose from
pub fn pick_template(prompt: &dyn Prompter, names: &[String]) -> Result<String> {
    if names.is_empty() {
        return Err(Error::TemplateDoesNotExistError { name: "<none>".to_string() });
    }
    let index = prompt.select("What template do you want to use?".to_string(), names)?;
    names
        .get(index)
        .cloned()
        .ok_or_else(|| Error::TemplateDoesNotExistError { name: format!("#{index}") })
}
