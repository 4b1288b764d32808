//! User input and interaction handling.
//!
//! Questions are asked through a [`Prompter`], which only knows how to read
//! one raw line and show a hint. Defaults, numbered choices, yes/no parsing
//! and validation live here, so a terminal and a test script share them.

use std::cell::RefCell;
use std::collections::VecDeque;

use dialoguer::Input;

use crate::config::Choice;
use crate::error::{Error, Result};

/// Source of operator answers.
pub trait Prompter {
    /// Shows `prompt` and returns the raw line typed in reply.
    fn read_line(&self, prompt: &str) -> Result<String>;

    /// Tells the operator why the previous answer was rejected.
    fn hint(&self, message: &str);
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
    fn read_line(&self, prompt: &str) -> Result<String> {
        Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .report(false)
            .interact_text()
            .map_err(|e| Error::PromptError(e.to_string()))
    }

    fn hint(&self, message: &str) {
        println!("{message}");
    }
}

/// Replays a fixed list of answers; fails once they run out.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<String>>,
    prompts: RefCell<Vec<String>>,
    hints: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: RefCell::new(answers.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Prompts shown so far, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }

    pub fn hints(&self) -> Vec<String> {
        self.hints.borrow().clone()
    }

    pub fn remaining(&self) -> usize {
        self.answers.borrow().len()
    }
}

impl Prompter for ScriptedPrompter {
    fn read_line(&self, prompt: &str) -> Result<String> {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.answers
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| Error::PromptError(format!("no answer left for '{prompt}'")))
    }

    fn hint(&self, message: &str) {
        self.hints.borrow_mut().push(message.to_string());
    }
}

pub type Validator = fn(&str) -> bool;

/// Interprets a yes/no answer.
///
/// # Returns
/// * `Some(bool)` for y/yes/true/1 and n/no/false/0, ignoring case
/// * `None` for anything else
pub fn parse_bool(input: &str) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "y" | "yes" | "true" | "1" => Some(true),
        "n" | "no" | "false" | "0" => Some(false),
        _ => None,
    }
}

/// Interprets a choice answer: a 1-based menu number or the literal choice.
pub fn parse_choice<T: Choice>(input: &str) -> std::result::Result<T, String> {
    let input = input.trim();
    match input.parse::<usize>() {
        Ok(n) if (1..=T::ALL.len()).contains(&n) => Ok(T::ALL[n - 1]),
        Ok(_) => Err(format!("Please enter a number between 1 and {}", T::ALL.len())),
        Err(_) => T::from_answer(input).ok_or_else(|| {
            let names: Vec<_> = T::ALL.iter().map(Choice::as_str).collect();
            format!("Please enter a valid choice: {}", names.join(", "))
        }),
    }
}

/// Applies the optional validator to a text answer.
pub fn parse_text(input: &str, validator: Option<Validator>) -> std::result::Result<String, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("This field is required".to_string());
    }
    match validator {
        Some(validate) if !validate(input) => Err("Invalid input. Please try again.".to_string()),
        _ => Ok(input.to_string()),
    }
}

/// Asks until `parse` accepts the answer. Empty input takes the default.
fn ask_until<T>(
    prompter: &dyn Prompter,
    prompt: &str,
    default: Option<&str>,
    parse: impl Fn(&str) -> std::result::Result<T, String>,
) -> Result<T> {
    let full_prompt = match default {
        Some(default) if !default.is_empty() => format!("{prompt} [{default}]"),
        _ => prompt.to_string(),
    };

    loop {
        let raw = prompter.read_line(&full_prompt)?;
        let answer = match (raw.trim(), default) {
            ("", Some(default)) => default,
            (answer, _) => answer,
        };
        match parse(answer) {
            Ok(value) => return Ok(value),
            Err(message) => prompter.hint(&message),
        }
    }
}

pub fn ask_text(
    prompter: &dyn Prompter,
    prompt: &str,
    default: Option<&str>,
    validator: Option<Validator>,
) -> Result<String> {
    ask_until(prompter, prompt, default, |answer| parse_text(answer, validator))
}

pub fn ask_bool(prompter: &dyn Prompter, prompt: &str, default: bool) -> Result<bool> {
    let default = if default { "y" } else { "n" };
    ask_until(prompter, prompt, Some(default), |answer| {
        parse_bool(answer).ok_or_else(|| "Please enter y/n, yes/no, true/false, or 1/0".to_string())
    })
}

pub fn ask_choice<T: Choice>(prompter: &dyn Prompter, prompt: &str, default: T) -> Result<T> {
    let menu: Vec<String> = T::ALL
        .iter()
        .enumerate()
        .map(|(i, choice)| format!("{}. {}", i + 1, choice.as_str()))
        .collect();
    let prompt = format!("{prompt}\n{}\nChoice", menu.join(" | "));
    ask_until(prompter, &prompt, Some(default.as_str()), parse_choice::<T>)
}

/// Asks a yes/no confirmation unless `skip` is set.
pub fn confirm(prompter: &dyn Prompter, skip: bool, prompt: &str) -> Result<bool> {
    if skip {
        return Ok(true);
    }
    ask_bool(prompter, prompt, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::License;

    fn all_lowercase(s: &str) -> bool {
        s.chars().all(|c| c.is_lowercase())
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("yes"), Some(true));
        assert_eq!(parse_bool("Y"), Some(true));
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("no"), Some(false));
        assert_eq!(parse_bool("FALSE"), Some(false));
        assert_eq!(parse_bool("invalid"), None);
    }

    #[test]
    fn test_parse_choice() {
        assert_eq!(parse_choice::<License>("2"), Ok(License::Apache2));
        assert_eq!(parse_choice::<License>("GPL-3.0"), Ok(License::Gpl3));
        assert!(parse_choice::<License>("0").is_err());
        assert!(parse_choice::<License>("6").is_err());
        assert!(parse_choice::<License>("WTFPL").is_err());
    }

    #[test]
    fn test_ask_text_reprompts_on_empty() {
        let prompter = ScriptedPrompter::new(["", "  ", "value"]);
        let answer = ask_text(&prompter, "Name", None, None).unwrap();

        assert_eq!(answer, "value");
        assert_eq!(prompter.hints().len(), 2);
    }

    #[test]
    fn test_ask_text_default() {
        let prompter = ScriptedPrompter::new([""]);
        let answer = ask_text(&prompter, "Description", Some("fallback"), None).unwrap();

        assert_eq!(answer, "fallback");
        assert_eq!(prompter.prompts(), ["Description [fallback]"]);
    }

    #[test]
    fn test_ask_text_validator() {
        let prompter = ScriptedPrompter::new(["BAD", "good"]);
        let answer = ask_text(&prompter, "Name", None, Some(all_lowercase)).unwrap();

        assert_eq!(answer, "good");
        assert_eq!(prompter.hints(), ["Invalid input. Please try again."]);
    }

    #[test]
    fn test_ask_choice_menu() {
        let prompter = ScriptedPrompter::new(["9", "nope", "", "3"]);

        let first = ask_choice(&prompter, "License", License::Mit).unwrap();
        assert_eq!(first, License::Mit);
        let second = ask_choice(&prompter, "License", License::Mit).unwrap();
        assert_eq!(second, License::Gpl3);

        assert!(prompter.prompts()[0].contains("1. MIT | 2. Apache-2.0"));
        assert!(prompter.prompts()[0].ends_with("Choice [MIT]"));
        assert_eq!(prompter.hints().len(), 2);
    }

    #[test]
    fn test_ask_bool() {
        let prompter = ScriptedPrompter::new(["maybe", "", "yes"]);
        assert!(!ask_bool(&prompter, "Docker?", false).unwrap());
        assert!(ask_bool(&prompter, "Docker?", false).unwrap());
        assert_eq!(prompter.hints().len(), 1);
    }

    #[test]
    fn test_exhausted_script_fails() {
        let prompter = ScriptedPrompter::new(Vec::<String>::new());
        assert!(matches!(
            ask_text(&prompter, "Name", None, None),
            Err(Error::PromptError(_))
        ));
    }

    #[test]
    fn test_confirm_skip() {
        let prompter = ScriptedPrompter::new(Vec::<String>::new());
        assert!(confirm(&prompter, true, "Overwrite?").unwrap());
    }
}
