// ${name} placeholder substitution, applied to raw panel content before any
// markup stripping. Unknown placeholders are left in the text untouched.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::collections::HashMap;

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"\$\{([\w.-]+)\}").unwrap();
}

#[derive(Debug, Default, Clone)]
pub struct Variables {
    values: HashMap<String, String>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Replace every `${name}` occurrence with its value, leaving unknown
    /// placeholders as-is.
    pub fn substitute(&self, text: &str) -> String {
        PLACEHOLDER
            .replace_all(text, |caps: &Captures| match self.values.get(&caps[1]) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_known_variables() {
        let mut vars = Variables::new();
        vars.set("APP_NAME", "Widget");
        vars.set("APP_VER", "2.1");
        assert_eq!(
            vars.substitute("Installing ${APP_NAME} ${APP_VER}..."),
            "Installing Widget 2.1..."
        );
    }

    #[test]
    fn unknown_placeholders_left_alone() {
        let vars = Variables::new();
        assert_eq!(vars.substitute("Hello ${WHO}"), "Hello ${WHO}");
    }

    #[test]
    fn dotted_names() {
        let mut vars = Variables::new();
        vars.set("user.home", "/home/u");
        assert_eq!(vars.substitute("dir=${user.home}"), "dir=/home/u");
    }

    #[test]
    fn no_placeholders() {
        let vars = Variables::new();
        assert_eq!(vars.substitute("plain text $5"), "plain text $5");
    }
}
