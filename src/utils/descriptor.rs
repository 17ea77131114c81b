//! Scanning of qmake project descriptors (`*.pro` files).
//!
//! Only the handful of variables the resolver needs are read: `TEMPLATE`,
//! `DEPENDS` and `SUBDIRS`. List variables may span several lines through
//! backslash continuations and may be formatted loosely:
//!
//! ```text
//! DEPENDS=Core   Gui/Widgets \
//!     Gui/Windows \
//!   Geometry
//! ```
//!
//! The `+=` syntax is not supported.
use regex::Regex;
use std::sync::OnceLock;

/// The kind of a project, taken from its `TEMPLATE` value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectKind {
    Library,
    Application,
    Aggregate,
    /// `TEMPLATE` is absent or has a value we do not handle
    Unknown,
}

impl ProjectKind {
    pub fn from_template(template: Option<&str>) -> Self {
        match template {
            Some("lib") => ProjectKind::Library,
            Some("app") => ProjectKind::Application,
            Some("subdirs") => ProjectKind::Aggregate,
            _ => ProjectKind::Unknown,
        }
    }

    /// Whether the project produces a compiled artifact
    pub fn is_compiled(self) -> bool {
        matches!(self, ProjectKind::Library | ProjectKind::Application)
    }
}

fn template_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\bTEMPLATE\s*=\s*\b(\w+)\b").expect("valid TEMPLATE pattern"))
}

fn token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[/\w']+").expect("valid token pattern"))
}

/// Returns the `TEMPLATE` value, if any
pub fn template(text: &str) -> Option<String> {
    template_regex()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Returns the values of the list variable `name` in the order they are written.
/// An absent variable yields an empty list.
/// # Arguments
/// * `name` - The qmake variable, e.g. `DEPENDS`
/// * `text` - The content of the project file
pub fn variable_values(name: &str, text: &str) -> Vec<String> {
    let pattern = format!(
        r"\b{}\s*=([^\n\\]*(\\[^\S\n]*\n[^\n\\]*)*)",
        regex::escape(name)
    );
    let re = match Regex::new(&pattern) {
        Ok(re) => re,
        Err(_) => return Vec::new(),
    };
    let raw = match re.captures(text).and_then(|caps| caps.get(1)) {
        Some(m) => m.as_str(),
        None => return Vec::new(),
    };
    token_regex()
        .find_iter(raw)
        .map(|m| m.as_str().to_string())
        .collect()
}

pub fn depends(text: &str) -> Vec<String> {
    variable_values("DEPENDS", text)
}

pub fn subdirs(text: &str) -> Vec<String> {
    variable_values("SUBDIRS", text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_template() {
        assert_eq!(template("TEMPLATE = lib\n").as_deref(), Some("lib"));
        assert_eq!(template("QT += core\nTEMPLATE=subdirs").as_deref(), Some("subdirs"));
        assert_eq!(template("QT += core\n"), None);
    }

    #[test]
    fn reads_continued_list() {
        let text = "TEMPLATE = app\n\nDEPENDS = \\\n    Core \\\n    Gui/Widgets\n\nSOURCES = main.cpp\n";
        assert_eq!(depends(text), vec!["Core", "Gui/Widgets"]);
    }

    #[test]
    fn tolerates_loose_formatting() {
        let text = "SUBDIRS=value1   value2 \\\n    value3 \\\n  value4 value5\nOTHER = x\n";
        assert_eq!(
            subdirs(text),
            vec!["value1", "value2", "value3", "value4", "value5"]
        );
    }

    #[test]
    fn continuation_with_trailing_spaces() {
        let text = "DEPENDS = Core \\   \n    Geometry\n";
        assert_eq!(depends(text), vec!["Core", "Geometry"]);
    }

    #[test]
    fn skips_other_variables() {
        let text = "MY_DEPENDS = \\\n    Wrong\n\nDEPENDS = \\\n    Right\n";
        assert_eq!(depends(text), vec!["Right"]);
    }

    #[test]
    fn absent_variable_is_empty() {
        assert!(depends("TEMPLATE = lib\n").is_empty());
        assert!(subdirs("").is_empty());
    }

    #[test]
    fn maps_templates_to_kinds() {
        assert_eq!(ProjectKind::from_template(Some("lib")), ProjectKind::Library);
        assert_eq!(ProjectKind::from_template(Some("app")), ProjectKind::Application);
        assert_eq!(ProjectKind::from_template(Some("subdirs")), ProjectKind::Aggregate);
        assert_eq!(ProjectKind::from_template(Some("vcapp")), ProjectKind::Unknown);
        assert_eq!(ProjectKind::from_template(None), ProjectKind::Unknown);
    }
}
