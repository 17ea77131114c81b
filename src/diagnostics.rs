//! Non-fatal problems found while resolving the project graph.
//!
//! Every diagnostic is logged when it is pushed. The run carries on with
//! whatever can still be generated, and the exit status is derived from
//! [`Diagnostics::has_errors`] at the end.

use crate::utils::{log, LogLevel};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    #[error(
        "{project}: dependent library {dependency} not found. Note: you can only depend on \
         'TEMPLATE = lib' subprojects, maybe you tried to depend on a 'TEMPLATE = app' subproject?"
    )]
    DependencyNotFound { project: String, dependency: String },

    #[error("{project} has a cyclic dependency (reached again through {via})")]
    CyclicDependency { project: String, via: String },

    #[error("Subproject {subdir} of project {project} not found")]
    SubprojectNotFound { project: String, subdir: String },

    #[error("{project} has a missing or unsupported TEMPLATE, no kind-specific configuration is generated")]
    MissingTemplate { project: String },
}

impl Diagnostic {
    /// Whether this diagnostic should make the process exit with a failure
    pub fn is_error(&self) -> bool {
        !matches!(self, Diagnostic::MissingTemplate { .. })
    }
}

/// Collects diagnostics for a whole run
#[derive(Debug, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        let level = if diagnostic.is_error() {
            LogLevel::Error
        } else {
            LogLevel::Warn
        };
        log(level, &diagnostic.to_string());
        self.items.push(diagnostic);
    }

    pub fn items(&self) -> &[Diagnostic] {
        &self.items
    }

    pub fn has_errors(&self) -> bool {
        self.items.iter().any(Diagnostic::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.items.iter().filter(|d| d.is_error()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_template_is_only_a_warning() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(Diagnostic::MissingTemplate {
            project: "Docs".to_string(),
        });
        assert!(!diagnostics.is_empty());
        assert!(!diagnostics.has_errors());

        diagnostics.push(Diagnostic::CyclicDependency {
            project: "Core".to_string(),
            via: "Gui/Widgets".to_string(),
        });
        assert!(diagnostics.has_errors());
        assert_eq!(diagnostics.error_count(), 1);
    }

    #[test]
    fn messages_name_the_project() {
        let diagnostic = Diagnostic::DependencyNotFound {
            project: "App".to_string(),
            dependency: "Ghost".to_string(),
        };
        let message = diagnostic.to_string();
        assert!(message.starts_with("App: dependent library Ghost not found"));

        let diagnostic = Diagnostic::MissingTemplate {
            project: "Tools/Installer".to_string(),
        };
        assert_eq!(
            diagnostic.to_string(),
            "Tools/Installer has a missing or unsupported TEMPLATE, no kind-specific configuration is generated"
        );
    }
}
