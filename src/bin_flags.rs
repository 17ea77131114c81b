use itertools::Itertools;
use std::path::Path;

use crate::diagnostics::Diagnostics;
use crate::emitter;
use crate::error::Result;
use crate::hierarchy;
use crate::registry::Registry;
use crate::resolver;
use crate::utils::{log, LogLevel, Settings};

/// A source tree with every dependency resolved
pub struct ResolvedTree {
    pub settings: Settings,
    pub registry: Registry,
    pub diagnostics: Diagnostics,
}

///Loads and resolves a source tree
/// # Arguments
/// * `src_dir` - The root of the source tree
pub fn resolve_tree(src_dir: &Path) -> Result<ResolvedTree> {
    let settings = Settings::load(src_dir)?;
    let mut diagnostics = Diagnostics::new();
    let mut registry = Registry::load(src_dir, &settings, &mut diagnostics)?;

    resolver::resolve(&mut registry, &mut diagnostics);
    hierarchy::link_subprojects(&mut registry, &mut diagnostics);
    hierarchy::reconcile(&mut registry);

    Ok(ResolvedTree {
        settings,
        registry,
        diagnostics,
    })
}

///Generates the include file of every project
/// # Arguments
/// * `src_dir` - The root of the source tree
/// * `out_dir` - The root of the build directory
/// * `dry_run` - Report what would be written without writing
pub fn configure(src_dir: &Path, out_dir: &Path, dry_run: bool) -> Result<Diagnostics> {
    let tree = resolve_tree(src_dir)?;
    let summary = emitter::emit(&tree.registry, &tree.settings, out_dir, dry_run)?;
    let verb = if dry_run { "would be written" } else { "written" };
    log(
        LogLevel::Log,
        &format!(
            "{} files {}, {} unchanged",
            summary.written, verb, summary.unchanged
        ),
    );
    if tree.diagnostics.has_errors() {
        log(
            LogLevel::Error,
            &format!(
                "{} problem(s) found, generated files may be incomplete",
                tree.diagnostics.error_count()
            ),
        );
    }
    Ok(tree.diagnostics)
}

///Prints the link order and subdir predecessors of every project
pub fn deps(src_dir: &Path) -> Result<Diagnostics> {
    let tree = resolve_tree(src_dir)?;
    let registry = &tree.registry;
    for project in registry.projects() {
        println!("{} ({:?})", project.label(), project.kind);
        if !project.ordered_dependencies.is_empty() {
            println!(
                "    link: {}",
                resolver::link_order(project)
                    .map(|lib| registry.get(lib).label())
                    .join(" ")
            );
        }
        if !project.sibling_predecessors.is_empty() {
            println!(
                "    after: {}",
                project.sibling_predecessors.iter().join(" ")
            );
        }
    }
    Ok(tree.diagnostics)
}

///Removes the generated files
pub fn clean(src_dir: &Path, out_dir: &Path) -> Result<()> {
    let settings = Settings::load(src_dir)?;
    let mut diagnostics = Diagnostics::new();
    let registry = Registry::load(src_dir, &settings, &mut diagnostics)?;
    let removed = emitter::clean(&registry, &settings, out_dir)?;
    log(LogLevel::Log, &format!("Removed {} generated files", removed));
    Ok(())
}
