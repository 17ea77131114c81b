//! Build order of subdirectories.
//!
//! qmake builds the `SUBDIRS` of an aggregate project in the order given by
//! their `.depends`, and a `.depends` can only name siblings. A library
//! dependency between two projects deep in different branches of the tree is
//! therefore turned into a dependency between the two children of their
//! closest common ancestor. For example, with
//!
//! ```text
//! src/Tree.pro            SUBDIRS = Core Gui App
//! src/Core/Core.pro       TEMPLATE = lib
//! src/Gui/Gui.pro         SUBDIRS = Widgets Windows
//! src/Gui/Widgets/...     DEPENDS = Core
//! src/Gui/Windows/...     DEPENDS = Gui/Widgets
//! src/App/App.pro         DEPENDS = Gui/Windows
//! ```
//!
//! `Windows` must follow `Widgets` inside `Gui`, `Gui` must follow `Core`, and
//! `App` must follow both `Core` and `Gui`.
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::registry::{ProjectId, Registry};
use crate::utils::{log, LogLevel, ProjectKind};

/// Key identifying a subdir within its parent, qmake does not accept slashes there
pub fn subdir_key(subdir: &str) -> String {
    subdir.replace('/', "__")
}

/// Sets parent/child relationships from the SUBDIRS of aggregate projects
pub fn link_subprojects(registry: &mut Registry, diagnostics: &mut Diagnostics) {
    for id in registry.ids() {
        let project = registry.get(id);
        if project.declared_subprojects.is_empty() {
            continue;
        }
        if project.kind != ProjectKind::Aggregate {
            log(
                LogLevel::Warn,
                &format!(
                    "{} lists SUBDIRS but is not a 'TEMPLATE = subdirs' project, ignoring them",
                    project.label()
                ),
            );
            continue;
        }
        let rel_dir = project.rel_dir.clone();
        let subdirs = project.declared_subprojects.clone();

        for subdir in subdirs {
            let child_rel_dir = if rel_dir.is_empty() {
                subdir.clone()
            } else {
                format!("{}/{}", rel_dir, subdir)
            };
            let child = match registry.by_rel_dir(&child_rel_dir) {
                Some(child) => child,
                None => {
                    diagnostics.push(Diagnostic::SubprojectNotFound {
                        project: registry.get(id).label().to_string(),
                        subdir: child_rel_dir,
                    });
                    continue;
                }
            };
            if let Some(parent) = registry.get(child).parent {
                log(
                    LogLevel::Warn,
                    &format!(
                        "{} is already a subproject of {}",
                        child_rel_dir,
                        registry.get(parent).label()
                    ),
                );
                continue;
            }

            let child_project = registry.get_mut(child);
            child_project.parent = Some(id);
            child_project.subdir_key = subdir_key(&subdir);
            child_project.subdir = subdir;
            registry.get_mut(id).children.push(child);
        }
    }
}

/// Returns the ancestors of a project, root first and the project itself last
pub fn ancestors(registry: &Registry, id: ProjectId) -> Vec<ProjectId> {
    let mut chain = vec![id];
    let mut current = id;
    while let Some(parent) = registry.get(current).parent {
        chain.push(parent);
        current = parent;
    }
    chain.reverse();
    chain
}

// children of the closest common ancestor, one on each chain
fn diverging_children(dependent: &[ProjectId], dependee: &[ProjectId]) -> Option<(ProjectId, ProjectId)> {
    if dependent.first() != dependee.first() {
        return None;
    }
    let mut common = 0;
    while common + 1 < dependent.len()
        && common + 1 < dependee.len()
        && dependent[common + 1] == dependee[common + 1]
    {
        common += 1;
    }
    match (dependent.get(common + 1), dependee.get(common + 1)) {
        (Some(&a), Some(&b)) => Some((a, b)),
        _ => None,
    }
}

/// Fills `sibling_predecessors` from the ordered dependencies of every project.
/// Links and closures must have been computed first.
pub fn reconcile(registry: &mut Registry) {
    let mut edges = Vec::new();
    for id in registry.ids() {
        let chain = ancestors(registry, id);
        for &lib in &registry.get(id).ordered_dependencies {
            let lib_chain = ancestors(registry, lib);
            match diverging_children(&chain, &lib_chain) {
                Some(edge) => edges.push(edge),
                None => log(
                    LogLevel::Debug,
                    &format!(
                        "No subdir ordering needed between {} and {}",
                        registry.get(id).label(),
                        registry.get(lib).label()
                    ),
                ),
            }
        }
    }
    for (dependent, dependee) in edges {
        let key = registry.get(dependee).subdir_key.clone();
        registry.get_mut(dependent).sibling_predecessors.insert(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::tests::registry_of;
    use crate::resolver;

    fn reconciled(projects: &[(&str, &str)]) -> (Registry, Diagnostics) {
        let mut registry = registry_of(projects);
        let mut diagnostics = Diagnostics::new();
        resolver::resolve(&mut registry, &mut diagnostics);
        link_subprojects(&mut registry, &mut diagnostics);
        reconcile(&mut registry);
        (registry, diagnostics)
    }

    fn predecessors(registry: &Registry, rel_dir: &str) -> Vec<String> {
        let id = registry.by_rel_dir(rel_dir).unwrap();
        registry.get(id).sibling_predecessors.iter().cloned().collect()
    }

    #[test]
    fn siblings_of_one_aggregate() {
        let (registry, diagnostics) = reconciled(&[
            ("", "TEMPLATE = subdirs\nSUBDIRS = Widgets Windows\n"),
            ("Widgets", "TEMPLATE = lib\n"),
            ("Windows", "TEMPLATE = lib\nDEPENDS = Widgets\n"),
        ]);
        assert!(diagnostics.is_empty());
        assert_eq!(predecessors(&registry, "Windows"), vec!["Widgets"]);
        assert!(predecessors(&registry, "Widgets").is_empty());
    }

    #[test]
    fn nested_dependencies_map_to_common_ancestor_children() {
        let (registry, diagnostics) = reconciled(&[
            ("", "TEMPLATE = subdirs\nSUBDIRS = Core Gui App\n"),
            ("Core", "TEMPLATE = lib\n"),
            ("Gui", "TEMPLATE = subdirs\nSUBDIRS = Widgets Windows\n"),
            ("Gui/Widgets", "TEMPLATE = lib\nDEPENDS = Core\n"),
            ("Gui/Windows", "TEMPLATE = lib\nDEPENDS = Gui/Widgets\n"),
            ("App", "TEMPLATE = app\nDEPENDS = Gui/Windows\n"),
        ]);
        assert!(diagnostics.is_empty());
        assert!(predecessors(&registry, "").is_empty());
        assert!(predecessors(&registry, "Core").is_empty());
        assert_eq!(predecessors(&registry, "Gui"), vec!["Core"]);
        assert!(predecessors(&registry, "Gui/Widgets").is_empty());
        assert_eq!(predecessors(&registry, "Gui/Windows"), vec!["Widgets"]);
        assert_eq!(predecessors(&registry, "App"), vec!["Core", "Gui"]);
    }

    #[test]
    fn multi_level_subdirs_get_slash_free_keys() {
        let (registry, _) = reconciled(&[
            ("", "TEMPLATE = subdirs\nSUBDIRS = Libs/Core App\n"),
            ("Libs/Core", "TEMPLATE = lib\n"),
            ("App", "TEMPLATE = app\nDEPENDS = Core\n"),
        ]);
        let core = registry.get(registry.by_rel_dir("Libs/Core").unwrap());
        assert_eq!(core.subdir, "Libs/Core");
        assert_eq!(core.subdir_key, "Libs__Core");
        assert_eq!(predecessors(&registry, "App"), vec!["Libs__Core"]);

        let root = registry.get(registry.by_rel_dir("").unwrap());
        assert_eq!(root.children.len(), 2);
        assert_eq!(ancestors(&registry, registry.by_rel_dir("App").unwrap()).len(), 2);
    }

    #[test]
    fn missing_subproject_is_reported() {
        let (registry, diagnostics) = reconciled(&[
            ("", "TEMPLATE = subdirs\nSUBDIRS = Core Plugins\n"),
            ("Core", "TEMPLATE = lib\n"),
        ]);
        assert_eq!(
            diagnostics.items(),
            &[Diagnostic::SubprojectNotFound {
                project: "Root".to_string(),
                subdir: "Plugins".to_string(),
            }]
        );
        let root = registry.get(registry.by_rel_dir("").unwrap());
        assert_eq!(root.children, vec![registry.by_rel_dir("Core").unwrap()]);
    }

    #[test]
    fn detached_projects_get_no_ordering() {
        let (registry, _) = reconciled(&[
            ("", "TEMPLATE = subdirs\nSUBDIRS = Core\n"),
            ("Core", "TEMPLATE = lib\n"),
            ("Tools/Gen", "TEMPLATE = app\nDEPENDS = Core\n"),
        ]);
        assert!(predecessors(&registry, "Tools/Gen").is_empty());
        assert!(predecessors(&registry, "Core").is_empty());
    }

    #[test]
    fn dependency_inside_a_subtree_stays_inside() {
        let (registry, _) = reconciled(&[
            ("", "TEMPLATE = subdirs\nSUBDIRS = Gui App\n"),
            ("Gui", "TEMPLATE = subdirs\nSUBDIRS = Widgets Windows\n"),
            ("Gui/Widgets", "TEMPLATE = lib\n"),
            ("Gui/Windows", "TEMPLATE = lib\nDEPENDS = Gui/Widgets\n"),
            ("App", "TEMPLATE = app\n"),
        ]);
        assert!(predecessors(&registry, "Gui").is_empty());
        assert_eq!(predecessors(&registry, "Gui/Windows"), vec!["Widgets"]);
    }
}
