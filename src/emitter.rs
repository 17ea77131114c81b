//! Generation of the `.pri` include files from a resolved registry.
//!
//! For each `src/Path/To/Project/Project.pro` the file
//! `<build-dir>/Path/To/Project/<output_file>` is generated, to be included by
//! `Project.pro`. It holds the boilerplate that would otherwise be written by
//! hand: compiler configuration, INCLUDEPATH/LIBS/PRE_TARGETDEPS of every
//! library in the closure of DEPENDS, and the `.depends` of SUBDIRS.
use std::path::{Path, PathBuf};

use crate::error::{ConfigureError, Result};
use crate::hasher;
use crate::registry::{Project, ProjectId, Registry};
use crate::resolver::link_order;
use crate::utils::{log, LogLevel, ProjectKind, Settings};

/// Text blocks of the generated files
pub mod blocks;

/// Outcome of a generation pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EmitSummary {
    pub written: usize,
    pub unchanged: usize,
}

// qmake wants forward slashes, even on windows
fn slashed(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn join_rel_dir(root: &Path, rel_dir: &str) -> PathBuf {
    if rel_dir.is_empty() {
        root.to_path_buf()
    } else {
        root.join(rel_dir)
    }
}

/// Build directory of a project
pub fn project_out_dir(out_dir: &Path, project: &Project) -> PathBuf {
    join_rel_dir(out_dir, &project.rel_dir)
}

/// Source directory of a project: the directory holding its `.pro` file
pub fn project_src_dir(registry: &Registry, project: &Project) -> PathBuf {
    match project.src_path.parent() {
        Some(dir) => dir.to_path_buf(),
        None => join_rel_dir(registry.src_dir(), &project.rel_dir),
    }
}

/// Path of the file generated for a project
pub fn output_path(out_dir: &Path, project: &Project, settings: &Settings) -> PathBuf {
    project_out_dir(out_dir, project).join(&settings.output_file)
}

/// Returns the content of the file generated for a project
/// # Arguments
/// * `registry` - A registry whose closures and subdir links are computed
/// * `id` - The project to generate for
/// * `settings` - The settings of the run
/// * `out_dir` - The root of the build directory
pub fn render(registry: &Registry, id: ProjectId, settings: &Settings, out_dir: &Path) -> String {
    let project = registry.get(id);
    let mut text = String::from(blocks::HEADER);

    if project.kind.is_compiled() {
        text.push_str(&blocks::cxx_standard(&settings.cxx_standard));
        if settings.create_prl {
            text.push_str(blocks::PRL);
        }
    }

    if project.kind == ProjectKind::Library {
        text.push_str(blocks::SELF_INCLUDE);
        if settings.static_libs {
            text.push_str(blocks::STATIC_LIB);
        }
    }

    if project.kind == ProjectKind::Aggregate {
        let children = project.children.iter().map(|&child| registry.get(child));
        text.push_str(&blocks::subdirs_override(
            children.clone().map(|child| child.subdir_key.as_str()),
        ));
        for child in children {
            text.push_str(&blocks::subdir(
                &child.subdir_key,
                &child.subdir,
                child.sibling_predecessors.iter().map(String::as_str),
            ));
        }
    }

    if !project.ordered_dependencies.is_empty() {
        text.push_str(blocks::RELEASE_OR_DEBUG);
    }
    for lib in link_order(project) {
        let lib = registry.get(lib);
        text.push_str(&blocks::add_lib(
            &lib.name,
            &slashed(&project_src_dir(registry, lib)),
            &slashed(&project_out_dir(out_dir, lib)),
            settings.static_libs,
        ));
    }
    text
}

/// Generates the files of every project.
/// Files whose content would not change are left untouched.
/// With `dry_run` nothing is written, the summary tells what would be.
pub fn emit(
    registry: &Registry,
    settings: &Settings,
    out_dir: &Path,
    dry_run: bool,
) -> Result<EmitSummary> {
    let mut summary = EmitSummary::default();
    for id in registry.ids() {
        let project = registry.get(id);
        let path = output_path(out_dir, project, settings);
        let text = render(registry, id, settings, out_dir);
        let changed = if dry_run {
            let changed = hasher::is_content_changed(&path, &text)?;
            if changed {
                log(LogLevel::Log, &format!("Would write {}", path.display()));
            }
            changed
        } else {
            hasher::write_if_changed(&path, &text)?
        };
        if changed {
            summary.written += 1;
        } else {
            summary.unchanged += 1;
        }
    }
    Ok(summary)
}

/// Removes the generated files. Returns how many were removed.
pub fn clean(registry: &Registry, settings: &Settings, out_dir: &Path) -> Result<usize> {
    let mut removed = 0;
    for project in registry.projects() {
        let path = output_path(out_dir, project, settings);
        if !path.is_file() {
            continue;
        }
        std::fs::remove_file(&path).map_err(|source| ConfigureError::Remove {
            path: path.clone(),
            source,
        })?;
        log(LogLevel::Info, &format!("Cleaning: {}", path.display()));
        removed += 1;
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Diagnostics;
    use crate::hierarchy;
    use crate::registry::tests::registry_of;
    use crate::resolver;

    fn template_tree() -> Registry {
        let mut registry = registry_of(&[
            ("", "TEMPLATE = subdirs\nSUBDIRS = Core Gui App\n"),
            ("Core", "TEMPLATE = lib\n"),
            ("Gui", "TEMPLATE = subdirs\nSUBDIRS = Widgets Windows\n"),
            ("Gui/Widgets", "TEMPLATE = lib\nDEPENDS = Core\n"),
            ("Gui/Windows", "TEMPLATE = lib\nDEPENDS = Gui/Widgets\n"),
            ("App", "TEMPLATE = app\nDEPENDS = Gui/Windows\n"),
        ]);
        let mut diagnostics = Diagnostics::new();
        resolver::resolve(&mut registry, &mut diagnostics);
        hierarchy::link_subprojects(&mut registry, &mut diagnostics);
        hierarchy::reconcile(&mut registry);
        registry
    }

    #[test]
    fn app_links_in_reverse_topological_order() {
        let registry = template_tree();
        let app = registry.by_rel_dir("App").unwrap();
        let text = render(&registry, app, &Settings::default(), Path::new("/build"));

        assert!(text.starts_with(blocks::HEADER));
        assert!(text.contains("CONFIG += c++11"));
        assert!(text.contains("CONFIG += create_prl link_prl"));
        assert!(!text.contains("staticlib"));
        assert!(text.contains("RELEASE_OR_DEBUG = release"));

        let windows = text.find("-lWindows").unwrap();
        let widgets = text.find("-lWidgets").unwrap();
        let core = text.find("-lCore").unwrap();
        assert!(windows < widgets && widgets < core);
        assert!(text.contains("unix:  LIBS += -L/build/Gui/Windows/ -lWindows"));
        assert!(text.contains("INCLUDEPATH += /src/Gui/Windows/../"));
    }

    #[test]
    fn include_path_follows_the_project_file() {
        let mut registry = registry_of(&[("App", "TEMPLATE = app\nDEPENDS = Core\n")]);
        registry.insert(Project::parse(
            "Core",
            "Core",
            PathBuf::from("/mnt/shared/Core/Core.pro"),
            "TEMPLATE = lib\n",
        ));
        let mut diagnostics = Diagnostics::new();
        resolver::resolve(&mut registry, &mut diagnostics);
        assert!(diagnostics.is_empty());

        let app = registry.by_rel_dir("App").unwrap();
        let text = render(&registry, app, &Settings::default(), Path::new("/build"));
        assert!(text.contains("INCLUDEPATH += /mnt/shared/Core/../"));
        assert!(!text.contains("/src/Core"));
    }

    #[test]
    fn aggregate_lists_keys_and_depends() {
        let registry = template_tree();
        let root = registry.by_rel_dir("").unwrap();
        let text = render(&registry, root, &Settings::default(), Path::new("/build"));

        assert!(text.contains("SUBDIRS = \\\n    Core \\\n    Gui \\\n    App\n"));
        assert!(text.contains("Core.subdir  = Core\nCore.depends =\n"));
        assert!(text.contains("Gui.subdir  = Gui\nGui.depends = Core\n"));
        assert!(text.contains("App.subdir  = App\nApp.depends = Core Gui\n"));
        assert!(!text.contains("CONFIG +="));
        assert!(!text.contains("RELEASE_OR_DEBUG"));
    }

    #[test]
    fn library_without_dependencies() {
        let registry = template_tree();
        let core = registry.by_rel_dir("Core").unwrap();
        let text = render(&registry, core, &Settings::default(), Path::new("/build"));
        assert!(text.contains("CONFIG += staticlib"));
        assert!(text.contains("INCLUDEPATH += $$_PRO_FILE_PWD_/../"));
        assert!(!text.contains("RELEASE_OR_DEBUG"));
        assert!(!text.contains("LIBS +="));
    }

    #[test]
    fn unknown_kind_gets_only_the_header() {
        let registry = registry_of(&[("Docs", "QT -= gui\n")]);
        let text = render(&registry, 0, &Settings::default(), Path::new("/build"));
        assert_eq!(text, blocks::HEADER);
    }

    #[test]
    fn settings_change_the_output() {
        let registry = template_tree();
        let widgets = registry.by_rel_dir("Gui/Widgets").unwrap();
        let settings = Settings {
            cxx_standard: "c++17".to_string(),
            static_libs: false,
            create_prl: false,
            ..Settings::default()
        };
        let text = render(&registry, widgets, &settings, Path::new("/build"));
        assert!(text.contains("CONFIG += c++17"));
        assert!(!text.contains("staticlib"));
        assert!(!text.contains("create_prl"));
        assert!(!text.contains("PRE_TARGETDEPS"));
    }

    #[test]
    fn emit_is_idempotent_and_clean_removes() {
        let registry = template_tree();
        let out = tempfile::tempdir().unwrap();
        let settings = Settings::default();

        let dry = emit(&registry, &settings, out.path(), true).unwrap();
        assert_eq!(dry.written, 6);
        assert!(!out.path().join(".config.pri").exists());

        let first = emit(&registry, &settings, out.path(), false).unwrap();
        assert_eq!(first, EmitSummary { written: 6, unchanged: 0 });
        let app_file = out.path().join("App/.config.pri");
        let before = std::fs::read_to_string(&app_file).unwrap();

        let second = emit(&registry, &settings, out.path(), false).unwrap();
        assert_eq!(second, EmitSummary { written: 0, unchanged: 6 });
        assert_eq!(std::fs::read_to_string(&app_file).unwrap(), before);

        assert_eq!(clean(&registry, &settings, out.path()).unwrap(), 6);
        assert!(!app_file.exists());
        assert_eq!(clean(&registry, &settings, out.path()).unwrap(), 0);
    }
}
