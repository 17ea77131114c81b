//! The set of projects found in a source tree.
//!
//! Projects live in one arena (`Vec<Project>`) and refer to each other through
//! [`ProjectId`]s: dependencies, parent and children are all indices into it.
use indexmap::IndexSet;
use itertools::Itertools;
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::{ConfigureError, Result};
use crate::resolver::ClosureState;
use crate::utils::{descriptor, log, LogLevel, ProjectKind, Settings};

/// Index of a project in its [`Registry`]
pub type ProjectId = usize;

/// A project parsed from a `.pro` file
#[derive(Debug, Clone)]
pub struct Project {
    /// Project
    pub name: String,
    /// Path/To/Project, empty for the root project
    pub rel_dir: String,
    /// <src>/Path/To/Project/Project.pro
    pub src_path: PathBuf,
    pub kind: ProjectKind,
    /// DEPENDS, duplicates removed, e.g. [ "Gui/Widgets", "Core" ]
    pub declared_dependencies: Vec<String>,
    /// SUBDIRS, e.g. [ "Widgets", "Windows" ]
    pub declared_subprojects: Vec<String>,
    /// Declared dependencies that resolved to a library
    pub resolved_dependencies: Vec<ProjectId>,

    pub closure_state: ClosureState,
    /// Transitive closure of `resolved_dependencies`, in encounter order
    pub transitive_dependencies: IndexSet<ProjectId>,
    /// `transitive_dependencies` sorted so that dependees come first
    pub ordered_dependencies: Vec<ProjectId>,

    pub parent: Option<ProjectId>,
    pub children: Vec<ProjectId>,
    /// Dir of this project relative to its parent, e.g. To/Project
    pub subdir: String,
    /// `subdir` without slashes, e.g. To__Project
    pub subdir_key: String,
    /// Keys of the siblings that must be built before this project
    pub sibling_predecessors: BTreeSet<String>,
}

impl Project {
    /// Creates a project from the content of its `.pro` file
    /// # Arguments
    /// * `name` - The file name without `.pro`
    /// * `rel_dir` - The directory relative to the source root
    /// * `src_path` - The path of the `.pro` file
    /// * `text` - The content of the `.pro` file
    pub fn parse(name: &str, rel_dir: &str, src_path: PathBuf, text: &str) -> Self {
        let template = descriptor::template(text);
        Self {
            name: name.to_string(),
            rel_dir: rel_dir.to_string(),
            src_path,
            kind: ProjectKind::from_template(template.as_deref()),
            declared_dependencies: descriptor::depends(text).into_iter().unique().collect(),
            declared_subprojects: descriptor::subdirs(text),
            resolved_dependencies: Vec::new(),
            closure_state: ClosureState::Unvisited,
            transitive_dependencies: IndexSet::new(),
            ordered_dependencies: Vec::new(),
            parent: None,
            children: Vec::new(),
            subdir: String::new(),
            subdir_key: String::new(),
            sibling_predecessors: BTreeSet::new(),
        }
    }

    /// Name used in messages: the relative dir, or the name for the root project
    pub fn label(&self) -> &str {
        if self.rel_dir.is_empty() {
            &self.name
        } else {
            &self.rel_dir
        }
    }
}

/// All projects of a source tree, keyed by relative dir
#[derive(Debug, Default)]
pub struct Registry {
    src_dir: PathBuf,
    lib_prefixes: Vec<String>,
    projects: Vec<Project>,
    by_rel_dir: HashMap<String, ProjectId>,
}

impl Registry {
    pub fn new(src_dir: impl Into<PathBuf>, lib_prefixes: Vec<String>) -> Self {
        Self {
            src_dir: src_dir.into(),
            lib_prefixes,
            projects: Vec::new(),
            by_rel_dir: HashMap::new(),
        }
    }

    /// Finds and parses every `.pro` file under `src_dir`
    /// # Arguments
    /// * `src_dir` - The root of the source tree
    /// * `settings` - Provides the library lookup prefixes
    /// * `diagnostics` - Receives a warning for each project with a missing or unsupported TEMPLATE
    pub fn load(src_dir: &Path, settings: &Settings, diagnostics: &mut Diagnostics) -> Result<Self> {
        if !src_dir.is_dir() {
            return Err(ConfigureError::SourceDirNotFound(src_dir.to_path_buf()));
        }
        let mut registry = Registry::new(src_dir, settings.lib_prefixes.clone());
        let mut found = Vec::new();
        find_project_files(src_dir, "", &mut found)?;
        for (rel_dir, pro_path) in found {
            let text = std::fs::read_to_string(&pro_path).map_err(|source| ConfigureError::Read {
                path: pro_path.clone(),
                source,
            })?;
            let name = pro_path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
            let project = Project::parse(&name, &rel_dir, pro_path, &text);
            if project.kind == ProjectKind::Unknown {
                diagnostics.push(Diagnostic::MissingTemplate {
                    project: project.label().to_string(),
                });
            }
            registry.insert(project);
        }
        log(
            LogLevel::Info,
            &format!("Found {} projects in {}", registry.len(), src_dir.display()),
        );
        Ok(registry)
    }

    /// Adds a project. A project with the same relative dir is replaced.
    pub fn insert(&mut self, project: Project) -> ProjectId {
        if let Some(&id) = self.by_rel_dir.get(&project.rel_dir) {
            self.projects[id] = project;
            return id;
        }
        let id = self.projects.len();
        self.by_rel_dir.insert(project.rel_dir.clone(), id);
        self.projects.push(project);
        id
    }

    pub fn src_dir(&self) -> &Path {
        &self.src_dir
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn ids(&self) -> std::ops::Range<ProjectId> {
        0..self.projects.len()
    }

    pub fn get(&self, id: ProjectId) -> &Project {
        &self.projects[id]
    }

    pub fn get_mut(&mut self, id: ProjectId) -> &mut Project {
        &mut self.projects[id]
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn by_rel_dir(&self, rel_dir: &str) -> Option<ProjectId> {
        self.by_rel_dir.get(rel_dir).copied()
    }

    /// Returns the library an identifier of DEPENDS refers to.
    ///
    /// The identifier is looked up as `<prefix>/<identifier>` for each library
    /// prefix, then as a relative dir, then as the name of a single project.
    /// Only `TEMPLATE = lib` projects match.
    pub fn find_library(&self, identifier: &str) -> Option<ProjectId> {
        let is_lib = |id: &ProjectId| self.projects[*id].kind == ProjectKind::Library;

        let by_prefix = self
            .lib_prefixes
            .iter()
            .filter_map(|prefix| self.by_rel_dir(&format!("{}/{}", prefix, identifier)))
            .find(is_lib);
        if by_prefix.is_some() {
            return by_prefix;
        }
        if let Some(id) = self.by_rel_dir(identifier).filter(is_lib) {
            return Some(id);
        }
        let mut by_name = self
            .ids()
            .filter(|&id| self.projects[id].name == identifier)
            .filter(is_lib);
        match (by_name.next(), by_name.next()) {
            (Some(id), None) => Some(id),
            _ => None,
        }
    }

    /// Resolves the declared dependencies of every project.
    /// Unknown identifiers are reported once per project and skipped.
    pub fn resolve_dependencies(&mut self, diagnostics: &mut Diagnostics) {
        for id in self.ids() {
            let mut resolved = Vec::new();
            for identifier in &self.projects[id].declared_dependencies {
                match self.find_library(identifier) {
                    Some(lib) if !resolved.contains(&lib) => resolved.push(lib),
                    Some(_) => {}
                    None => diagnostics.push(Diagnostic::DependencyNotFound {
                        project: self.projects[id].label().to_string(),
                        dependency: identifier.clone(),
                    }),
                }
            }
            self.projects[id].resolved_dependencies = resolved;
        }
    }
}

//returns (rel_dir, path) of the .pro files under dir, depth first, sorted by name.
//symlinks are not followed, a linked directory would register its projects twice
//or loop back up the tree
fn find_project_files(dir: &Path, rel_dir: &str, found: &mut Vec<(String, PathBuf)>) -> Result<()> {
    let read_dir_error = |source: std::io::Error| ConfigureError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_dir_error)? {
        let entry = entry.map_err(read_dir_error)?;
        let file_type = entry.file_type().map_err(read_dir_error)?;
        if file_type.is_symlink() {
            log(
                LogLevel::Debug,
                &format!("Not following symlink {}", entry.path().display()),
            );
            continue;
        }
        entries.push((entry, file_type));
    }
    entries.sort_by_key(|(entry, _)| entry.file_name());

    let mut pro_files = entries
        .iter()
        .filter(|(_, file_type)| file_type.is_file())
        .map(|(entry, _)| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "pro"));
    if let Some(pro_path) = pro_files.next() {
        for ignored in pro_files {
            log(
                LogLevel::Warn,
                &format!(
                    "Ignoring {}: {} already defines the project of this directory",
                    ignored.display(),
                    pro_path.display()
                ),
            );
        }
        found.push((rel_dir.to_string(), pro_path));
    }

    for (entry, file_type) in &entries {
        if !file_type.is_dir() {
            continue;
        }
        let dir_name = entry.file_name().to_string_lossy().into_owned();
        let child_rel_dir = if rel_dir.is_empty() {
            dir_name
        } else {
            format!("{}/{}", rel_dir, dir_name)
        };
        find_project_files(&entry.path(), &child_rel_dir, found)?;
    }
    Ok(())
}
