//! Transitive closure and link order of library dependencies.
//!
//! The closure of every project is computed once with a depth first search.
//! Each project carries a [`ClosureState`]; reaching a project that is still
//! `InProgress` means the dependency graph has a cycle. The cycle is reported
//! and the edge closing it contributes nothing, so the search always ends.
//!
//! The order of a closure puts dependees before their dependents. Libraries
//! unrelated to each other keep the order in which they were first
//! encountered (declared dependencies first, then their own closures), which
//! keeps the generated files stable from one run to the next.
use indexmap::IndexSet;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::registry::{Project, ProjectId, Registry};

/// Progress of the closure computation of one project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClosureState {
    #[default]
    Unvisited,
    InProgress,
    Done,
}

/// Resolves the DEPENDS of every project, then computes their closures and link orders
pub fn resolve(registry: &mut Registry, diagnostics: &mut Diagnostics) {
    registry.resolve_dependencies(diagnostics);
    compute_transitive_dependencies(registry, diagnostics);
    sort_dependencies(registry);
}

/// Fills `transitive_dependencies` of every project.
/// Dependencies must have been resolved first.
pub fn compute_transitive_dependencies(registry: &mut Registry, diagnostics: &mut Diagnostics) {
    fn dfs(
        registry: &mut Registry,
        id: ProjectId,
        from: ProjectId,
        diagnostics: &mut Diagnostics,
    ) {
        match registry.get(id).closure_state {
            ClosureState::Done => return,
            ClosureState::InProgress => {
                diagnostics.push(Diagnostic::CyclicDependency {
                    project: registry.get(id).label().to_string(),
                    via: registry.get(from).label().to_string(),
                });
                return;
            }
            ClosureState::Unvisited => {}
        }
        registry.get_mut(id).closure_state = ClosureState::InProgress;

        let deps = registry.get(id).resolved_dependencies.clone();
        let mut closure: IndexSet<ProjectId> = deps.iter().copied().collect();
        for dep in deps {
            dfs(registry, dep, id, diagnostics);
            closure.extend(registry.get(dep).transitive_dependencies.iter().copied());
        }
        // only reachable through a cycle
        closure.shift_remove(&id);

        let project = registry.get_mut(id);
        project.transitive_dependencies = closure;
        project.closure_state = ClosureState::Done;
    }

    for id in registry.ids() {
        dfs(registry, id, id, diagnostics);
    }
}

/// Returns the closure of `id` ordered so that every library comes after the
/// libraries it depends on.
///
/// At each step the first remaining library, in encounter order, whose own
/// closure has no remaining member is taken. When a cycle leaves no such
/// library the first remaining one is taken.
pub fn topological_order(registry: &Registry, id: ProjectId) -> Vec<ProjectId> {
    let mut remaining: Vec<ProjectId> = registry
        .get(id)
        .transitive_dependencies
        .iter()
        .copied()
        .collect();
    let mut ordered = Vec::with_capacity(remaining.len());
    while !remaining.is_empty() {
        let next = remaining
            .iter()
            .position(|&candidate| {
                let deps = &registry.get(candidate).transitive_dependencies;
                !remaining
                    .iter()
                    .any(|&other| other != candidate && deps.contains(&other))
            })
            .unwrap_or(0);
        ordered.push(remaining.remove(next));
    }
    ordered
}

/// Fills `ordered_dependencies` of every project
pub fn sort_dependencies(registry: &mut Registry) {
    for id in registry.ids() {
        let ordered = topological_order(registry, id);
        registry.get_mut(id).ordered_dependencies = ordered;
    }
}

/// Order in which the libraries of a project are passed to the linker.
///
/// This is the reverse of `ordered_dependencies`: a static library must appear
/// on the command line before the libraries it depends on.
pub fn link_order(project: &Project) -> impl Iterator<Item = ProjectId> + '_ {
    project.ordered_dependencies.iter().rev().copied()
}
