//! Generates the boilerplate of a qmake project tree.
//!
//! For each project file in the tree:
//!
//! ```text
//! src/Path/To/Project/Project.pro
//! ```
//!
//! an additional file is generated in the build directory and included by
//! `Project.pro`:
//!
//! ```text
//! <build-dir>/Path/To/Project/.config.pri
//! ```
//!
//! It sets the compiler configuration, the INCLUDEPATH, LIBS, DEPENDPATH and
//! PRE_TARGETDEPS of every library the project depends on (directly or not, in
//! linker order), and the `.depends` of the SUBDIRS of aggregate projects.
//!
//! # Project files
//! Dependencies are declared with a `DEPENDS` variable naming library projects
//! by their path, relative to the source root or to one of the library prefixes
//! (`Third` and `Libs` by default):
//! ```text
//! # src/Gui/Windows/Windows.pro
//! TEMPLATE = lib
//! DEPENDS = \
//!     Core \
//!     Gui/Widgets
//! include($$OUT_PWD/.config.pri)
//! ```
//!
//! # Usage
//! ```text
//! qmake_configure configure ./src ./build
//! qmake_configure deps ./src
//! ```
//!
//! # Sample toml file
//! Every key is optional, these are the defaults
//! ```toml
//! # src/qmake_configure.toml
//![configure]
//!output_file = ".config.pri"
//!lib_prefixes = ["Third", "Libs"]
//!cxx_standard = "c++11"
//!static_libs = true
//!create_prl = true
//!```

/// Contains code that handles the subcommands
pub mod bin_flags;
/// Collects non-fatal problems of the project graph
pub mod diagnostics;
/// Generates the include files
pub mod emitter;
/// Fatal errors
pub mod error;
/// Contains hashing related functions
pub mod hasher;
/// Subdir build order
pub mod hierarchy;
/// Projects of a source tree
pub mod registry;
/// Dependency closures and link order
pub mod resolver;
/// Contains logger, settings and descriptor parser
pub mod utils;
