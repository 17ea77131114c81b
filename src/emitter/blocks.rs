//! Fixed pieces of text assembled into the generated `.pri` files.

pub const HEADER: &str = "
# THIS FILE WAS AUTOMATICALLY GENERATED.
# IT IS LOCATED IN THE BUILD DIRECTORY.
# ANY EDIT WILL BE LOST.
";

pub const PRL: &str = "
# Create a .prl file for this project and use the .prl files of the libraries
# it links against, so that their own dependencies are linked as well.
CONFIG += create_prl link_prl
";

pub const STATIC_LIB: &str = "
# Compile as a static library
CONFIG += staticlib
";

pub const SELF_INCLUDE: &str = "
# Add this lib project to its own INCLUDEPATH
INCLUDEPATH += $$_PRO_FILE_PWD_/../
unix: QMAKE_CXXFLAGS += $$QMAKE_CFLAGS_ISYSTEM $$_PRO_FILE_PWD_/../
";

pub const RELEASE_OR_DEBUG: &str = "
# Convenient variable whose value is \"release\" when building
# in release mode, and \"debug\" when building in debug mode
CONFIG(release, debug|release): RELEASE_OR_DEBUG = release
CONFIG(debug,   debug|release): RELEASE_OR_DEBUG = debug
";

pub fn cxx_standard(standard: &str) -> String {
    format!("\n# C++ standard\nCONFIG += {}\n", standard)
}

/// SUBDIRS of an aggregate, using keys instead of folder paths
pub fn subdirs_override<'a>(keys: impl IntoIterator<Item = &'a str>) -> String {
    let mut text = String::from("\n# Override value of SUBDIRS by using keys instead of folder path\nSUBDIRS =");
    for key in keys {
        text.push_str(" \\\n    ");
        text.push_str(key);
    }
    text.push('\n');
    text
}

/// Location and build predecessors of one subdir
pub fn subdir<'a>(key: &str, subdir: &str, depends: impl IntoIterator<Item = &'a str>) -> String {
    let mut text = format!(
        "\n# Set {key} location and dependencies\n{key}.subdir  = {subdir}\n{key}.depends ="
    );
    for dep in depends {
        text.push(' ');
        text.push_str(dep);
    }
    text.push('\n');
    text
}

/// Compile and link settings for one library dependency
/// # Arguments
/// * `name` - The library name, as passed to `-l`
/// * `src_dir` - The library's source directory
/// * `out_dir` - The library's build directory
/// * `static_lib` - Whether to relink when the library archive changes
pub fn add_lib(name: &str, src_dir: &str, out_dir: &str, static_lib: bool) -> String {
    let mut text = format!(
        "
# Add {name} to INCLUDEPATH.
# This fixes \"cannot find {name}/Foo.h\" compile errors.
INCLUDEPATH += {src_dir}/../
unix: QMAKE_CXXFLAGS += $$QMAKE_CFLAGS_ISYSTEM {src_dir}/../

# Add {name} to LIBS.
# This fixes \"undefined reference to `{name}::Foo()'\" linking errors.
unix:  LIBS += -L{out_dir}/ -l{name}
win32: LIBS += -L{out_dir}/$$RELEASE_OR_DEBUG/ -l{name}

# Add {name} to DEPENDPATH.
# This recompiles files of this project whenever headers of {name} change.
DEPENDPATH += {src_dir}/../
"
    );
    if static_lib {
        text.push_str(&format!(
            "
# Add {name} to PRE_TARGETDEPS.
# This relinks this project whenever {name} is recompiled.
unix:       PRE_TARGETDEPS += {out_dir}/lib{name}.a
win32-g++:  PRE_TARGETDEPS += {out_dir}/$$RELEASE_OR_DEBUG/lib{name}.a
else:win32: PRE_TARGETDEPS += {out_dir}/$$RELEASE_OR_DEBUG/{name}.lib
"
        ));
    }
    text
}
