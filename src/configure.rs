// src/configure.rs

//! Option-to-argument translation for the configure step
//!
//! A pure function from the selected option set (plus resolved install
//! paths and host platform) to the ordered CMake argument list. No global
//! state and no process invocation, so rebuilds are reproducible and the
//! output is directly diffable.

use crate::formula::Formula;
use crate::options::{BuildOption, OptionSet};
use crate::paths::InstallPaths;
use crate::platform::HostPlatform;

/// Build the ordered configure argument list
///
/// Output layout, in order:
/// 1. The fixed base list (source dir token, install layout, charset, SSL).
/// 2. Exactly one of the two test-related arguments: enabling the unit-test
///    build downloads the upstream test suite, replacing the default
///    tests-off flag rather than adding to it.
/// 3. One argument per selected option, in option declaration order.
/// 4. `-Wno-dev`.
pub fn configure_args(
    formula: &Formula,
    paths: &InstallPaths,
    options: &OptionSet,
    platform: &HostPlatform,
) -> Vec<String> {
    let prefix = paths.prefix();
    let name = &formula.package.name;

    let mut args: Vec<String> = vec![
        ".".to_string(),
        format!("-DCMAKE_INSTALL_PREFIX={}", prefix.display()),
        "-DCMAKE_FIND_FRAMEWORK=LAST".to_string(),
        "-DCMAKE_VERBOSE_MAKEFILE=ON".to_string(),
        format!("-DMYSQL_DATADIR={}/{}", paths.var().display(), name),
        "-DINSTALL_INCLUDEDIR=include/mysql".to_string(),
        "-DINSTALL_MANDIR=share/man".to_string(),
        format!("-DINSTALL_DOCDIR=share/doc/{}", name),
        "-DINSTALL_INFODIR=share/info".to_string(),
        "-DINSTALL_MYSQLSHAREDIR=share/mysql".to_string(),
        // Both SSL defines are intentional; the second narrows the first
        "-DWITH_SSL=yes".to_string(),
        "-DWITH_SSL=system".to_string(),
        "-DDEFAULT_CHARSET=utf8".to_string(),
        "-DDEFAULT_COLLATION=utf8_general_ci".to_string(),
        format!("-DSYSCONFDIR={}", paths.etc().display()),
        "-DCOMPILATION_COMMENT=Formulary".to_string(),
        "-DWITH_EDITLINE=system".to_string(),
    ];

    // Unit testing at build time requires downloading the test suite
    if options.contains(BuildOption::WithTests) {
        args.push("-DENABLE_DOWNLOADS=ON".to_string());
    } else {
        args.push("-DWITH_UNIT_TESTS=OFF".to_string());
    }

    for option in options.iter() {
        if let Some(arg) = option_arg(option, platform) {
            args.push(arg);
        }
    }

    args.push("-Wno-dev".to_string());

    args
}

/// Map one option to its configure argument, if it has one
///
/// `WithTests` returns nothing here: it replaces the default tests-off
/// flag and is handled in the base list.
fn option_arg(option: BuildOption, platform: &HostPlatform) -> Option<String> {
    match option {
        BuildOption::Universal => Some(format!(
            "-DCMAKE_OSX_ARCHITECTURES={}",
            platform.universal_archs().join(";")
        )),
        BuildOption::WithTests => None,
        BuildOption::WithEmbedded => Some("-DWITH_EMBEDDED_SERVER=ON".to_string()),
        BuildOption::WithArchiveStorageEngine => {
            Some("-DWITH_ARCHIVE_STORAGE_ENGINE=1".to_string())
        }
        BuildOption::WithBlackholeStorageEngine => {
            Some("-DWITH_BLACKHOLE_STORAGE_ENGINE=1".to_string())
        }
        BuildOption::EnableLocalInfile => Some("-DENABLED_LOCAL_INFILE=1".to_string()),
        BuildOption::EnableMemcached => Some("-DWITH_INNODB_MEMCACHED=1".to_string()),
        BuildOption::EnableDebug => Some("-DWITH_DEBUG=1".to_string()),
    }
}
