// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.
#![allow(dead_code)]

use flate2::write::GzEncoder;
use flate2::Compression;
use formulary::{parse_formula_file, DigestAlgorithm, Formula};
use std::fs::{self, File};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Load the shipped MySQL formula from the repo's formulas/ directory.
pub fn mysql_formula() -> Formula {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("formulas/mysql.toml");
    parse_formula_file(&path).unwrap()
}

/// Build a gzipped source tarball resembling the upstream layout.
///
/// Contains the cmake helper the formula's source patch targets, so the
/// patch phase has something to rewrite.
pub fn make_source_tarball(dest: &Path) {
    let file = File::create(dest).unwrap();
    let encoder = GzEncoder::new(file, Compression::default());
    let mut builder = tar::Builder::new(encoder);

    let files: &[(&str, &str)] = &[
        (
            "mysql-5.6.19/cmake/libutils.cmake",
            "COMMAND /usr/bin/libtool -static -o ${TARGET_LOCATION}\n",
        ),
        ("mysql-5.6.19/CMakeLists.txt", "project(mysql)\n"),
    ];

    for (name, content) in files {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(&mut header, *name, content.as_bytes())
            .unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap();
}

/// Seed a source cache with the tarball under its checksum key.
///
/// Returns the `sha256:...` checksum to put in the formula.
pub fn seed_cache(cache_dir: &Path, tarball: &Path) -> String {
    let bytes = fs::read(tarball).unwrap();
    let digest = DigestAlgorithm::Sha256.hash_bytes(&bytes);
    let checksum = format!("sha256:{}", digest);

    fs::create_dir_all(cache_dir).unwrap();
    fs::copy(tarball, cache_dir.join(checksum.replace(':', "_"))).unwrap();

    checksum
}

/// Write an executable stub shell script.
pub fn write_stub(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();

    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();

    path
}

/// Stub configure tool: records its arguments and publishes the requested
/// install prefix for the make stub.
pub fn configure_stub(dir: &Path, args_log: &Path) -> PathBuf {
    let body = format!(
        r#"printf '%s\n' "$@" > {log}
for a in "$@"; do
  case "$a" in
    -DCMAKE_INSTALL_PREFIX=*) printf '%s' "${{a#*=}}" > .prefix ;;
  esac
done
exit 0"#,
        log = args_log.display()
    );
    write_stub(dir, "cmake", &body)
}

/// Stub make tool: `make` marks the compile; `make install` populates the
/// prefix with the files the fixup phase expects.
pub fn make_stub(dir: &Path) -> PathBuf {
    let body = r#"P="$(cat .prefix)"
if [ "$1" = "install" ]; then
  mkdir -p "$P/support-files" "$P/scripts" "$P/bin" "$P/data"
  printf '#!/bin/sh\nPATH="/sbin:/usr/sbin:/bin:/usr/bin"\nexport PATH\npidof mysqld\n' > "$P/support-files/mysql.server"
  printf '#!/bin/sh\necho setup\n' > "$P/scripts/mysql_install_db"
  printf '#!/usr/bin/perl\n' > "$P/bin/mysqlaccess"
  printf '# config\n' > "$P/bin/mysqlaccess.conf"
  printf 'template\n' > "$P/data/template.db"
else
  touch .compiled
fi
exit 0"#;
    write_stub(dir, "make", body)
}

/// Stub make tool that fails the compile step.
pub fn failing_make_stub(dir: &Path) -> PathBuf {
    let body = r#"if [ "$1" = "install" ]; then
  mkdir -p "$(cat .prefix)/support-files"
  exit 0
fi
echo "simulated compile failure" >&2
exit 2"#;
    write_stub(dir, "make-failing", body)
}
