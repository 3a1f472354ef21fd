// src/cellar/brew.rs

//! Brew: the build execution for a single formula

use crate::configure::configure_args;
use crate::error::{Error, Result};
use crate::formula::{Formula, PatchRule};
use crate::options::{BuildOption, OptionSet};
use crate::patch;
use crate::paths::InstallPaths;
use crate::platform::HostPlatform;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;
use tracing::{debug, info};

use super::archive::extract_archive;
use super::config::BrewResult;
use super::Cellar;

/// A single brew operation
pub struct Brew<'a> {
    pub(super) cellar: &'a Cellar,
    pub(super) formula: &'a Formula,
    pub(super) options: OptionSet,
    pub(super) platform: HostPlatform,
    pub(super) paths: InstallPaths,
    /// Temporary build directory
    pub(super) build_dir: TempDir,
    /// Source directory within build_dir
    pub(super) source_dir: PathBuf,
    /// Cached archive path, set by fetch
    pub(super) archive_path: Option<PathBuf>,
    /// Build environment applied to every external step
    pub(super) env: Vec<(&'static str, String)>,
    /// Build log accumulator
    pub(super) log: String,
    /// Warnings
    pub(super) warnings: Vec<String>,
}

impl<'a> Brew<'a> {
    pub(super) fn new(
        cellar: &'a Cellar,
        formula: &'a Formula,
        options: OptionSet,
        platform: HostPlatform,
    ) -> Result<Self> {
        let build_dir = TempDir::new()?;
        let source_dir = build_dir.path().join("source");
        fs::create_dir_all(&source_dir)?;

        let paths = InstallPaths::new(
            cellar.config.prefix_root.clone(),
            formula.package.name.clone(),
            formula.package.version.clone(),
        );

        // No CPU-specific optimization flags; tools that query the installed
        // config script inherit whatever we compile with.
        let mut flags = String::from("-Os");
        if options.contains(BuildOption::Universal) {
            for arch in platform.universal_archs() {
                flags.push_str(" -arch ");
                flags.push_str(arch);
            }
        }

        let env = vec![
            ("CFLAGS", flags.clone()),
            ("CXXFLAGS", flags),
            ("MAKEFLAGS", format!("-j{}", cellar.config.jobs)),
        ];

        Ok(Self {
            cellar,
            formula,
            options,
            platform,
            paths,
            build_dir,
            source_dir,
            archive_path: None,
            env,
            log: String::new(),
            warnings: Vec::new(),
        })
    }

    /// Phase 1: fetch the source archive into the cache
    pub(super) fn fetch(&mut self) -> Result<()> {
        let url = self.formula.archive_url();
        let cached = self
            .cellar
            .fetch_source(&url, &self.formula.source.checksum)?;

        // Cache entries are keyed by checksum; restore the real filename so
        // extraction can see the archive type
        let local = self.build_dir.path().join(self.formula.archive_filename());
        fs::copy(&cached, &local)?;

        self.log_line(&format!("Fetched source: {}", url));
        self.archive_path = Some(local);
        Ok(())
    }

    /// Phase 2: unpack the archive
    pub(super) fn unpack(&mut self) -> Result<()> {
        let archive = self
            .archive_path
            .clone()
            .ok_or_else(|| Error::MissingFile("source archive (fetch not run)".to_string()))?;

        extract_archive(&archive, &self.source_dir)?;
        self.log_line(&format!("Extracted source to {}", self.source_dir.display()));

        // Archives usually carry a single top-level directory
        let entries: Vec<_> = fs::read_dir(&self.source_dir)?
            .filter_map(|e| e.ok())
            .collect();
        if entries.len() == 1 && entries[0].file_type().map(|t| t.is_dir()).unwrap_or(false) {
            self.source_dir = entries[0].path();
            debug!("Source directory: {}", self.source_dir.display());
        }

        Ok(())
    }

    /// Phase 3: apply source-tree patch rules
    pub(super) fn patch_source(&mut self) -> Result<()> {
        let rules = self.substituted_rules(&self.formula.build.patches);
        if rules.is_empty() {
            return Ok(());
        }

        patch::apply_rules(&self.source_dir, &rules, &self.platform)?;
        for rule in &rules {
            self.log_line(&format!("Source patch rule: {}", rule.file));
        }
        Ok(())
    }

    /// Phase 4: run the external configure tool with the translated arguments
    pub(super) fn configure(&mut self) -> Result<()> {
        let args = configure_args(self.formula, &self.paths, &self.options, &self.platform);
        let tool = self.cellar.config.configure_tool.clone();
        self.run_step("configure", &tool, &args)
    }

    /// Phase 5: compile
    pub(super) fn compile(&mut self) -> Result<()> {
        let tool = self.cellar.config.make_tool.clone();
        self.run_step("compile", &tool, &[])
    }

    /// Phase 6: install into the keg prefix
    pub(super) fn install(&mut self) -> Result<()> {
        let tool = self.cellar.config.make_tool.clone();
        self.run_step("install", &tool, &["install".to_string()])
    }

    /// Phase 7: post-install fixups
    ///
    /// Order: remove unwanted directory templates, patch installed files,
    /// symlink commands into the shared bin, relocate helpers into libexec.
    pub(super) fn fixup(&mut self) -> Result<()> {
        let prefix = self.paths.prefix();
        let actions = self.formula.install.clone();

        for dir in &actions.remove_dirs {
            let target = self.paths.in_prefix(dir);
            if target.exists() {
                fs::remove_dir_all(&target)?;
                self.log_line(&format!("Removed {}", target.display()));
            }
        }

        let rules = self.substituted_rules(&actions.patches);
        patch::apply_rules(&prefix, &rules, &self.platform)?;
        for rule in &rules {
            self.log_line(&format!("Install patch rule: {}", rule.file));
        }

        if !actions.bin_symlinks.is_empty() {
            let shared_bin = self.paths.shared_bin();
            fs::create_dir_all(&shared_bin)?;

            for rel in &actions.bin_symlinks {
                let source = self.paths.in_prefix(rel);
                if !source.exists() {
                    return Err(Error::MissingFile(source.display().to_string()));
                }
                let name = source
                    .file_name()
                    .ok_or_else(|| Error::parse(format!("bad symlink path: {}", rel)))?;
                let link = shared_bin.join(name);
                if link.symlink_metadata().is_ok() {
                    fs::remove_file(&link)?;
                }
                std::os::unix::fs::symlink(&source, &link)?;
                self.log_line(&format!(
                    "Linked {} -> {}",
                    link.display(),
                    source.display()
                ));
            }
        }

        if !actions.libexec_moves.is_empty() {
            let libexec = self.paths.libexec();
            fs::create_dir_all(&libexec)?;

            for rel in &actions.libexec_moves {
                let source = self.paths.in_prefix(rel);
                if !source.exists() {
                    return Err(Error::MissingFile(source.display().to_string()));
                }
                let name = source
                    .file_name()
                    .ok_or_else(|| Error::parse(format!("bad libexec path: {}", rel)))?;
                let dest = libexec.join(name);
                fs::rename(&source, &dest)?;
                self.log_line(&format!("Moved {} to {}", rel, dest.display()));
            }
        }

        Ok(())
    }

    /// Finalize the run
    pub(super) fn finish(self, keep_builddir: bool) -> Result<BrewResult> {
        let prefix = self.paths.prefix();
        if keep_builddir {
            let kept = self.build_dir.into_path();
            info!("Keeping build directory: {}", kept.display());
        }
        Ok(BrewResult {
            prefix,
            log: self.log,
            warnings: self.warnings,
        })
    }

    /// Resolve `%(...)s` tokens in patch replacements and guards
    ///
    /// Patterns stay literal; only the replacement side may reference the
    /// resolved install layout.
    fn substituted_rules(&self, rules: &[PatchRule]) -> Vec<PatchRule> {
        let pairs = [
            ("prefix", self.paths.prefix().display().to_string()),
            ("bin", self.paths.shared_bin().display().to_string()),
            ("etc", self.paths.etc().display().to_string()),
            ("var", self.paths.var().display().to_string()),
        ];

        rules
            .iter()
            .map(|rule| PatchRule {
                file: rule.file.clone(),
                pattern: rule.pattern.clone(),
                replace: self.formula.substitute(&rule.replace, &pairs),
                when: rule.when,
                unless_contains: rule
                    .unless_contains
                    .as_ref()
                    .map(|g| self.formula.substitute(g, &pairs)),
            })
            .collect()
    }

    /// Run one external build step, fail-fast on non-zero exit
    fn run_step(&mut self, phase: &'static str, program: &str, args: &[String]) -> Result<()> {
        info!("Running {} step", phase);
        debug!("Command: {} {}", program, args.join(" "));

        let output = Command::new(program)
            .args(args)
            .current_dir(&self.source_dir)
            .envs(self.env.iter().map(|(k, v)| (*k, v.as_str())))
            .output()
            .map_err(|source| Error::Spawn { phase, source })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        self.log_output(phase, &stdout, &stderr);

        if !output.status.success() {
            return Err(Error::BuildStep {
                phase,
                status: output.status.code().unwrap_or(-1),
                stderr: stderr.into_owned(),
            });
        }

        Ok(())
    }

    fn log_line(&mut self, line: &str) {
        self.log.push_str(line);
        self.log.push('\n');
    }

    fn log_output(&mut self, phase: &str, stdout: &str, stderr: &str) {
        self.log_line(&format!("=== {} ===", phase));
        if !stdout.is_empty() {
            self.log.push_str(stdout);
            self.log.push('\n');
        }
        if !stderr.is_empty() {
            self.log.push_str(stderr);
            self.log.push('\n');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cellar::CellarConfig;
    use crate::formula::parse_formula;
    use crate::platform::MacRelease;

    fn formula() -> Formula {
        parse_formula(
            r#"
[package]
name = "mysql"
version = "5.6.19-boxen1"

[source]
archive = "http://cdn.mysql.com/Downloads/MySQL-5.6/mysql-5.6.19.tar.gz"
checksum = "sha1:4b59d96642c62c26648826ea4f9c30dbf123dbed"

[build]
options = ["universal", "enable-debug"]

[[install.patches]]
file = "support-files/mysql.server"
pattern = '(?m)^(PATH=".*)(")$'
replace = '${1}:%(bin)s${2}'
unless_contains = ':%(bin)s"'
"#,
        )
        .unwrap()
    }

    fn cellar(root: &std::path::Path) -> Cellar {
        Cellar::new(CellarConfig {
            prefix_root: root.to_path_buf(),
            jobs: 2,
            ..Default::default()
        })
    }

    #[test]
    fn test_env_minimal_optimization() {
        let dir = tempfile::TempDir::new().unwrap();
        let cellar = cellar(dir.path());
        let f = formula();

        let brew = Brew::new(
            &cellar,
            &f,
            OptionSet::new(),
            HostPlatform::new(MacRelease::Mavericks),
        )
        .unwrap();

        let cflags = brew.env.iter().find(|(k, _)| *k == "CFLAGS").unwrap();
        assert_eq!(cflags.1, "-Os");
        let makeflags = brew.env.iter().find(|(k, _)| *k == "MAKEFLAGS").unwrap();
        assert_eq!(makeflags.1, "-j2");
    }

    #[test]
    fn test_env_universal_arch_flags() {
        let dir = tempfile::TempDir::new().unwrap();
        let cellar = cellar(dir.path());
        let f = formula();

        let options = OptionSet::parse_lossy(["universal"]);
        let brew = Brew::new(
            &cellar,
            &f,
            options,
            HostPlatform::new(MacRelease::Mavericks),
        )
        .unwrap();

        let cflags = brew.env.iter().find(|(k, _)| *k == "CFLAGS").unwrap();
        assert_eq!(cflags.1, "-Os -arch i386 -arch x86_64");
    }

    #[test]
    fn test_substituted_rules_resolve_layout_tokens() {
        let dir = tempfile::TempDir::new().unwrap();
        let cellar = cellar(dir.path());
        let f = formula();

        let brew = Brew::new(
            &cellar,
            &f,
            OptionSet::new(),
            HostPlatform::new(MacRelease::Mavericks),
        )
        .unwrap();

        let rules = brew.substituted_rules(&f.install.patches);
        let bin = dir.path().join("bin").display().to_string();
        assert_eq!(rules[0].replace, format!("${{1}}:{}${{2}}", bin));
        assert_eq!(
            rules[0].unless_contains.as_deref(),
            Some(format!(":{}\"", bin).as_str())
        );
        // Pattern is untouched
        assert_eq!(rules[0].pattern, f.install.patches[0].pattern);
    }

    #[test]
    fn test_unpack_before_fetch_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let cellar = cellar(dir.path());
        let f = formula();

        let mut brew = Brew::new(
            &cellar,
            &f,
            OptionSet::new(),
            HostPlatform::new(MacRelease::Mavericks),
        )
        .unwrap();

        assert!(matches!(brew.unpack(), Err(Error::MissingFile(_))));
    }

    #[test]
    fn test_run_step_spawn_failure() {
        let dir = tempfile::TempDir::new().unwrap();
        let cellar = cellar(dir.path());
        let f = formula();

        let mut brew = Brew::new(
            &cellar,
            &f,
            OptionSet::new(),
            HostPlatform::new(MacRelease::Mavericks),
        )
        .unwrap();

        let err = brew
            .run_step("configure", "/nonexistent/tool", &[])
            .unwrap_err();
        assert!(matches!(err, Error::Spawn { phase: "configure", .. }));
    }
}
