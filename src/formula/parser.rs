// src/formula/parser.rs

//! Formula parsing and validation

use crate::checksum::Checksum;
use crate::error::Result;
use crate::formula::format::{Formula, PatchRule};
use regex::Regex;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Parse a formula from a TOML string
pub fn parse_formula(content: &str) -> Result<Formula> {
    let formula: Formula = toml::from_str(content)?;
    Ok(formula)
}

/// Parse a formula from a file
pub fn parse_formula_file(path: &Path) -> Result<Formula> {
    let content = fs::read_to_string(path)?;
    let formula = parse_formula(&content)?;
    debug!(
        "Parsed formula {} {} from {}",
        formula.package.name,
        formula.package.version,
        path.display()
    );
    Ok(formula)
}

/// Validate a formula, returning warnings
///
/// Warnings are advisory; a formula that loads is usable. Hard errors
/// (malformed TOML, unknown option names) already failed at parse time.
pub fn validate_formula(formula: &Formula) -> Vec<String> {
    let mut warnings = Vec::new();

    if formula.source.archive.trim().is_empty() {
        warnings.push("source.archive is empty".to_string());
    }

    let url = formula.archive_url();
    if url.contains("%(") {
        warnings.push(format!("unresolved variable in archive URL: {}", url));
    }

    if let Err(e) = Checksum::parse(&formula.source.checksum) {
        warnings.push(format!("source.checksum: {}", e));
    }

    for (release, digest) in &formula.bottle {
        if let Err(e) = Checksum::parse(digest) {
            warnings.push(format!("bottle.{}: {}", release, e));
        }
    }

    for conflict in &formula.conflicts {
        if conflict.with.is_empty() {
            warnings.push("conflict entry lists no package names".to_string());
        }
        if conflict.because.trim().is_empty() {
            warnings.push("conflict entry has no reason".to_string());
        }
    }

    let mut seen = Vec::new();
    for option in formula.declared_options() {
        if seen.contains(option) {
            warnings.push(format!("option declared twice: {}", option));
        }
        seen.push(*option);
    }

    for rule in formula
        .build
        .patches
        .iter()
        .chain(formula.install.patches.iter())
    {
        validate_patch_rule(rule, &mut warnings);
    }

    warnings
}

fn validate_patch_rule(rule: &PatchRule, warnings: &mut Vec<String>) {
    let regex = match Regex::new(&rule.pattern) {
        Ok(r) => r,
        Err(e) => {
            warnings.push(format!("patch rule for {}: bad pattern: {}", rule.file, e));
            return;
        }
    };

    // A rule whose replacement still matches its own pattern will re-apply
    // on the next run unless it declares a containment guard.
    if rule.unless_contains.is_none() && regex.is_match(&rule.replace) {
        warnings.push(format!(
            "patch rule for {} is not idempotent (replacement still matches pattern); \
             set unless_contains",
            rule.file
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal(checksum: &str) -> String {
        format!(
            r#"
[package]
name = "hello"
version = "1.0"

[source]
archive = "https://example.com/hello-1.0.tar.gz"
checksum = "{}"
"#,
            checksum
        )
    }

    #[test]
    fn test_parse_and_validate_clean() {
        let content = minimal("sha256:b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9");
        let formula = parse_formula(&content).unwrap();
        assert!(validate_formula(&formula).is_empty());
    }

    #[test]
    fn test_validate_flags_bad_checksum() {
        let formula = parse_formula(&minimal("sha256:tooshort")).unwrap();
        let warnings = validate_formula(&formula);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("source.checksum"));
    }

    #[test]
    fn test_validate_flags_bad_pattern() {
        let content = format!(
            "{}\n[[build.patches]]\nfile = \"x\"\npattern = \"(unclosed\"\nreplace = \"y\"\n",
            minimal("sha1:2aae6c35c94fcfb415dbe95f408b9ce91ee846ed")
        );
        let formula = parse_formula(&content).unwrap();
        let warnings = validate_formula(&formula);
        assert!(warnings.iter().any(|w| w.contains("bad pattern")));
    }

    #[test]
    fn test_validate_flags_non_idempotent_rule() {
        // Appending to a line that still matches the pattern, without a guard
        let content = format!(
            "{}\n[[install.patches]]\nfile = \"ctl\"\npattern = 'Z'\nreplace = 'ZZ'\n",
            minimal("sha1:2aae6c35c94fcfb415dbe95f408b9ce91ee846ed")
        );
        let formula = parse_formula(&content).unwrap();
        let warnings = validate_formula(&formula);
        assert!(warnings.iter().any(|w| w.contains("not idempotent")));
    }

    #[test]
    fn test_parse_rejects_unknown_option_name() {
        let content = format!(
            "{}\n[build]\noptions = [\"with-frobnication\"]\n",
            minimal("sha1:2aae6c35c94fcfb415dbe95f408b9ce91ee846ed")
        );
        // Formula declarations are strict; only user-supplied selections are lossy
        assert!(parse_formula(&content).is_err());
    }

    #[test]
    fn test_parse_file_missing() {
        let err = parse_formula_file(Path::new("/nonexistent/formula.toml")).unwrap_err();
        assert!(matches!(err, crate::error::Error::Io(_)));
    }
}
