// src/patch.rs

//! In-place find/replace patching of source and installed files
//!
//! Rules run in declaration order, at most once per run. A rule whose
//! pattern does not match is silently a no-op, so re-running over an
//! already-patched tree leaves it byte-identical. A missing target file is
//! fatal: after a successful install the files a rule names must exist.

use crate::error::{Error, Result};
use crate::formula::PatchRule;
use crate::platform::HostPlatform;
use regex::Regex;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// What happened to a single rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    /// Pattern matched; file rewritten
    Applied,
    /// Pattern not found; file untouched
    NoMatch,
    /// Host platform did not satisfy the rule's gate
    SkippedGate,
    /// Target already contains the rule's guard literal
    SkippedGuard,
}

/// Apply one rule to the tree rooted at `root`
pub fn apply_rule(
    root: &Path,
    rule: &PatchRule,
    platform: &HostPlatform,
) -> Result<PatchOutcome> {
    if let Some(gate) = rule.when {
        if !gate.matches(platform) {
            debug!("Skipping gated patch rule for {}", rule.file);
            return Ok(PatchOutcome::SkippedGate);
        }
    }

    let target = root.join(&rule.file);
    if !target.exists() {
        return Err(Error::MissingFile(target.display().to_string()));
    }

    let content = fs::read_to_string(&target)?;

    if let Some(guard) = &rule.unless_contains {
        if content.contains(guard.as_str()) {
            debug!("Patch rule for {} already applied", rule.file);
            return Ok(PatchOutcome::SkippedGuard);
        }
    }

    let regex = Regex::new(&rule.pattern)
        .map_err(|e| Error::parse(format!("bad patch pattern for {}: {}", rule.file, e)))?;

    let replaced = regex.replace_all(&content, rule.replace.as_str());
    if replaced == content {
        debug!("Patch pattern not found in {}", rule.file);
        return Ok(PatchOutcome::NoMatch);
    }

    fs::write(&target, replaced.as_bytes())?;
    info!("Patched {}", rule.file);
    Ok(PatchOutcome::Applied)
}

/// Apply rules in declaration order, stopping on the first error
pub fn apply_rules(
    root: &Path,
    rules: &[PatchRule],
    platform: &HostPlatform,
) -> Result<Vec<PatchOutcome>> {
    let mut outcomes = Vec::with_capacity(rules.len());
    for rule in rules {
        outcomes.push(apply_rule(root, rule, platform)?);
    }
    Ok(outcomes)
}
