//! Fill reports
//!
//! Each part produces its own immutable [`PartReport`]; the orchestrator
//! folds them into the final [`FillReport`] in deterministic part order.

use serde::Serialize;
use std::collections::BTreeSet;

/// Outcome of processing a single XML part
#[derive(Debug, Clone, Default)]
pub struct PartReport {
    pub found_keys: BTreeSet<String>,
    pub replaced_keys: BTreeSet<String>,
    pub missing_keys: BTreeSet<String>,
    pub replacements_count: usize,
}

impl PartReport {
    pub fn is_empty(&self) -> bool {
        self.found_keys.is_empty()
    }

    /// Fold another part's outcome into this one
    pub fn merge(&mut self, other: PartReport) {
        self.found_keys.extend(other.found_keys);
        self.replaced_keys.extend(other.replaced_keys);
        self.missing_keys.extend(other.missing_keys);
        self.replacements_count += other.replacements_count;
    }
}

/// Aggregate outcome of one fill operation
#[derive(Debug, Clone, Default, Serialize)]
pub struct FillReport {
    /// Relative paths (inside the archive) of parts actually rewritten
    pub processed_parts: Vec<String>,
    /// Placeholder keys found anywhere in the template
    pub found_keys: BTreeSet<String>,
    /// Keys replaced with a supplied value
    pub replaced_keys: BTreeSet<String>,
    /// Keys found but with no value provided
    pub missing_keys: BTreeSet<String>,
    /// Total replacements performed
    pub replacements_count: usize,
}

impl FillReport {
    /// Fold one part's outcome into the aggregate. `part_path` is recorded
    /// only when the part was actually changed on disk.
    pub fn absorb(&mut self, part_path: &str, part: PartReport, changed: bool) {
        if changed {
            self.processed_parts.push(part_path.to_string());
        }
        self.found_keys.extend(part.found_keys);
        self.replaced_keys.extend(part.replaced_keys);
        self.missing_keys.extend(part.missing_keys);
        self.replacements_count += part.replacements_count;
    }

    /// Missing keys in sorted order, for error messages
    pub fn missing_keys_sorted(&self) -> Vec<String> {
        self.missing_keys.iter().cloned().collect()
    }
}
