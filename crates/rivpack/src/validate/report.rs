use std::collections::BTreeMap;
use std::fmt;

use crate::model::LocalId;
use crate::registry;

/// Diagnostic report of one validation run.
///
/// Always produced, whether or not the records were usable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// `(child, parent)` pairs whose parent id matched no record.
    pub missing_parents: Vec<(LocalId, LocalId)>,
    /// Objects excluded from the sorted output: unreachable from any
    /// parentless object, or whose parent was skipped.
    pub dropped: usize,
    /// Injected default properties, per type tag.
    pub defaults_injected: BTreeMap<u16, usize>,
    /// Objects emitted after an object that followed them in the input.
    pub reordered: usize,
    /// Nodes of the first parent cycle found.
    pub cycle: Option<Vec<LocalId>>,
    /// Root containers with zero width and height.
    pub zero_size_roots: Vec<LocalId>,
    /// Objects removed from zero-size roots.
    pub emptied_children: usize,
    /// Trim path objects skipped unconditionally.
    pub known_bad_skipped: usize,
    /// Records dropped because an earlier record had the same local id.
    pub duplicate_ids: usize,
}

impl ValidationReport {
    /// Returns the total number of injected default properties.
    pub fn total_defaults_injected(&self) -> usize {
        self.defaults_injected.values().sum()
    }

    /// Returns true if validation changed nothing about the records.
    pub fn is_clean(&self) -> bool {
        self.reordered == 0 && !self.has_issues()
    }

    /// Returns true if the records needed anything beyond reordering.
    pub fn has_issues(&self) -> bool {
        !self.missing_parents.is_empty()
            || self.dropped > 0
            || !self.defaults_injected.is_empty()
            || self.cycle.is_some()
            || !self.zero_size_roots.is_empty()
            || self.emptied_children > 0
            || self.known_bad_skipped > 0
            || self.duplicate_ids > 0
    }

    /// Adds another report's counters to this one.
    ///
    /// Only the first cycle is kept.
    pub fn merge(&mut self, other: ValidationReport) {
        self.missing_parents.extend(other.missing_parents);
        self.dropped += other.dropped;
        for (tag, count) in other.defaults_injected {
            *self.defaults_injected.entry(tag).or_insert(0) += count;
        }
        self.reordered += other.reordered;
        if self.cycle.is_none() {
            self.cycle = other.cycle;
        }
        self.zero_size_roots.extend(other.zero_size_roots);
        self.emptied_children += other.emptied_children;
        self.known_bad_skipped += other.known_bad_skipped;
        self.duplicate_ids += other.duplicate_ids;
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if !self.missing_parents.is_empty() {
            let pairs: Vec<String> = self
                .missing_parents
                .iter()
                .map(|(child, parent)| format!("{child}->{parent}"))
                .collect();
            parts.push(format!(
                "missing parents: {} ({})",
                self.missing_parents.len(),
                pairs.join(", ")
            ));
        }
        if self.dropped > 0 {
            parts.push(format!("dropped: {}", self.dropped));
        }
        if !self.defaults_injected.is_empty() {
            let per_type: Vec<String> = self
                .defaults_injected
                .iter()
                .map(|(tag, count)| format!("{} {count}", registry::display_name_of(*tag)))
                .collect();
            parts.push(format!(
                "defaults injected: {} ({})",
                self.total_defaults_injected(),
                per_type.join(", ")
            ));
        }
        if self.reordered > 0 {
            parts.push(format!("reordered: {}", self.reordered));
        }
        if let Some(cycle) = &self.cycle {
            let nodes: Vec<String> = cycle.iter().map(|id| id.to_string()).collect();
            parts.push(format!("cycle: [{}]", nodes.join(" -> ")));
        }
        if !self.zero_size_roots.is_empty() {
            parts.push(format!(
                "zero-size roots: {} ({} children removed)",
                self.zero_size_roots.len(),
                self.emptied_children
            ));
        }
        if self.known_bad_skipped > 0 {
            parts.push(format!("trim paths skipped: {}", self.known_bad_skipped));
        }
        if self.duplicate_ids > 0 {
            parts.push(format!("duplicate ids: {}", self.duplicate_ids));
        }

        if parts.is_empty() {
            write!(f, "clean")
        } else {
            write!(f, "{}", parts.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::types;

    #[test]
    fn test_clean_report() {
        let report = ValidationReport::default();
        assert!(report.is_clean());
        assert!(!report.has_issues());
        assert_eq!(report.to_string(), "clean");
    }

    #[test]
    fn test_reordering_alone_is_not_an_issue() {
        let report = ValidationReport {
            reordered: 3,
            ..ValidationReport::default()
        };
        assert!(!report.is_clean());
        assert!(!report.has_issues());
        assert_eq!(report.to_string(), "reordered: 3");
    }

    #[test]
    fn test_merge_keeps_first_cycle() {
        let mut a = ValidationReport {
            dropped: 1,
            cycle: Some(vec![1, 2]),
            ..ValidationReport::default()
        };
        a.defaults_injected.insert(types::FEATHER, 4);
        let mut b = ValidationReport {
            dropped: 2,
            cycle: Some(vec![7]),
            missing_parents: vec![(3, 9)],
            ..ValidationReport::default()
        };
        b.defaults_injected.insert(types::FEATHER, 1);
        a.merge(b);

        assert_eq!(a.dropped, 3);
        assert_eq!(a.cycle, Some(vec![1, 2]));
        assert_eq!(a.missing_parents, vec![(3, 9)]);
        assert_eq!(a.defaults_injected.get(&types::FEATHER), Some(&5));
        assert_eq!(a.total_defaults_injected(), 5);
    }

    #[test]
    fn test_display_lists_nonzero_counters() {
        let report = ValidationReport {
            missing_parents: vec![(5, 42)],
            dropped: 1,
            ..ValidationReport::default()
        };
        assert_eq!(report.to_string(), "missing parents: 1 (5->42); dropped: 1");
    }
}
