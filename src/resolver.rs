//! Candidate aggregation and ambiguity resolution
//!
//! Platform-variant units (`foo_linux.go`, `foo_windows.go`) declare the same
//! names verbatim, so the same (old, new) pair gets proposed once per variant.
//! The engine cannot tell such duplicates apart; every pair proposed more than
//! once is dropped outright.

use std::collections::BTreeMap;
use tracing::debug;

use crate::extractors::base::RenameCandidate;

/// Outcome of resolving one pass's proposals
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Unique candidates, most deeply qualified first
    pub accepted: Vec<RenameCandidate>,
    /// Distinct pairs that were proposed more than once
    pub dropped: Vec<RenameCandidate>,
}

/// Keep only pairs proposed exactly once, ordered by qualification depth descending
///
/// Ties are broken by the candidate's own ordering so a run is reproducible.
pub fn resolve<I>(candidates: I) -> Resolution
where
    I: IntoIterator<Item = RenameCandidate>,
{
    let mut multiplicity: BTreeMap<RenameCandidate, usize> = BTreeMap::new();
    for candidate in candidates {
        *multiplicity.entry(candidate).or_insert(0) += 1;
    }

    let mut resolution = Resolution::default();
    for (candidate, count) in multiplicity {
        if count == 1 {
            resolution.accepted.push(candidate);
        } else {
            debug!(
                "Dropping ambiguous candidate {} -> {} (proposed {} times)",
                candidate.old, candidate.new_name, count
            );
            resolution.dropped.push(candidate);
        }
    }

    // Stable sort keeps the map's ordering within one depth
    resolution
        .accepted
        .sort_by(|a, b| b.old.depth().cmp(&a.old.depth()));
    resolution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::base::{QualifiedName, Receiver};

    fn candidate(old: QualifiedName) -> RenameCandidate {
        let new_name = format!("{}_obf", old.name);
        RenameCandidate::new(old, new_name)
    }

    #[test]
    fn test_duplicates_dropped_entirely() {
        let variant = candidate(QualifiedName::top_level("sys", "pageSize"));
        let unique = candidate(QualifiedName::top_level("sys", "Open"));

        let resolution = resolve(vec![variant.clone(), unique.clone(), variant.clone()]);

        assert_eq!(resolution.accepted, vec![unique]);
        assert_eq!(resolution.dropped, vec![variant]);
    }

    #[test]
    fn test_no_pair_survives_with_multiplicity_above_one() {
        let names = ["a", "b", "a", "c", "b", "b", "d"];
        let candidates: Vec<_> = names
            .iter()
            .map(|n| candidate(QualifiedName::top_level("p", *n)))
            .collect();

        let resolution = resolve(candidates);

        let accepted: Vec<_> = resolution.accepted.iter().map(|c| c.old.name.as_str()).collect();
        assert_eq!(accepted, vec!["c", "d"]);
        assert_eq!(resolution.dropped.len(), 2);
    }

    #[test]
    fn test_same_old_name_different_new_names_both_kept() {
        let old = QualifiedName::top_level("p", "x");
        let resolution = resolve(vec![
            RenameCandidate::new(old.clone(), "one"),
            RenameCandidate::new(old, "two"),
        ]);
        assert_eq!(resolution.accepted.len(), 2);
        assert!(resolution.dropped.is_empty());
    }

    #[test]
    fn test_deeper_names_first() {
        let type_name = candidate(QualifiedName::top_level("pkg", "Type"));
        let field = candidate(QualifiedName::member("pkg", "Type", "Field"));
        let method = candidate(QualifiedName::method("pkg", Receiver::new("Type", true), "Do"));

        let resolution = resolve(vec![type_name.clone(), field.clone(), method.clone()]);

        assert_eq!(resolution.accepted.len(), 3);
        assert_eq!(resolution.accepted[2], type_name);
        assert!(resolution.accepted[..2].contains(&field));
        assert!(resolution.accepted[..2].contains(&method));
    }

    #[test]
    fn test_method_locals_precede_their_method() {
        let receiver = Receiver::new("Box", true);
        let method = candidate(QualifiedName::method("shapes", receiver.clone(), "Area"));
        let local = candidate(QualifiedName::method_local("shapes", receiver, "Area", "w"));

        let resolution = resolve(vec![method.clone(), local.clone()]);

        assert_eq!(resolution.accepted, vec![local, method]);
    }

    #[test]
    fn test_order_is_independent_of_input_order() {
        let items = vec![
            candidate(QualifiedName::top_level("pkg", "B")),
            candidate(QualifiedName::local("pkg", "F", "x")),
            candidate(QualifiedName::top_level("pkg", "A")),
            candidate(QualifiedName::member("pkg", "S", "Y")),
        ];
        let mut reversed = items.clone();
        reversed.reverse();

        assert_eq!(resolve(items).accepted, resolve(reversed).accepted);
    }
}
