//! Ordered views over a node's children.

use std::cmp::Ordering;

use diskstat_core::UsageNode;

/// What to order children by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Case-insensitive lexicographic name order.
    Name,
    /// Aggregate size, ties broken by name ascending.
    Size,
}

/// Direction of the ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Borrowed, ordered view over one level of `node.children`.
///
/// The canonical (enumeration-order) children are never mutated, so repeated
/// calls are idempotent and each call starts from the same order. A full-tree
/// render applies this independently at every level.
pub fn sorted_children(node: &UsageNode, key: SortKey, direction: SortDirection) -> Vec<&UsageNode> {
    let mut view: Vec<&UsageNode> = node.children.iter().collect();
    view.sort_by(|a, b| compare(a, b, key, direction));
    view
}

fn compare(a: &UsageNode, b: &UsageNode, key: SortKey, direction: SortDirection) -> Ordering {
    let primary = match key {
        SortKey::Name => fold(&a.name).cmp(&fold(&b.name)),
        SortKey::Size => a.size.cmp(&b.size),
    };
    let primary = match direction {
        SortDirection::Ascending => primary,
        SortDirection::Descending => primary.reverse(),
    };
    // Deterministic regardless of direction: ties fall back to name ascending.
    primary
        .then_with(|| fold(&a.name).cmp(&fold(&b.name)))
        .then_with(|| a.name.cmp(&b.name))
}

fn fold(name: &str) -> String {
    name.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> UsageNode {
        let mut root = UsageNode::new_directory("root", "/r");
        root.children.push(UsageNode::new_file("beta.txt", "/r/beta.txt", 30));
        root.children.push(UsageNode::new_file("Alpha.txt", "/r/Alpha.txt", 10));
        root.children.push(UsageNode::new_file("gamma.txt", "/r/gamma.txt", 30));
        root.size = 70;
        root
    }

    #[test]
    fn test_sort_by_name_is_case_insensitive() {
        let root = tree();
        let view = sorted_children(&root, SortKey::Name, SortDirection::Ascending);
        let names: Vec<&str> = view.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha.txt", "beta.txt", "gamma.txt"]);
    }

    #[test]
    fn test_sort_by_size_breaks_ties_by_name() {
        let root = tree();
        let view = sorted_children(&root, SortKey::Size, SortDirection::Descending);
        let names: Vec<&str> = view.iter().map(|n| n.name.as_str()).collect();
        // beta and gamma share a size; beta wins the tie in both directions.
        assert_eq!(names, vec!["beta.txt", "gamma.txt", "Alpha.txt"]);

        let view = sorted_children(&root, SortKey::Size, SortDirection::Ascending);
        let names: Vec<&str> = view.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha.txt", "beta.txt", "gamma.txt"]);
    }

    #[test]
    fn test_sorting_does_not_mutate_canonical_order() {
        let root = tree();
        let before: Vec<String> = root.children.iter().map(|n| n.name.to_string()).collect();

        let _ = sorted_children(&root, SortKey::Size, SortDirection::Descending);
        let _ = sorted_children(&root, SortKey::Name, SortDirection::Ascending);

        let after: Vec<String> = root.children.iter().map(|n| n.name.to_string()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_sorting_is_idempotent() {
        let root = tree();
        let once: Vec<&str> = sorted_children(&root, SortKey::Name, SortDirection::Descending)
            .iter()
            .map(|n| n.name.as_str())
            .collect();
        let twice: Vec<&str> = sorted_children(&root, SortKey::Name, SortDirection::Descending)
            .iter()
            .map(|n| n.name.as_str())
            .collect();
        assert_eq!(once, twice);
    }
}
