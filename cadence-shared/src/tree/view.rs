/// Filtered and sorted views over a [`TaskArena`]
///
/// Filtering keeps a task when it matches the predicate or any descendant
/// does; a kept task's children are its own filtered children, so a
/// matching grandchild surfaces its ancestors without pulling in
/// unrelated siblings. Sorting applies one comparator locally to every
/// sibling group, roots included.

use std::cmp::Ordering;
use uuid::Uuid;

use super::arena::{TaskArena, TaskNode};
use crate::models::todo::TodoPriority;

/// Completion-status predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Open,
    Done,
}

/// Structured filter applied alongside the text query
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskFilter {
    /// Keep only tasks with this priority, None keeps all
    pub priority: Option<TodoPriority>,

    /// Keep only open or done tasks
    pub status: StatusFilter,
}

/// Sibling-group sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Lexicographic by title
    Title,

    /// High before medium before low
    Priority,

    /// Due date ascending, missing due dates last
    DueAsc,

    /// Due date descending, missing due dates still last
    DueDesc,
}

fn matches(node: &TaskNode, query: &str, filter: &TaskFilter) -> bool {
    let matches_query = if query.is_empty() {
        true
    } else {
        let text = format!(
            "{} {}",
            node.title,
            node.notes.as_deref().unwrap_or_default()
        )
        .to_lowercase();
        text.contains(query)
    };

    let matches_priority = filter.priority.map_or(true, |p| node.priority == p);
    let matches_status = match filter.status {
        StatusFilter::All => true,
        StatusFilter::Open => !node.completed,
        StatusFilter::Done => node.completed,
    };

    matches_query && matches_priority && matches_status
}

fn compare(a: &TaskNode, b: &TaskNode, key: SortKey) -> Ordering {
    match key {
        SortKey::Title => a.title.cmp(&b.title),
        SortKey::Priority => a.priority.cmp(&b.priority),
        SortKey::DueAsc => match (a.due_date, b.due_date) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        SortKey::DueDesc => match (a.due_date, b.due_date) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    }
}

impl TaskArena {
    /// Returns a new arena containing only the matching branches
    ///
    /// A task survives when it matches the case-insensitive text query
    /// (substring over `title + " " + notes`) and the structured filter,
    /// OR when at least one descendant survives. Surviving tasks keep
    /// only their surviving children.
    pub fn filtered(&self, query: &str, filter: &TaskFilter) -> TaskArena {
        let query = query.trim().to_lowercase();
        let mut result = TaskArena::default();
        for root in self.roots().to_vec() {
            self.filter_into(root, None, &query, filter, &mut result);
        }
        result
    }

    /// Depth-first copy of the surviving branch rooted at `id`
    ///
    /// Children are visited first; a node is inserted into `out` only
    /// when kept, so an unkept node never leaves stray descendants behind
    /// (a kept descendant forces its whole ancestor chain to be kept).
    fn filter_into(
        &self,
        id: Uuid,
        parent: Option<Uuid>,
        query: &str,
        filter: &TaskFilter,
        out: &mut TaskArena,
    ) -> bool {
        let Some(node) = self.get(id) else {
            return false;
        };

        let mut kept_children = Vec::new();
        for child in &node.children {
            if self.filter_into(*child, Some(id), query, filter, out) {
                kept_children.push(*child);
            }
        }

        let keep = matches(node, query, filter) || !kept_children.is_empty();
        if keep {
            let copy = TaskNode {
                children: kept_children,
                parent,
                ..node.clone()
            };
            out.push_node(copy, parent.is_none());
        }
        keep
    }

    /// Sorts every sibling group (roots included) by `key`
    ///
    /// The ordering is local: the comparator is applied independently to
    /// the roots and to each task's children list.
    pub fn sort_by(&mut self, key: SortKey) {
        let mut roots = self.roots().to_vec();
        self.sort_ids(&mut roots, key);
        *self.roots_mut() = roots;

        let ids: Vec<Uuid> = self.nodes().keys().copied().collect();
        for id in ids {
            let Some(node) = self.get(id) else { continue };
            let mut children = node.children.clone();
            self.sort_ids(&mut children, key);
            if let Some(node) = self.get_mut(id) {
                node.children = children;
            }
        }
    }

    fn sort_ids(&self, ids: &mut [Uuid], key: SortKey) {
        ids.sort_by(|a, b| match (self.get(*a), self.get(*b)) {
            (Some(a), Some(b)) => compare(a, b, key),
            _ => Ordering::Equal,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::arena::TaskTree;
    use crate::tree::testing::{leaf, tree, with_due, with_notes, with_priority};

    fn titles(trees: &[TaskTree]) -> Vec<String> {
        trees.iter().map(|t| t.title.clone()).collect()
    }

    #[test]
    fn test_filter_matches_title_substring_case_insensitive() {
        let arena = TaskArena::from_tree(&[leaf("Buy Groceries", false), leaf("Ship code", false)]);
        let filtered = arena.filtered("GROCER", &TaskFilter::default());
        assert_eq!(titles(&filtered.to_tree()), vec!["Buy Groceries"]);
    }

    #[test]
    fn test_filter_matches_notes() {
        let arena = TaskArena::from_tree(&[
            with_notes(leaf("Errand", false), "pick up the dry cleaning"),
            leaf("Other", false),
        ]);
        let filtered = arena.filtered("dry cleaning", &TaskFilter::default());
        assert_eq!(titles(&filtered.to_tree()), vec!["Errand"]);
    }

    #[test]
    fn test_filter_deep_match_keeps_ancestors_drops_siblings() {
        // Grandchild matches; parent and grandparent do not; an unrelated
        // sibling branch must disappear.
        let forest = vec![
            tree(
                "grandparent",
                false,
                vec![
                    tree("parent", false, vec![leaf("needle task", false)]),
                    leaf("unrelated sibling", false),
                ],
            ),
            leaf("other root", false),
        ];
        let arena = TaskArena::from_tree(&forest);
        let filtered = arena.filtered("needle", &TaskFilter::default()).to_tree();

        assert_eq!(titles(&filtered), vec!["grandparent"]);
        assert_eq!(filtered[0].children.len(), 1);
        assert_eq!(filtered[0].children[0].title, "parent");
        assert_eq!(filtered[0].children[0].children[0].title, "needle task");
    }

    #[test]
    fn test_filter_by_status_and_priority() {
        let arena = TaskArena::from_tree(&[
            with_priority(leaf("urgent open", false), TodoPriority::High),
            with_priority(leaf("urgent done", true), TodoPriority::High),
            leaf("calm open", false),
        ]);

        let open_high = arena.filtered(
            "",
            &TaskFilter {
                priority: Some(TodoPriority::High),
                status: StatusFilter::Open,
            },
        );
        assert_eq!(titles(&open_high.to_tree()), vec!["urgent open"]);

        let done = arena.filtered(
            "",
            &TaskFilter {
                priority: None,
                status: StatusFilter::Done,
            },
        );
        assert_eq!(titles(&done.to_tree()), vec!["urgent done"]);
    }

    #[test]
    fn test_filter_empty_query_keeps_everything() {
        let arena = TaskArena::from_tree(&[leaf("a", false), leaf("b", true)]);
        let filtered = arena.filtered("   ", &TaskFilter::default());
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_sort_by_title_recurses_into_children() {
        let forest = vec![
            tree("beta", false, vec![leaf("z", false), leaf("a", false)]),
            leaf("alpha", false),
        ];
        let mut arena = TaskArena::from_tree(&forest);
        arena.sort_by(SortKey::Title);

        let sorted = arena.to_tree();
        assert_eq!(titles(&sorted), vec!["alpha", "beta"]);
        assert_eq!(titles(&sorted[1].children), vec!["a", "z"]);
    }

    #[test]
    fn test_sort_by_priority() {
        let mut arena = TaskArena::from_tree(&[
            with_priority(leaf("low", false), TodoPriority::Low),
            with_priority(leaf("high", false), TodoPriority::High),
            with_priority(leaf("medium", false), TodoPriority::Medium),
        ]);
        arena.sort_by(SortKey::Priority);
        assert_eq!(titles(&arena.to_tree()), vec!["high", "medium", "low"]);
    }

    #[test]
    fn test_sort_due_missing_dates_last_both_directions() {
        let build = || {
            TaskArena::from_tree(&[
                leaf("undated", false),
                with_due(leaf("jan", false), "2024-01-15"),
                with_due(leaf("mar", false), "2024-03-15"),
            ])
        };

        let mut asc = build();
        asc.sort_by(SortKey::DueAsc);
        assert_eq!(titles(&asc.to_tree()), vec!["jan", "mar", "undated"]);

        let mut desc = build();
        desc.sort_by(SortKey::DueDesc);
        assert_eq!(titles(&desc.to_tree()), vec!["mar", "jan", "undated"]);
    }
}
