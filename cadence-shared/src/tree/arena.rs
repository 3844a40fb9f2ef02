/// Task arena: flat id-indexed storage for the todo forest
///
/// Instead of nested owned nodes, the forest is a map of id to node plus
/// explicit parent/children id lists. Traversal never clones subtrees,
/// and cycle-freedom is structural: an arena is only ever built from
/// parent-edge rows or from an already-nested tree, both acyclic by
/// construction.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::todo::{Todo, TodoPriority};

/// A single task inside a [`TaskArena`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskNode {
    pub id: Uuid,
    pub title: String,
    pub notes: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub priority: TodoPriority,
    pub completed: bool,

    /// Parent task, None for roots
    pub parent: Option<Uuid>,

    /// Child ids in display order
    pub children: Vec<Uuid>,
}

/// Nested task representation for the wire
///
/// `progress` is derived (see [`TaskArena::progress`]) and recomputed on
/// every conversion; it is accepted but ignored when a tree is read back
/// into an arena.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskTree {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    pub priority: TodoPriority,
    pub completed: bool,
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub children: Vec<TaskTree>,
}

/// Descendant completion counts, excluding the counted task itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DescendantCounts {
    pub total: u32,
    pub completed: u32,
}

/// Id-indexed todo forest
#[derive(Debug, Clone, Default)]
pub struct TaskArena {
    nodes: HashMap<Uuid, TaskNode>,
    roots: Vec<Uuid>,
}

impl TaskArena {
    /// Builds an arena from flat database rows
    ///
    /// Children appear under their parent in row order. A row whose
    /// parent is not in the slice (untrusted input; cannot happen under
    /// the foreign key) is attached as a root rather than dropped.
    pub fn from_rows(rows: &[Todo]) -> Self {
        let mut arena = TaskArena::default();

        for row in rows {
            arena.nodes.insert(
                row.id,
                TaskNode {
                    id: row.id,
                    title: row.title.clone(),
                    notes: row.notes.clone(),
                    due_date: row.due_date,
                    priority: row.priority,
                    completed: row.completed,
                    parent: row.parent_id,
                    children: Vec::new(),
                },
            );
        }

        for row in rows {
            match row.parent_id {
                Some(parent_id) if arena.nodes.contains_key(&parent_id) => {
                    if let Some(parent) = arena.nodes.get_mut(&parent_id) {
                        parent.children.push(row.id);
                    }
                }
                _ => {
                    if let Some(node) = arena.nodes.get_mut(&row.id) {
                        node.parent = None;
                    }
                    arena.roots.push(row.id);
                }
            }
        }

        arena
    }

    /// Builds an arena from nested trees
    pub fn from_tree(trees: &[TaskTree]) -> Self {
        let mut arena = TaskArena::default();
        for tree in trees {
            let id = arena.insert_tree(tree, None);
            arena.roots.push(id);
        }
        arena
    }

    fn insert_tree(&mut self, tree: &TaskTree, parent: Option<Uuid>) -> Uuid {
        self.nodes.insert(
            tree.id,
            TaskNode {
                id: tree.id,
                title: tree.title.clone(),
                notes: tree.notes.clone(),
                due_date: tree.due_date,
                priority: tree.priority,
                completed: tree.completed,
                parent,
                children: Vec::new(),
            },
        );

        let child_ids: Vec<Uuid> = tree
            .children
            .iter()
            .map(|child| self.insert_tree(child, Some(tree.id)))
            .collect();

        if let Some(node) = self.nodes.get_mut(&tree.id) {
            node.children = child_ids;
        }
        tree.id
    }

    /// Renders the arena back into nested trees, roots in arena order
    pub fn to_tree(&self) -> Vec<TaskTree> {
        self.roots
            .iter()
            .filter_map(|id| self.build_tree(*id))
            .collect()
    }

    fn build_tree(&self, id: Uuid) -> Option<TaskTree> {
        let node = self.nodes.get(&id)?;
        Some(TaskTree {
            id: node.id,
            title: node.title.clone(),
            notes: node.notes.clone(),
            due_date: node.due_date,
            priority: node.priority,
            completed: node.completed,
            progress: self.progress(id),
            children: node
                .children
                .iter()
                .filter_map(|c| self.build_tree(*c))
                .collect(),
        })
    }

    /// Looks up a node by id
    pub fn get(&self, id: Uuid) -> Option<&TaskNode> {
        self.nodes.get(&id)
    }

    /// Root ids in display order
    pub fn roots(&self) -> &[Uuid] {
        &self.roots
    }

    /// Number of tasks in the arena
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Counts all descendants of a task and how many are completed
    ///
    /// The task itself is excluded. Unknown ids count as having no
    /// descendants.
    pub fn count_descendants(&self, id: Uuid) -> DescendantCounts {
        let mut counts = DescendantCounts::default();
        let mut stack: Vec<Uuid> = match self.nodes.get(&id) {
            Some(node) => node.children.clone(),
            None => return counts,
        };

        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.get(&current) {
                counts.total += 1;
                if node.completed {
                    counts.completed += 1;
                }
                stack.extend(node.children.iter().copied());
            }
        }
        counts
    }

    /// Aggregate progress of a task as an integer percentage
    ///
    /// A childless task is 100 when completed and 0 otherwise. A task
    /// with descendants reports `round(100 * completed / total)` over the
    /// descendants only; its own flag does not enter the average.
    pub fn progress(&self, id: Uuid) -> u8 {
        let counts = self.count_descendants(id);
        if counts.total == 0 {
            return match self.nodes.get(&id) {
                Some(node) if node.completed => 100,
                _ => 0,
            };
        }
        ((counts.completed * 100) as f64 / counts.total as f64).round() as u8
    }

    pub(super) fn nodes(&self) -> &HashMap<Uuid, TaskNode> {
        &self.nodes
    }

    pub(super) fn push_node(&mut self, node: TaskNode, as_root: bool) {
        let id = node.id;
        self.nodes.insert(id, node);
        if as_root {
            self.roots.push(id);
        }
    }

    pub(super) fn roots_mut(&mut self) -> &mut Vec<Uuid> {
        &mut self.roots
    }

    pub(super) fn get_mut(&mut self, id: Uuid) -> Option<&mut TaskNode> {
        self.nodes.get_mut(&id)
    }
}
