/// Todo tree utilities
///
/// The todo forest is held in an arena: a flat map of id to node with
/// explicit parent/children id lists ([`arena::TaskArena`]). Views over
/// the arena live in [`view`]: descendant counts, progress,
/// text/priority/status filtering, and per-sibling-group sorting. The
/// nested [`arena::TaskTree`] shape exists only at the wire boundary.
///
/// # Example
///
/// ```
/// use cadence_shared::tree::{SortKey, TaskArena, TaskFilter};
///
/// # fn example(rows: &[cadence_shared::models::todo::Todo]) {
/// let mut arena = TaskArena::from_rows(rows);
/// arena.sort_by(SortKey::DueAsc);
/// let visible = arena.filtered("report", &TaskFilter::default());
/// let payload = visible.to_tree();
/// # let _ = payload;
/// # }
/// ```

pub mod arena;
pub mod view;

pub use arena::{DescendantCounts, TaskArena, TaskNode, TaskTree};
pub use view::{SortKey, StatusFilter, TaskFilter};
