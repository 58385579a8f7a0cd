use serde::{Deserialize, Serialize};

use crate::error::{Result, WorkspaceError};

pub type PaneId = uuid::Uuid;

/// Smallest share of a split either child can be resized down to.
pub const MIN_RATIO: f64 = 0.05;

/// Orientation of the divider between a split's two children.
///
/// `Vertical` runs the divider vertically, placing the children side by
/// side; left/right edge drops produce it. `Horizontal` stacks the
/// children; top/bottom drops produce it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitDirection {
    Horizontal,
    Vertical,
}

/// Which child of a split a pane occupies or should be placed into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    First,
    Second,
}

/// Screen direction of a focus-movement gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusDirection {
    Left,
    Right,
    Up,
    Down,
}

impl FocusDirection {
    /// The split orientation that separates neighbors along this
    /// direction.
    fn axis(self) -> SplitDirection {
        match self {
            FocusDirection::Left | FocusDirection::Right => SplitDirection::Vertical,
            FocusDirection::Up | FocusDirection::Down => SplitDirection::Horizontal,
        }
    }

    /// The child this direction moves toward.
    fn toward(self) -> Side {
        match self {
            FocusDirection::Left | FocusDirection::Up => Side::First,
            FocusDirection::Right | FocusDirection::Down => Side::Second,
        }
    }
}

enum NeighborResult {
    Found(PaneId),
    NeedFromParent,
}

/// Binary split tree arranging panes spatially. Leaves hold pane ids;
/// internal nodes hold a direction and the fraction of space given to
/// the first child. Geometry stays with the embedding UI; this tree only
/// answers structural questions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum LayoutNode {
    Leaf(PaneId),
    Split {
        direction: SplitDirection,
        ratio: f64,
        first: Box<LayoutNode>,
        second: Box<LayoutNode>,
    },
}

impl LayoutNode {
    /// Replace the `target` leaf with a split holding the old pane and
    /// `new_id`, each getting half the space. `side` picks which child
    /// the new pane becomes, so edge drops on the left or top place it
    /// first.
    pub fn split(
        &mut self,
        target: PaneId,
        direction: SplitDirection,
        side: Side,
        new_id: PaneId,
    ) -> Result<()> {
        if self.split_inner(target, direction, side, new_id) {
            Ok(())
        } else {
            Err(WorkspaceError::PaneNotFound(target))
        }
    }

    fn split_inner(
        &mut self,
        target: PaneId,
        direction: SplitDirection,
        side: Side,
        new_id: PaneId,
    ) -> bool {
        match self {
            LayoutNode::Leaf(id) if *id == target => {
                let (first, second) = match side {
                    Side::Second => (LayoutNode::Leaf(target), LayoutNode::Leaf(new_id)),
                    Side::First => (LayoutNode::Leaf(new_id), LayoutNode::Leaf(target)),
                };
                *self = LayoutNode::Split {
                    direction,
                    ratio: 0.5,
                    first: Box::new(first),
                    second: Box::new(second),
                };
                true
            }
            LayoutNode::Split { first, second, .. } => {
                first.split_inner(target, direction, side, new_id)
                    || second.split_inner(target, direction, side, new_id)
            }
            _ => false,
        }
    }

    /// Remove the `target` leaf, promoting its sibling subtree into the
    /// parent's place. Returns the first leaf of the promoted subtree
    /// for refocusing. The root leaf has no sibling and cannot be merged
    /// out.
    pub fn merge_out(&mut self, target: PaneId) -> Result<PaneId> {
        if let LayoutNode::Leaf(id) = self {
            return Err(if *id == target {
                WorkspaceError::CannotMergeRoot
            } else {
                WorkspaceError::PaneNotFound(target)
            });
        }
        self.merge_out_inner(target)
            .ok_or(WorkspaceError::PaneNotFound(target))
    }

    fn merge_out_inner(&mut self, target: PaneId) -> Option<PaneId> {
        match self {
            LayoutNode::Leaf(_) => None,
            LayoutNode::Split { first, second, .. } => {
                if matches!(first.as_ref(), LayoutNode::Leaf(id) if *id == target) {
                    let sibling = *second.clone();
                    let focus = sibling.first_leaf();
                    *self = sibling;
                    return Some(focus);
                }
                if matches!(second.as_ref(), LayoutNode::Leaf(id) if *id == target) {
                    let sibling = *first.clone();
                    let focus = sibling.first_leaf();
                    *self = sibling;
                    return Some(focus);
                }
                first
                    .merge_out_inner(target)
                    .or_else(|| second.merge_out_inner(target))
            }
        }
    }

    /// Set the ratio of the split whose direct child is the `target`
    /// leaf. The value is the first child's share of the space, clamped
    /// away from degenerate zero-size panes. A single-leaf tree has no
    /// split to adjust and reports the pane as not found.
    pub fn set_ratio(&mut self, target: PaneId, new_ratio: f64) -> Result<()> {
        if self.set_ratio_inner(target, new_ratio) {
            Ok(())
        } else {
            Err(WorkspaceError::PaneNotFound(target))
        }
    }

    fn set_ratio_inner(&mut self, target: PaneId, new_ratio: f64) -> bool {
        match self {
            LayoutNode::Leaf(_) => false,
            LayoutNode::Split {
                ratio,
                first,
                second,
                ..
            } => {
                let is_direct = matches!(first.as_ref(), LayoutNode::Leaf(id) if *id == target)
                    || matches!(second.as_ref(), LayoutNode::Leaf(id) if *id == target);
                if is_direct {
                    *ratio = new_ratio.clamp(MIN_RATIO, 1.0 - MIN_RATIO);
                    return true;
                }
                first.set_ratio_inner(target, new_ratio)
                    || second.set_ratio_inner(target, new_ratio)
            }
        }
    }

    /// Set all split ratios back to 0.5.
    pub fn equalize(&mut self) {
        if let LayoutNode::Split {
            ratio,
            first,
            second,
            ..
        } = self
        {
            *ratio = 0.5;
            first.equalize();
            second.equalize();
        }
    }

    /// Find the pane adjacent to `target` in screen direction `dir`.
    pub fn find_neighbor(&self, target: PaneId, dir: FocusDirection) -> Option<PaneId> {
        self.find_neighbor_inner(target, dir.axis(), dir.toward())
            .and_then(|result| match result {
                NeighborResult::Found(id) => Some(id),
                NeighborResult::NeedFromParent => None,
            })
    }

    fn find_neighbor_inner(
        &self,
        target: PaneId,
        axis: SplitDirection,
        toward: Side,
    ) -> Option<NeighborResult> {
        match self {
            LayoutNode::Leaf(id) => {
                if *id == target {
                    Some(NeighborResult::NeedFromParent)
                } else {
                    None
                }
            }
            LayoutNode::Split {
                direction,
                first,
                second,
                ..
            } => {
                if let Some(result) = first.find_neighbor_inner(target, axis, toward) {
                    match result {
                        NeighborResult::Found(id) => return Some(NeighborResult::Found(id)),
                        NeighborResult::NeedFromParent => {
                            if *direction == axis && toward == Side::Second {
                                // The neighbor is the nearest edge of the
                                // second subtree
                                return Some(NeighborResult::Found(
                                    second.edge_leaf(Side::First),
                                ));
                            }
                            return Some(NeighborResult::NeedFromParent);
                        }
                    }
                }
                if let Some(result) = second.find_neighbor_inner(target, axis, toward) {
                    match result {
                        NeighborResult::Found(id) => return Some(NeighborResult::Found(id)),
                        NeighborResult::NeedFromParent => {
                            if *direction == axis && toward == Side::First {
                                return Some(NeighborResult::Found(
                                    first.edge_leaf(Side::Second),
                                ));
                            }
                            return Some(NeighborResult::NeedFromParent);
                        }
                    }
                }
                None
            }
        }
    }

    /// The leaf at the given edge of this subtree.
    fn edge_leaf(&self, side: Side) -> PaneId {
        match self {
            LayoutNode::Leaf(id) => *id,
            LayoutNode::Split { first, second, .. } => match side {
                Side::First => first.edge_leaf(Side::First),
                Side::Second => second.edge_leaf(Side::Second),
            },
        }
    }

    /// All pane ids in first-to-second traversal order.
    pub fn pane_ids(&self) -> Vec<PaneId> {
        let mut ids = Vec::new();
        self.collect_ids(&mut ids);
        ids
    }

    fn collect_ids(&self, ids: &mut Vec<PaneId>) {
        match self {
            LayoutNode::Leaf(id) => ids.push(*id),
            LayoutNode::Split { first, second, .. } => {
                first.collect_ids(ids);
                second.collect_ids(ids);
            }
        }
    }

    /// Check if this subtree contains the given pane.
    pub fn contains(&self, target: PaneId) -> bool {
        match self {
            LayoutNode::Leaf(id) => *id == target,
            LayoutNode::Split { first, second, .. } => {
                first.contains(target) || second.contains(target)
            }
        }
    }

    /// The first leaf of this subtree.
    pub fn first_leaf(&self) -> PaneId {
        match self {
            LayoutNode::Leaf(id) => *id,
            LayoutNode::Split { first, .. } => first.first_leaf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds `V(0.3)[a, H(0.5)[b, c]]`: `a` fills the left column, `b`
    /// sits top-right, `c` bottom-right.
    fn build_nested() -> (LayoutNode, PaneId, PaneId, PaneId) {
        let a = PaneId::new_v4();
        let b = PaneId::new_v4();
        let c = PaneId::new_v4();
        let node = LayoutNode::Split {
            direction: SplitDirection::Vertical,
            ratio: 0.3,
            first: Box::new(LayoutNode::Leaf(a)),
            second: Box::new(LayoutNode::Split {
                direction: SplitDirection::Horizontal,
                ratio: 0.5,
                first: Box::new(LayoutNode::Leaf(b)),
                second: Box::new(LayoutNode::Leaf(c)),
            }),
        };
        (node, a, b, c)
    }

    fn root_ratio(node: &LayoutNode) -> f64 {
        match node {
            LayoutNode::Split { ratio, .. } => *ratio,
            LayoutNode::Leaf(_) => panic!("expected a split at the root"),
        }
    }

    #[test]
    fn test_split_replaces_leaf() {
        let a = PaneId::new_v4();
        let b = PaneId::new_v4();
        let mut node = LayoutNode::Leaf(a);

        node.split(a, SplitDirection::Vertical, Side::Second, b)
            .unwrap();
        assert_eq!(node.pane_ids(), vec![a, b]);
        match &node {
            LayoutNode::Split {
                direction, ratio, ..
            } => {
                assert_eq!(*direction, SplitDirection::Vertical);
                assert!((ratio - 0.5).abs() < f64::EPSILON);
            }
            LayoutNode::Leaf(_) => panic!("expected a split"),
        }
    }

    #[test]
    fn test_split_side_first_places_new_pane_first() {
        let a = PaneId::new_v4();
        let b = PaneId::new_v4();
        let mut node = LayoutNode::Leaf(a);

        node.split(a, SplitDirection::Horizontal, Side::First, b)
            .unwrap();
        assert_eq!(node.pane_ids(), vec![b, a]);
    }

    #[test]
    fn test_split_in_nested_tree() {
        let (mut node, _a, b, _c) = build_nested();
        let new_id = PaneId::new_v4();

        node.split(b, SplitDirection::Vertical, Side::Second, new_id)
            .unwrap();
        assert_eq!(node.pane_ids().len(), 4);
        assert!(node.contains(new_id));
    }

    #[test]
    fn test_split_unknown_target() {
        let a = PaneId::new_v4();
        let ghost = PaneId::new_v4();
        let new_id = PaneId::new_v4();
        let mut node = LayoutNode::Leaf(a);

        let err = node
            .split(ghost, SplitDirection::Vertical, Side::Second, new_id)
            .unwrap_err();
        assert!(matches!(err, WorkspaceError::PaneNotFound(id) if id == ghost));
        assert_eq!(node, LayoutNode::Leaf(a));
    }

    #[test]
    fn test_split_then_merge_out_restores_tree() {
        let (mut node, _a, b, _c) = build_nested();
        let before = node.clone();
        let new_id = PaneId::new_v4();

        node.split(b, SplitDirection::Vertical, Side::Second, new_id)
            .unwrap();
        let focus = node.merge_out(new_id).unwrap();

        assert_eq!(focus, b);
        assert_eq!(node, before);
    }

    #[test]
    fn test_merge_out_promotes_sibling_subtree() {
        let (mut node, a, b, c) = build_nested();

        let focus = node.merge_out(a).unwrap();
        assert_eq!(focus, b);
        assert_eq!(node.pane_ids(), vec![b, c]);
    }

    #[test]
    fn test_merge_out_root_leaf() {
        let a = PaneId::new_v4();
        let mut node = LayoutNode::Leaf(a);

        assert!(matches!(
            node.merge_out(a),
            Err(WorkspaceError::CannotMergeRoot)
        ));
        assert_eq!(node, LayoutNode::Leaf(a));
    }

    #[test]
    fn test_merge_out_unknown_pane() {
        let (mut node, ..) = build_nested();
        let ghost = PaneId::new_v4();
        let before = node.clone();

        assert!(matches!(
            node.merge_out(ghost),
            Err(WorkspaceError::PaneNotFound(id)) if id == ghost
        ));
        assert_eq!(node, before);
    }

    #[test]
    fn test_set_ratio_clamps_to_bounds() {
        let (mut node, a, _b, _c) = build_nested();

        node.set_ratio(a, 0.01).unwrap();
        assert!((root_ratio(&node) - MIN_RATIO).abs() < f64::EPSILON);

        node.set_ratio(a, 0.99).unwrap();
        assert!((root_ratio(&node) - (1.0 - MIN_RATIO)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_set_ratio_targets_direct_parent_split() {
        let (mut node, _a, b, _c) = build_nested();

        node.set_ratio(b, 0.7).unwrap();
        match &node {
            LayoutNode::Split { ratio, second, .. } => {
                // outer split untouched, inner adjusted
                assert!((ratio - 0.3).abs() < f64::EPSILON);
                match second.as_ref() {
                    LayoutNode::Split { ratio, .. } => {
                        assert!((ratio - 0.7).abs() < f64::EPSILON)
                    }
                    LayoutNode::Leaf(_) => panic!("expected inner split"),
                }
            }
            LayoutNode::Leaf(_) => panic!("expected a split"),
        }
    }

    #[test]
    fn test_set_ratio_on_single_leaf() {
        let a = PaneId::new_v4();
        let mut node = LayoutNode::Leaf(a);
        assert!(matches!(
            node.set_ratio(a, 0.5),
            Err(WorkspaceError::PaneNotFound(_))
        ));
    }

    #[test]
    fn test_equalize_resets_nested_ratios() {
        fn check_ratios(node: &LayoutNode) {
            if let LayoutNode::Split {
                ratio,
                first,
                second,
                ..
            } = node
            {
                assert!((ratio - 0.5).abs() < f64::EPSILON);
                check_ratios(first);
                check_ratios(second);
            }
        }

        let (mut node, a, _b, _c) = build_nested();
        node.set_ratio(a, 0.9).unwrap();

        node.equalize();
        check_ratios(&node);
    }

    #[test]
    fn test_find_neighbor_across_root_split() {
        let (node, a, b, _c) = build_nested();
        assert_eq!(node.find_neighbor(a, FocusDirection::Right), Some(b));
        assert_eq!(node.find_neighbor(b, FocusDirection::Left), Some(a));
    }

    #[test]
    fn test_find_neighbor_in_inner_split() {
        let (node, _a, b, c) = build_nested();
        assert_eq!(node.find_neighbor(b, FocusDirection::Down), Some(c));
        assert_eq!(node.find_neighbor(c, FocusDirection::Up), Some(b));
    }

    #[test]
    fn test_find_neighbor_from_nested_pane_crosses_levels() {
        let (node, a, _b, c) = build_nested();
        assert_eq!(node.find_neighbor(c, FocusDirection::Left), Some(a));
    }

    #[test]
    fn test_find_neighbor_none_at_workspace_edge() {
        let (node, a, b, _c) = build_nested();
        assert_eq!(node.find_neighbor(a, FocusDirection::Left), None);
        assert_eq!(node.find_neighbor(a, FocusDirection::Up), None);
        assert_eq!(node.find_neighbor(b, FocusDirection::Up), None);
    }

    #[test]
    fn test_pane_ids_traversal_order() {
        let (node, a, b, c) = build_nested();
        assert_eq!(node.pane_ids(), vec![a, b, c]);
    }

    #[test]
    fn test_contains() {
        let (node, a, _b, _c) = build_nested();
        assert!(node.contains(a));
        assert!(!node.contains(PaneId::new_v4()));
    }

    #[test]
    fn test_first_leaf() {
        let (node, a, _b, _c) = build_nested();
        assert_eq!(node.first_leaf(), a);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let (node, ..) = build_nested();
        let json = serde_json::to_string(&node).unwrap();
        let back: LayoutNode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, node);
    }
}
