use crate::layout::{PaneId, Side, SplitDirection};

/// Region of a pane a tab was dropped on. Edge zones are the outer
/// quarter of the pane along each axis; everything inside them is the
/// center.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropZone {
    Left,
    Right,
    Top,
    Bottom,
    Center,
}

/// Classify a drop point given in coordinates normalized to the target
/// pane's bounds (0.0 to 1.0 on each axis). Outside the center box the
/// axis with the larger distance from the midline wins; on a tie the
/// drop counts as top/bottom.
pub fn zone_at(x: f64, y: f64) -> DropZone {
    let dx = (x - 0.5).abs() * 2.0;
    let dy = (y - 0.5).abs() * 2.0;
    if dx < 0.5 && dy < 0.5 {
        return DropZone::Center;
    }
    if dx > dy {
        if x < 0.5 {
            DropZone::Left
        } else {
            DropZone::Right
        }
    } else if y < 0.5 {
        DropZone::Top
    } else {
        DropZone::Bottom
    }
}

/// Split the target pane and seat the dragged tab in the new half.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SplitRequest {
    pub source: PaneId,
    pub tab: usize,
    pub target: PaneId,
    pub direction: SplitDirection,
    pub side: Side,
}

/// Move the dragged tab into the target pane's tab group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveTabRequest {
    pub source: PaneId,
    pub tab: usize,
    pub target: PaneId,
}

/// What a finished drag asks the workspace to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropCommand {
    Split(SplitRequest),
    MoveTab(MoveTabRequest),
}

/// Turn a drop of `source`'s tab onto `target` at normalized position
/// `(x, y)` into a command: edge drops split (left/right edges give a
/// vertical divider, top/bottom a horizontal one, with left/top placing
/// the new pane first), center drops move the tab across.
pub fn resolve_drop(source: PaneId, tab: usize, target: PaneId, x: f64, y: f64) -> DropCommand {
    let split = |direction, side| {
        DropCommand::Split(SplitRequest {
            source,
            tab,
            target,
            direction,
            side,
        })
    };
    match zone_at(x, y) {
        DropZone::Left => split(SplitDirection::Vertical, Side::First),
        DropZone::Right => split(SplitDirection::Vertical, Side::Second),
        DropZone::Top => split(SplitDirection::Horizontal, Side::First),
        DropZone::Bottom => split(SplitDirection::Horizontal, Side::Second),
        DropZone::Center => DropCommand::MoveTab(MoveTabRequest {
            source,
            tab,
            target,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_center() {
        assert_eq!(zone_at(0.5, 0.5), DropZone::Center);
        assert_eq!(zone_at(0.3, 0.6), DropZone::Center);
        assert_eq!(zone_at(0.74, 0.26), DropZone::Center);
    }

    #[test]
    fn test_zone_edges() {
        assert_eq!(zone_at(0.05, 0.5), DropZone::Left);
        assert_eq!(zone_at(0.95, 0.5), DropZone::Right);
        assert_eq!(zone_at(0.5, 0.1), DropZone::Top);
        assert_eq!(zone_at(0.5, 0.9), DropZone::Bottom);
    }

    #[test]
    fn test_zone_dominant_axis_wins() {
        // further from the vertical midline than the horizontal one
        assert_eq!(zone_at(0.1, 0.3), DropZone::Left);
        assert_eq!(zone_at(0.9, 0.7), DropZone::Right);
        // and the other way around
        assert_eq!(zone_at(0.3, 0.1), DropZone::Top);
        assert_eq!(zone_at(0.7, 0.9), DropZone::Bottom);
    }

    #[test]
    fn test_zone_corner_tie_goes_to_top_bottom() {
        assert_eq!(zone_at(0.1, 0.1), DropZone::Top);
        assert_eq!(zone_at(0.9, 0.9), DropZone::Bottom);
    }

    #[test]
    fn test_resolve_drop_right_edge_splits_vertically() {
        let source = PaneId::new_v4();
        let target = PaneId::new_v4();

        let cmd = resolve_drop(source, 0, target, 0.95, 0.5);
        assert_eq!(
            cmd,
            DropCommand::Split(SplitRequest {
                source,
                tab: 0,
                target,
                direction: SplitDirection::Vertical,
                side: Side::Second,
            })
        );
    }

    #[test]
    fn test_resolve_drop_top_edge_places_new_pane_first() {
        let source = PaneId::new_v4();
        let target = PaneId::new_v4();

        let cmd = resolve_drop(source, 2, target, 0.5, 0.05);
        assert_eq!(
            cmd,
            DropCommand::Split(SplitRequest {
                source,
                tab: 2,
                target,
                direction: SplitDirection::Horizontal,
                side: Side::First,
            })
        );
    }

    #[test]
    fn test_resolve_drop_center_moves_tab() {
        let source = PaneId::new_v4();
        let target = PaneId::new_v4();

        let cmd = resolve_drop(source, 1, target, 0.5, 0.5);
        assert_eq!(
            cmd,
            DropCommand::MoveTab(MoveTabRequest {
                source,
                tab: 1,
                target,
            })
        );
    }
}
