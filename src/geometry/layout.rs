//! Fixed chart geometry in data units. The chart is centred on the origin and
//! every renderer draws from these tables.

use crate::types::principle::{DimensionId, PRINCIPLE_COUNT};

pub type Point = (f64, f64);

/// Half-width of the visible square.
pub const AXIS_LIMIT: f64 = 10.1;

pub const WEDGE_INNER_RADIUS: f64 = 2.0;
pub const WEDGE_OUTER_RADIUS: f64 = 5.0;
pub const CENTER_RADIUS: f64 = 2.0;

/// Dimension drawn in each 45° wedge, counter-clockwise from 22.5°.
pub const WEDGE_ORDER: [DimensionId; 8] = [
    DimensionId::SP,
    DimensionId::SC,
    DimensionId::Waste,
    DimensionId::Reagent,
    DimensionId::Operator,
    DimensionId::Method,
    DimensionId::Economy,
    DimensionId::AT,
];

/// Start and end angle in degrees of wedge `slot`.
pub fn wedge_angles(slot: usize) -> (f64, f64) {
    let start = 22.5 + 45.0 * slot as f64;
    (start, start + 45.0)
}

/// Principle polygons, indexed by principle number - 1. Vertices run around
/// each perimeter.
pub const PRINCIPLE_POLYGONS: [[Point; 4]; PRINCIPLE_COUNT] = [
    [(-2.7, 7.0), (-0.7, 7.0), (-0.7, 10.0), (-3.7, 10.0)],
    [(-0.7, 7.0), (0.7, 7.0), (0.7, 10.0), (-0.7, 10.0)],
    [(0.7, 7.0), (2.1, 7.0), (2.1, 10.0), (0.7, 10.0)],
    [(2.1, 7.0), (2.7, 7.0), (3.7, 10.0), (2.1, 10.0)],
    [(3.2, 6.8), (3.8, 6.2), (5.8, 8.2), (4.2, 9.8)],
    [(3.8, 6.2), (4.3, 5.7), (6.3, 7.7), (5.8, 8.2)],
    [(4.3, 5.7), (5.3, 4.7), (7.3, 6.7), (6.3, 7.7)],
    [(5.3, 4.7), (6.3, 3.7), (8.3, 5.7), (7.3, 6.7)],
    [(6.3, 3.7), (6.8, 3.2), (8.8, 5.2), (8.3, 5.7)],
    // triangle; the last vertex repeats the first
    [(6.8, 3.2), (9.8, 4.2), (8.8, 5.2), (6.8, 3.2)],
    [(7.0, 2.7), (10.0, 3.7), (10.0, 1.8), (7.0, 1.8)],
    [(7.0, 1.8), (10.0, 1.8), (10.0, 1.2), (7.0, 1.2)],
    [(7.0, 1.2), (10.0, 1.2), (10.0, 0.0), (7.0, 0.0)],
    [(7.0, 0.0), (10.0, 0.0), (10.0, -1.2), (7.0, -1.2)],
    [(7.0, -1.2), (10.0, -1.2), (10.0, -1.8), (7.0, -1.8)],
    [(7.0, -1.8), (10.0, -1.8), (10.0, -3.7), (7.0, -2.7)],
    [(3.2, -6.8), (4.2, -9.8), (9.8, -4.2), (6.8, -3.2)],
    [(0.0, -7.0), (0.0, -10.0), (3.7, -10.0), (2.7, -7.0)],
    [(0.0, -7.0), (0.0, -10.0), (-3.7, -10.0), (-2.7, -7.0)],
    [(-3.2, -6.8), (-6.8, -3.2), (-9.8, -4.2), (-4.2, -9.8)],
    [(-7.0, -1.6), (-10.0, -1.6), (-10.0, -3.7), (-7.0, -2.7)],
    [(-7.0, -0.8), (-10.0, -0.8), (-10.0, -1.6), (-7.0, -1.6)],
    [(-7.0, 0.0), (-10.0, 0.0), (-10.0, -0.8), (-7.0, -0.8)],
    [(-7.0, 1.6), (-10.0, 1.6), (-10.0, 0.0), (-7.0, 0.0)],
    [(-7.0, 2.7), (-10.0, 3.7), (-10.0, 1.6), (-7.0, 1.6)],
    [(-5.0, 5.0), (-6.8, 3.2), (-9.8, 4.2), (-7.0, 7.0)],
    [(-3.2, 6.8), (-5.0, 5.0), (-7.0, 7.0), (-4.2, 9.8)],
];

/// Unfilled frames around the multi-principle groups. Economy and Operator
/// hold a single principle each and get no frame.
pub const GROUP_OUTLINES: [(DimensionId, [Point; 4]); 6] = [
    (
        DimensionId::SC,
        [(-2.7, 7.0), (-3.7, 10.0), (3.7, 10.0), (2.7, 7.0)],
    ),
    (
        DimensionId::SP,
        [(3.2, 6.8), (4.2, 9.8), (9.8, 4.2), (6.8, 3.2)],
    ),
    (
        DimensionId::AT,
        [(7.0, -2.7), (10.0, -3.7), (10.0, 3.7), (7.0, 2.7)],
    ),
    (
        DimensionId::Method,
        [(-2.7, -7.0), (-3.7, -10.0), (3.7, -10.0), (2.7, -7.0)],
    ),
    (
        DimensionId::Waste,
        [(-3.2, 6.8), (-4.2, 9.8), (-9.8, 4.2), (-6.8, 3.2)],
    ),
    (
        DimensionId::Reagent,
        [(-7.0, -2.7), (-10.0, -3.7), (-10.0, 3.7), (-7.0, 2.7)],
    ),
];

/// Where each principle number is written, indexed by number - 1.
pub const PRINCIPLE_LABEL_ANCHORS: [Point; PRINCIPLE_COUNT] = [
    (-2.0, 8.5),
    (0.0, 8.5),
    (1.4, 8.5),
    (2.7, 8.5),
    (4.5, 7.8),
    (5.1, 7.0),
    (5.8, 6.2),
    (6.8, 5.2),
    (7.6, 4.5),
    (8.3, 4.0),
    (8.5, 2.5),
    (8.5, 1.4),
    (8.5, 0.4),
    (8.5, -0.8),
    (8.5, -1.6),
    (8.5, -2.5),
    (6.1, -5.9),
    (1.5, -8.5),
    (-1.5, -8.5),
    (-6.1, -5.9),
    (-8.5, -2.2),
    (-8.5, -1.3),
    (-8.5, -0.5),
    (-8.5, 0.8),
    (-8.5, 2.2),
    (-7.0, 5.0),
    (-5.0, 7.0),
];

/// Single-letter dimension labels on the outer part of each wedge.
pub const DIMENSION_LETTER_ANCHORS: [(DimensionId, Point); 8] = [
    (DimensionId::SC, (0.0, 6.0)),
    (DimensionId::SP, (4.2, 4.3)),
    (DimensionId::AT, (6.0, 0.0)),
    (DimensionId::Economy, (4.2, -4.3)),
    (DimensionId::Method, (0.0, -6.0)),
    (DimensionId::Operator, (-4.2, -4.3)),
    (DimensionId::Reagent, (-6.0, 0.0)),
    (DimensionId::Waste, (-4.2, 4.3)),
];

/// Weighted dimension scores, inside each wedge.
pub const DIMENSION_SCORE_ANCHORS: [(DimensionId, Point); 8] = [
    (DimensionId::SC, (0.0, 3.5)),
    (DimensionId::SP, (2.7, 2.6)),
    (DimensionId::AT, (3.5, 0.0)),
    (DimensionId::Economy, (2.7, -2.6)),
    (DimensionId::Method, (0.0, -3.5)),
    (DimensionId::Operator, (-2.7, -2.6)),
    (DimensionId::Reagent, (-3.5, 0.0)),
    (DimensionId::Waste, (-2.7, 2.6)),
];

pub const CENTER_ANCHOR: Point = (0.0, 0.0);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn angle_of(point: Point) -> f64 {
        point.1.atan2(point.0).to_degrees().rem_euclid(360.0)
    }

    #[test]
    fn wedges_cover_the_full_circle_once() {
        let (first, _) = wedge_angles(0);
        let (_, last) = wedge_angles(7);
        assert_eq!(first, 22.5);
        assert_eq!(last - first, 360.0);
        let unique = WEDGE_ORDER.iter().collect::<BTreeSet<_>>();
        assert_eq!(unique.len(), 8);
    }

    #[test]
    fn score_anchor_sits_inside_its_wedge() {
        for (slot, dimension) in WEDGE_ORDER.iter().enumerate() {
            let (_, anchor) = DIMENSION_SCORE_ANCHORS
                .iter()
                .find(|(candidate, _)| candidate == dimension)
                .copied()
                .expect("every dimension has a score anchor");
            let (start, end) = wedge_angles(slot);
            let mut angle = angle_of(anchor);
            if angle < start {
                angle += 360.0;
            }
            assert!(
                (start..end).contains(&angle),
                "{dimension} anchor at {angle}° outside {start}..{end}"
            );
            let radius = anchor.0.hypot(anchor.1);
            assert!(radius > WEDGE_INNER_RADIUS && radius < WEDGE_OUTER_RADIUS);
        }
    }

    #[test]
    fn principle_shapes_stay_inside_axis_limit_and_outside_wedges() {
        for polygon in PRINCIPLE_POLYGONS.iter().chain(GROUP_OUTLINES.iter().map(|(_, p)| p)) {
            for &(x, y) in polygon {
                assert!(x.abs() <= AXIS_LIMIT && y.abs() <= AXIS_LIMIT);
                assert!(x.hypot(y) > WEDGE_OUTER_RADIUS);
            }
        }
    }

    #[test]
    fn label_anchors_match_their_group_frame_side() {
        // principles 11-16 sit on the right, 21-25 on the left
        for number in 11..=16 {
            assert!(PRINCIPLE_LABEL_ANCHORS[number - 1].0 > 7.0);
        }
        for number in 21..=25 {
            assert!(PRINCIPLE_LABEL_ANCHORS[number - 1].0 < -7.0);
        }
    }

    #[test]
    fn outlines_skip_single_principle_dimensions() {
        let framed = GROUP_OUTLINES
            .iter()
            .map(|(dimension, _)| *dimension)
            .collect::<BTreeSet<_>>();
        assert!(!framed.contains(&DimensionId::Economy));
        assert!(!framed.contains(&DimensionId::Operator));
        assert_eq!(framed.len(), 6);
    }
}
