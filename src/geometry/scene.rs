use crate::color::{ColorScale, Rgb};
use crate::geometry::layout::{
    self, Point, CENTER_ANCHOR, CENTER_RADIUS, DIMENSION_LETTER_ANCHORS, DIMENSION_SCORE_ANCHORS,
    GROUP_OUTLINES, PRINCIPLE_LABEL_ANCHORS, PRINCIPLE_POLYGONS, WEDGE_INNER_RADIUS,
    WEDGE_OUTER_RADIUS, WEDGE_ORDER,
};
use crate::scoring::ScoreCalculator;
use crate::types::principle::{DimensionId, PrincipleId};
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    Total,
    DimensionScore,
    DimensionLetter,
    PrincipleNumber,
}

/// One draw primitive. Renderers paint ops in order, so later ops sit on top.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Annular sector between two radii, angles in degrees counter-clockwise
    /// from the positive x axis.
    Wedge {
        dimension: DimensionId,
        inner_radius: f64,
        outer_radius: f64,
        start_angle: f64,
        end_angle: f64,
        fill: Rgb,
    },
    /// Closed polygon. Outlines carry no fill.
    Polygon {
        principle: Option<PrincipleId>,
        points: Vec<Point>,
        fill: Option<Rgb>,
    },
    Disk {
        center: Point,
        radius: f64,
        fill: Rgb,
    },
    Text {
        role: TextRole,
        position: Point,
        content: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneGraph {
    pub ops: Vec<DrawOp>,
    /// Half-width of the square viewport in data units.
    pub extent: f64,
}

impl SceneGraph {
    pub fn texts(&self) -> impl Iterator<Item = (TextRole, &str)> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { role, content, .. } => Some((*role, content.as_str())),
            _ => None,
        })
    }
}

/// Build the radar chart. Missing principle colours count as 0 and missing
/// dimension entries fall back to the start of the scale and a 0.00 score.
///
/// Draw order: wedges, principle polygons, group outlines, centre disk, text.
pub fn build_scene(
    principle_colors: &BTreeMap<PrincipleId, f64>,
    dimension_colors: &BTreeMap<DimensionId, Rgb>,
    center_color: Rgb,
    total_score: f64,
    dimension_scores: &BTreeMap<DimensionId, f64>,
    scale: &ColorScale,
) -> SceneGraph {
    let mut ops = Vec::with_capacity(8 + 27 + 6 + 1 + 1 + 8 + 8 + 27);

    for (slot, dimension) in WEDGE_ORDER.iter().enumerate() {
        let (start_angle, end_angle) = layout::wedge_angles(slot);
        ops.push(DrawOp::Wedge {
            dimension: *dimension,
            inner_radius: WEDGE_INNER_RADIUS,
            outer_radius: WEDGE_OUTER_RADIUS,
            start_angle,
            end_angle,
            fill: dimension_colors
                .get(dimension)
                .copied()
                .unwrap_or_else(|| scale.start()),
        });
    }

    for id in PrincipleId::all() {
        let value = principle_colors.get(&id).copied().unwrap_or(0.0);
        ops.push(DrawOp::Polygon {
            principle: Some(id),
            points: PRINCIPLE_POLYGONS[id.index()].to_vec(),
            fill: Some(scale.map_value(value)),
        });
    }

    for (_, outline) in GROUP_OUTLINES.iter() {
        ops.push(DrawOp::Polygon {
            principle: None,
            points: outline.to_vec(),
            fill: None,
        });
    }

    ops.push(DrawOp::Disk {
        center: CENTER_ANCHOR,
        radius: CENTER_RADIUS,
        fill: center_color,
    });

    ops.push(DrawOp::Text {
        role: TextRole::Total,
        position: CENTER_ANCHOR,
        content: format!("{total_score:.2}"),
    });
    for (dimension, position) in DIMENSION_SCORE_ANCHORS.iter() {
        let score = dimension_scores.get(dimension).copied().unwrap_or(0.0);
        ops.push(DrawOp::Text {
            role: TextRole::DimensionScore,
            position: *position,
            content: format!("{score:.2}"),
        });
    }
    for (dimension, position) in DIMENSION_LETTER_ANCHORS.iter() {
        ops.push(DrawOp::Text {
            role: TextRole::DimensionLetter,
            position: *position,
            content: dimension.letter().to_string(),
        });
    }
    for id in PrincipleId::all() {
        ops.push(DrawOp::Text {
            role: TextRole::PrincipleNumber,
            position: PRINCIPLE_LABEL_ANCHORS[id.index()],
            content: id.to_string(),
        });
    }

    debug!(ops = ops.len(), total_score, "scene built");
    SceneGraph {
        ops,
        extent: layout::AXIS_LIMIT,
    }
}

/// Scene for the calculator's current state.
pub fn scene_for(calculator: &ScoreCalculator, scale: &ColorScale) -> SceneGraph {
    let card = calculator.score_card();
    let weights = calculator.weights();
    let dimension_scores = card.iter().collect::<BTreeMap<_, _>>();
    let dimension_colors = card
        .iter()
        .map(|(dimension, score)| (dimension, scale.dimension_color(score, weights.get(dimension))))
        .collect::<BTreeMap<_, _>>();
    build_scene(
        &calculator.principle_colors(),
        &dimension_colors,
        scale.total_color(card.total),
        card.total,
        &dimension_scores,
        scale,
    )
}
