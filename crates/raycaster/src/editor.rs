//! Pointer input → scene edits.
//!
//! The editor knows nothing about windows or devices. Callers translate their
//! events into `press(button, pos)` / `moved(pos)` and render whatever the
//! scene looks like afterwards. Refused edits come back as
//! `EditOutcome::Rejected` so the caller can warn the user.

use crate::geom::{segment_intersect, Bounds, Point, Polygon};
use crate::scene::{Mode, Scene};

/// Pick radius (in scene units) for selecting a static light.
pub const SELECT_RADIUS: f64 = 10.0;
/// Allowed range of a static light's radius.
pub const RADIUS_RANGE: (f64, f64) = (50.0, 700.0);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
    Primary,
    Secondary,
}

/// What a pointer event did to the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    /// Nothing applicable for this mode/button.
    Ignored,
    /// The edit was applied.
    Applied,
    /// The edit would have produced invalid geometry and was refused.
    Rejected,
    /// A polygon was closed and committed.
    PolygonClosed,
    /// A polygon could not be closed and was discarded.
    PolygonDiscarded,
    /// A static light was added or picked; carries its index.
    Selected(usize),
}

/// Crossing status of the preview edges while drawing.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PreviewHits {
    /// First crossing of `last vertex → cursor` with any committed polygon edge.
    pub edge: Option<Point>,
    /// First crossing of `cursor → first vertex` with an obstacle edge.
    pub closing: Option<Point>,
}

/// Pointer-driven editing state on top of a [`Scene`].
#[derive(Clone, Debug, Default)]
pub struct Editor {
    selected_light: Option<usize>,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the static light the radius control acts on.
    #[inline]
    pub fn selected_light(&self) -> Option<usize> {
        self.selected_light
    }

    /// Switch mode on the scene (cancelling an unfinished polygon when
    /// leaving `DrawObstacles`).
    pub fn set_mode(&mut self, scene: &mut Scene, mode: Mode) {
        scene.set_mode(mode);
    }

    pub fn press(&mut self, scene: &mut Scene, button: Button, pos: Point) -> EditOutcome {
        match (scene.mode(), button) {
            (Mode::DrawObstacles, Button::Primary) => {
                if scene.drawing().is_none() {
                    scene.begin_polygon(pos);
                    EditOutcome::Applied
                } else if scene.add_vertex_to_last_polygon(pos) {
                    EditOutcome::Applied
                } else {
                    EditOutcome::Rejected
                }
            }
            (Mode::DrawObstacles, Button::Secondary) => {
                if scene.drawing().is_none() {
                    EditOutcome::Ignored
                } else if scene.close_polygon() {
                    EditOutcome::PolygonClosed
                } else {
                    EditOutcome::PolygonDiscarded
                }
            }
            (Mode::DynamicLight, _) => move_player(scene, pos),
            (Mode::StaticLights, Button::Primary) => {
                let index = scene.add_light_source(pos, true);
                self.selected_light = Some(index);
                EditOutcome::Selected(index)
            }
            (Mode::StaticLights, Button::Secondary) => match pick_static_light(scene, pos) {
                Some(index) => {
                    self.selected_light = Some(index);
                    EditOutcome::Selected(index)
                }
                None => EditOutcome::Ignored,
            },
        }
    }

    /// Pointer moved. Only the player light follows the cursor.
    pub fn moved(&mut self, scene: &mut Scene, pos: Point) -> EditOutcome {
        match scene.mode() {
            Mode::DynamicLight => move_player(scene, pos),
            _ => EditOutcome::Ignored,
        }
    }

    /// Set the radius of the selected static light, clamped to [`RADIUS_RANGE`].
    pub fn set_selected_radius(&mut self, scene: &mut Scene, radius: f64) -> EditOutcome {
        let Some(index) = self.selected_light else {
            return EditOutcome::Ignored;
        };
        match scene.light(index) {
            Some(l) if l.is_static => {
                let r = radius.clamp(RADIUS_RANGE.0, RADIUS_RANGE.1);
                scene.update_static_light_radius(index, r);
                EditOutcome::Applied
            }
            _ => {
                self.selected_light = None;
                EditOutcome::Ignored
            }
        }
    }

    /// Where the preview edges would cross existing geometry for `cursor`.
    ///
    /// Crossings within `1e-3` of an edge endpoint do not count, so a preview
    /// snapped onto an existing vertex stays clean.
    pub fn preview_hits(&self, scene: &Scene, cursor: Point) -> PreviewHits {
        let Some(drawing) = scene.drawing() else {
            return PreviewHits::default();
        };
        let eps = scene.cast_cfg().eps_parallel;
        let mut hits = PreviewHits::default();
        if let Some(last) = drawing.last() {
            hits.edge = first_crossing(scene.polygons(), last, cursor, eps);
        }
        if drawing.len() >= 2 {
            if let Some(first) = drawing.first() {
                hits.closing = first_crossing(scene.obstacles(), cursor, first, eps);
            }
        }
        hits
    }
}

fn move_player(scene: &mut Scene, pos: Point) -> EditOutcome {
    if scene.update_light_source_position(0, pos) {
        EditOutcome::Applied
    } else {
        EditOutcome::Rejected
    }
}

/// First static light within [`SELECT_RADIUS`] of `pos`, in list order.
fn pick_static_light(scene: &Scene, pos: Point) -> Option<usize> {
    scene
        .lights()
        .iter()
        .position(|l| l.is_static && (l.position - pos).norm() <= SELECT_RADIUS)
}

fn first_crossing(
    polygons: &[Polygon],
    p1: Point,
    p2: Point,
    eps_parallel: f64,
) -> Option<Point> {
    const SNAP: f64 = 1e-3;
    polygons
        .iter()
        .flat_map(|poly| poly.edges())
        .find_map(|(a, b)| {
            segment_intersect(p1, p2, a, b, Bounds::Closed, eps_parallel)
                .filter(|x| (x - a).norm() > SNAP && (x - b).norm() > SNAP)
        })
}
