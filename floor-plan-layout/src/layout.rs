//! Ownership of all mutable layout state.
//!
//! `SceneLayout` is generic over the scene node handle `N` so the render
//! engine can use its entity ids while tests use plain integers.
//!
//! ## Load lifecycle
//!
//! ```text
//! begin_load(id) ──> pending ──complete_load(id)──> insert_placed(..)
//!                       │
//!                    remove(id) / cancel_load(id)
//!                       └──> a late complete_load(id) returns false
//! ```

use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use crate::bounds::{FloorConstraints, OccupiedBounds};
use crate::error::{LayoutError, LayoutResult};
use crate::figure::{FigureId, FigureKind, FigureRecord};
use crate::floor::FloorSpec;
use crate::hit::resolve_figure_root;
use crate::placement::FigurePlacement;

/// A record joined with its scene transform and node.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedFigure<N> {
    pub record: FigureRecord,
    pub kind: FigureKind,
    /// `None` for perforated tiles, which are line groups.
    pub placement: Option<FigurePlacement>,
    pub node: N,
}

impl<N> PlacedFigure<N> {
    pub fn id(&self) -> FigureId {
        self.record.id
    }
}

/// What `remove` hands back so the caller can despawn scene nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct RemovedFigure<N> {
    pub figure: PlacedFigure<N>,
    pub label: Option<N>,
    pub constraints: FloorConstraints,
}

#[derive(Debug, Clone)]
pub struct SceneLayout<N> {
    floor: FloorSpec,
    /// Clickable order.
    placed: Vec<PlacedFigure<N>>,
    labels: HashMap<FigureId, N>,
    pending: HashSet<FigureId>,
    bounds: OccupiedBounds,
    selected: Option<FigureId>,
}

impl<N: Copy + PartialEq> SceneLayout<N> {
    pub fn new(floor: FloorSpec) -> Self {
        Self {
            floor,
            placed: Vec::new(),
            labels: HashMap::new(),
            pending: HashSet::new(),
            bounds: OccupiedBounds::default(),
            selected: None,
        }
    }

    pub fn floor(&self) -> &FloorSpec {
        &self.floor
    }

    /// Mark a figure's asset as loading. Returns `false` if it is already
    /// pending or placed.
    pub fn begin_load(&mut self, id: FigureId) -> bool {
        if self.figure(id).is_some() {
            return false;
        }
        self.pending.insert(id)
    }

    pub fn is_pending(&self, id: FigureId) -> bool {
        self.pending.contains(&id)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Claim a finished load. Returns `false` when the figure is no longer
    /// pending, in which case the result must be discarded.
    pub fn complete_load(&mut self, id: FigureId) -> bool {
        let claimed = self.pending.remove(&id);
        if !claimed {
            debug!("Discarding load result for figure {} (no longer pending)", id);
        }
        claimed
    }

    /// Drop a pending load, e.g. after an asset failed to load.
    pub fn cancel_load(&mut self, id: FigureId) -> bool {
        self.pending.remove(&id)
    }

    /// Add a figure to the clickable list and grow the occupied bounds.
    /// Returns `true` when the bounds (and therefore the constraints) changed.
    pub fn insert_placed(&mut self, figure: PlacedFigure<N>) -> LayoutResult<bool> {
        let id = figure.id();
        if self.figure(id).is_some() {
            return Err(LayoutError::DuplicateFigure(id));
        }
        self.pending.remove(&id);
        let grew = self.bounds.include_record(&figure.record);
        if grew {
            debug!(
                "Occupied bounds grew to {} x {} after figure {}",
                self.bounds.max_x, self.bounds.max_y, id
            );
        }
        self.placed.push(figure);
        Ok(grew)
    }

    /// Associate a label node with a placed figure, returning any label it replaces.
    pub fn attach_label(&mut self, id: FigureId, label: N) -> LayoutResult<Option<N>> {
        if self.figure(id).is_none() {
            return Err(LayoutError::UnknownFigure(id));
        }
        Ok(self.labels.insert(id, label))
    }

    pub fn label(&self, id: FigureId) -> Option<N> {
        self.labels.get(&id).copied()
    }

    pub fn figures(&self) -> &[PlacedFigure<N>] {
        &self.placed
    }

    pub fn figure(&self, id: FigureId) -> Option<&PlacedFigure<N>> {
        self.placed.iter().find(|f| f.id() == id)
    }

    pub fn figure_by_node(&self, node: N) -> Option<&PlacedFigure<N>> {
        self.placed.iter().find(|f| f.node == node)
    }

    pub fn clickable_nodes(&self) -> impl Iterator<Item = N> + '_ {
        self.placed.iter().map(|f| f.node)
    }

    /// Resolve a hit on any node (possibly a nested primitive) to the figure
    /// whose root is an ancestor of it.
    pub fn resolve_click<P>(&self, hit: N, parent_of: P) -> Option<FigureId>
    where
        P: FnMut(N) -> Option<N>,
    {
        let root = resolve_figure_root(hit, parent_of, |n| self.figure_by_node(n).is_some())?;
        self.figure_by_node(root).map(PlacedFigure::id)
    }

    pub fn select(&mut self, id: FigureId) -> LayoutResult<&PlacedFigure<N>> {
        let index = self
            .placed
            .iter()
            .position(|f| f.id() == id)
            .ok_or(LayoutError::UnknownFigure(id))?;
        self.selected = Some(id);
        Ok(&self.placed[index])
    }

    /// Returns the previously selected figure id.
    pub fn clear_selection(&mut self) -> Option<FigureId> {
        self.selected.take()
    }

    pub fn selected(&self) -> Option<&PlacedFigure<N>> {
        self.selected.and_then(|id| self.figure(id))
    }

    /// Remove a placed figure and its label, then re-scan the bounds.
    ///
    /// A figure whose asset is still loading has its load cancelled, but
    /// since it has no scene node yet the call still returns `UnknownFigure`.
    pub fn remove(&mut self, id: FigureId) -> LayoutResult<RemovedFigure<N>> {
        if self.pending.remove(&id) {
            debug!("Cancelled pending load of figure {}", id);
        }
        let index = self
            .placed
            .iter()
            .position(|f| f.id() == id)
            .ok_or(LayoutError::UnknownFigure(id))?;
        let figure = self.placed.remove(index);
        let label = self.labels.remove(&id);
        if self.selected == Some(id) {
            self.selected = None;
        }
        let bounds = self.rescan_bounds();
        info!(
            "Removed figure {} ({}), {} figures remain",
            id,
            figure.kind,
            self.placed.len()
        );
        Ok(RemovedFigure {
            figure,
            label,
            constraints: bounds.constraints(),
        })
    }

    /// Recompute the occupied bounds from the stored records.
    pub fn rescan_bounds(&mut self) -> OccupiedBounds {
        self.bounds = OccupiedBounds::rescan(self.placed.iter().map(|f| &f.record));
        self.bounds
    }

    pub fn bounds(&self) -> OccupiedBounds {
        self.bounds
    }

    pub fn constraints(&self) -> FloorConstraints {
        self.bounds.constraints()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::Rotation;
    use glam::Vec2;

    fn figure(id: FigureId, node: u32, x: f32) -> PlacedFigure<u32> {
        PlacedFigure {
            record: FigureRecord {
                id,
                type_label: format!("F{id}"),
                kind_name: "perforated_tile".into(),
                position: Vec2::new(x, 0.0),
                width: 1.0,
                height: 0.0,
                depth: 1.0,
                rotation: Rotation::default(),
                colour: None,
                rack_id: 0,
            },
            kind: FigureKind::PerforatedTile,
            placement: None,
            node,
        }
    }

    #[test]
    fn late_completion_after_removal_is_discarded() {
        let mut layout = SceneLayout::<u32>::new(FloorSpec::new(10.0, 10.0));
        assert!(layout.begin_load(5));
        assert!(layout.cancel_load(5));
        assert!(!layout.complete_load(5));
    }

    #[test]
    fn duplicate_insert_is_rejected() {
        let mut layout = SceneLayout::new(FloorSpec::new(10.0, 10.0));
        layout.insert_placed(figure(1, 10, 0.0)).unwrap();
        assert_eq!(
            layout.insert_placed(figure(1, 11, 0.0)),
            Err(LayoutError::DuplicateFigure(1))
        );
        assert!(!layout.begin_load(1));
    }

    #[test]
    fn removing_selected_clears_selection() {
        let mut layout = SceneLayout::new(FloorSpec::new(10.0, 10.0));
        layout.insert_placed(figure(1, 10, 0.0)).unwrap();
        layout.select(1).unwrap();
        let removed = layout.remove(1).unwrap();
        assert_eq!(removed.figure.node, 10);
        assert!(layout.selected().is_none());
        assert_eq!(layout.remove(1), Err(LayoutError::UnknownFigure(1)));
    }

    #[test]
    fn label_requires_placed_figure() {
        let mut layout = SceneLayout::<u32>::new(FloorSpec::new(10.0, 10.0));
        assert_eq!(
            layout.attach_label(3, 99),
            Err(LayoutError::UnknownFigure(3))
        );
    }
}
