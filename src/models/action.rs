//! Maintenance action model.
//!
//! An action is one candidate maintenance operation: resurfacing a road
//! segment (with a spatial extent along the road) or rehabilitating a whole
//! road (no extent). Actions are immutable once loaded into a catalog.

use serde::{Deserialize, Serialize};

/// A spatial extent along the road, in meters from the road origin.
///
/// Extents are half-open for the purposes of overlap: two extents that
/// merely touch at a boundary (`a.end == b.start`) do not overlap.
/// Coverage of a point location is inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    /// Start position (m).
    pub start: f64,
    /// End position (m).
    pub end: f64,
}

impl Extent {
    /// Creates an extent. Callers are expected to pass `start <= end`;
    /// the CSV loader normalizes reversed inputs before constructing one.
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Length of the extent in meters.
    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    /// Whether two extents overlap: `max(starts) < min(ends)`.
    pub fn overlaps(&self, other: &Extent) -> bool {
        self.start.max(other.start) < self.end.min(other.end)
    }

    /// Whether a point location falls within `[start, end]` (inclusive).
    pub fn covers(&self, location: f64) -> bool {
        self.start <= location && location <= self.end
    }
}

/// A candidate maintenance action.
///
/// Two shapes exist:
/// - **Segment resurfacing**: carries an [`Extent`]; benefit comes from the
///   distresses the extent covers.
/// - **Road rehabilitation**: no extent (never overlaps anything by
///   construction); benefit is the intrinsic condition gain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    /// Unique action identifier.
    pub id: String,
    /// Spatial extent for resurfacing segments; `None` for whole roads.
    pub extent: Option<Extent>,
    /// Cost of performing the action.
    pub cost: f64,
    /// Intrinsic condition gain. Zero for segments, whose benefit is
    /// derived from distress coverage instead.
    pub benefit: f64,
}

impl Action {
    /// Creates a resurfacing segment over `[start, end]`.
    pub fn segment(id: impl Into<String>, start: f64, end: f64, cost: f64) -> Self {
        Self {
            id: id.into(),
            extent: Some(Extent::new(start, end)),
            cost,
            benefit: 0.0,
        }
    }

    /// Creates a whole-road rehabilitation action.
    ///
    /// The benefit is the condition gain `new_condition - present_condition`,
    /// floored at zero: an action never regresses condition.
    pub fn road(
        id: impl Into<String>,
        cost: f64,
        present_condition: f64,
        new_condition: f64,
    ) -> Self {
        Self {
            id: id.into(),
            extent: None,
            cost,
            benefit: (new_condition - present_condition).max(0.0),
        }
    }

    /// Whether this action's extent covers a point location.
    ///
    /// Roads without an extent cover nothing.
    pub fn covers(&self, location: f64) -> bool {
        self.extent.is_some_and(|e| e.covers(location))
    }
}
