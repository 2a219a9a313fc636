use std::f64::consts::TAU;

use slotmap::SlotMap;
use tracing::{debug, info, warn};

use crate::error::{ControlError, MarkerError, Result};
use crate::geometry::{Direction, PathGeometry};

use super::{Marker, MarkerSnapshot};

slotmap::new_key_type! {
    /// Stable identifier for a marker in a [`MarkerSet`].
    pub struct MarkerId;
}

/// Ordered collection of markers tracing the same path.
///
/// Markers live in an arena and are referenced by [`MarkerId`]; a separate
/// list keeps creation order, which decides spacing offsets and which marker
/// is removed first.
#[derive(Debug)]
pub struct MarkerSet {
    markers: SlotMap<MarkerId, Marker>,
    order: Vec<MarkerId>,
    marker_radius: f64,
    speed: f64,
    direction: Direction,
}

impl MarkerSet {
    /// Creates an empty set.
    ///
    /// `speed` and `direction` seed every marker added later.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is not positive or the speed is negative.
    pub fn new(marker_radius: f64, speed: f64, direction: Direction) -> Result<Self> {
        check_radius(marker_radius)?;
        check_speed(speed)?;
        Ok(Self {
            markers: SlotMap::with_key(),
            order: Vec::new(),
            marker_radius,
            speed,
            direction,
        })
    }

    /// Number of markers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the set has no markers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Marker ids in creation order.
    #[must_use]
    pub fn ids(&self) -> &[MarkerId] {
        &self.order
    }

    /// Looks up a marker by id.
    #[must_use]
    pub fn get(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.get(id)
    }

    /// Iterates markers in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (MarkerId, &Marker)> + '_ {
        self.order
            .iter()
            .filter_map(|&id| self.markers.get(id).map(|marker| (id, marker)))
    }

    /// Radius each marker occupies on the path.
    #[must_use]
    pub fn marker_radius(&self) -> f64 {
        self.marker_radius
    }

    /// Speed given to markers added later.
    #[must_use]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Direction given to markers added later.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Changes the marker radius. Callers should [`prune`](Self::prune)
    /// afterwards, since capacity may have shrunk.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is not positive and finite.
    pub fn set_marker_radius(&mut self, marker_radius: f64) -> Result<()> {
        check_radius(marker_radius)?;
        self.marker_radius = marker_radius;
        Ok(())
    }

    /// Number of markers that fit on `geometry` without overlapping.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn max_markers(&self, geometry: &PathGeometry) -> usize {
        (geometry.total_length() / (2.0 * self.marker_radius)).floor() as usize
    }

    /// Spaces all markers at equal arc-length intervals, starting from the
    /// beginning of the path.
    ///
    /// # Errors
    ///
    /// Returns an error if a seed length falls outside the path.
    #[allow(clippy::cast_precision_loss)]
    pub fn redistribute(&mut self, geometry: &PathGeometry) -> Result<()> {
        let count = self.order.len();
        if count == 0 {
            return Ok(());
        }

        match geometry {
            PathGeometry::Polygon(polygon) => {
                let spacing = polygon.total_length() / count as f64;
                for (i, id) in self.order.iter().enumerate() {
                    if let Some(marker) = self.markers.get_mut(*id) {
                        marker.seed_at_length(polygon, spacing * i as f64)?;
                    }
                }
            }
            PathGeometry::Circle(circle) => {
                for (i, id) in self.order.iter().enumerate() {
                    if let Some(marker) = self.markers.get_mut(*id) {
                        marker.seed_at_angle(circle, TAU * i as f64 / count as f64);
                    }
                }
            }
        }

        debug!(count, path = geometry.kind_name(), "redistributed markers");
        Ok(())
    }

    /// Moves every marker from `from` onto the replacement snapshot `to`,
    /// keeping each marker's place on the loop.
    ///
    /// # Errors
    ///
    /// Returns an error if a marker's cursor fits neither geometry.
    pub fn carry_over(&mut self, from: &PathGeometry, to: &PathGeometry) -> Result<()> {
        for marker in self.markers.values_mut() {
            marker.carry_over(from, to)?;
        }
        debug!(count = self.order.len(), path = to.kind_name(), "carried markers over");
        Ok(())
    }

    /// Appends a marker and redistributes the set.
    ///
    /// # Errors
    ///
    /// Returns `MarkerError::CapacityExceeded` when the path is full; the set
    /// is left unchanged.
    pub fn add(&mut self, geometry: &PathGeometry, tracing: bool) -> Result<MarkerId> {
        let max = self.max_markers(geometry);
        if self.order.len() >= max {
            info!(max, "marker capacity reached");
            return Err(MarkerError::CapacityExceeded { max }.into());
        }

        let id = self
            .markers
            .insert(Marker::new(self.speed, self.direction, tracing));
        self.order.push(id);
        self.redistribute(geometry)?;
        Ok(id)
    }

    /// Removes the most recently added marker and redistributes the rest.
    ///
    /// # Errors
    ///
    /// Returns `MarkerError::EmptySet` when there is nothing to remove.
    pub fn remove(&mut self, geometry: &PathGeometry) -> Result<MarkerId> {
        let Some(id) = self.pop() else {
            info!("no markers to remove");
            return Err(MarkerError::EmptySet.into());
        };
        self.redistribute(geometry)?;
        Ok(id)
    }

    fn pop(&mut self) -> Option<MarkerId> {
        let id = self.order.pop()?;
        self.markers.remove(id);
        Some(id)
    }

    /// Drops markers from the end until the set fits on `geometry`, then
    /// redistributes. Returns how many markers were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if redistribution fails.
    pub fn prune(&mut self, geometry: &PathGeometry) -> Result<usize> {
        let max = self.max_markers(geometry);
        if self.order.len() <= max {
            return Ok(0);
        }

        let mut removed = 0;
        while self.order.len() > max {
            self.pop();
            removed += 1;
        }
        info!(removed, max, "pruned markers");

        self.redistribute(geometry)?;
        Ok(removed)
    }

    /// Sets the speed of every marker and of markers added later.
    ///
    /// # Errors
    ///
    /// Returns an error if the speed is negative or not finite.
    pub fn set_speed(&mut self, speed: f64) -> Result<()> {
        check_speed(speed)?;
        self.speed = speed;
        for marker in self.markers.values_mut() {
            marker.set_speed(speed);
        }
        Ok(())
    }

    /// Sets the direction of every marker and of markers added later.
    pub fn set_direction(&mut self, direction: Direction, geometry: &PathGeometry) {
        self.direction = direction;
        for marker in self.markers.values_mut() {
            marker.set_direction(direction, geometry);
        }
    }

    /// Starts or stops every marker.
    pub fn set_tracing(&mut self, tracing: bool) {
        for marker in self.markers.values_mut() {
            marker.set_tracing(tracing);
        }
    }

    /// Advances every marker by `dt` seconds.
    ///
    /// A marker that fails to advance is logged and skipped; the others still
    /// move. Returns the number of markers that failed.
    pub fn advance(&mut self, geometry: &PathGeometry, dt: f64) -> usize {
        let mut failed = 0;
        for (id, marker) in &mut self.markers {
            if let Err(err) = marker.advance(geometry, dt) {
                warn!(?id, %err, "marker failed to advance");
                failed += 1;
            }
        }
        failed
    }

    /// Position and progress of every marker, in creation order.
    #[must_use]
    pub fn snapshots(&self, geometry: &PathGeometry) -> Vec<MarkerSnapshot> {
        self.iter()
            .map(|(id, marker)| {
                let progress = marker.progress(geometry).unwrap_or_else(|err| {
                    warn!(?id, %err, "marker progress unavailable");
                    0.0
                });
                MarkerSnapshot {
                    id,
                    position: *marker.position(),
                    progress,
                }
            })
            .collect()
    }
}

fn check_radius(marker_radius: f64) -> Result<()> {
    if marker_radius.is_finite() && marker_radius > 0.0 {
        Ok(())
    } else {
        Err(ControlError::InvalidParameter {
            parameter: "marker radius",
            value: marker_radius,
        }
        .into())
    }
}

fn check_speed(speed: f64) -> Result<()> {
    if speed.is_finite() && speed >= 0.0 {
        Ok(())
    } else {
        Err(ControlError::InvalidParameter {
            parameter: "speed",
            value: speed,
        }
        .into())
    }
}
