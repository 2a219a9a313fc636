mod event;
mod shape;

pub use event::TracerEvent;
pub use shape::{ShapeCatalog, ShapeId};

use tracing::{debug, info, warn};

use crate::config::TracerConfig;
use crate::error::{ControlError, Result};
use crate::geometry::{Direction, PathGeometry};
use crate::gradient::Gradient;
use crate::math::Point2;
use crate::simulation::{MarkerId, MarkerSet, MarkerSnapshot, RemovalTimer};

/// Drives markers around the selected path.
///
/// This is the surface a UI or session layer talks to: it owns the active
/// geometry and the marker set, enforces capacity, runs the temporary-removal
/// timer, and queues [`TracerEvent`]s for collaborators. All calls are
/// synchronous; the host advances time with [`tick`](Self::tick).
#[derive(Debug)]
pub struct PathTracer {
    config: TracerConfig,
    catalog: ShapeCatalog,
    shape: ShapeId,
    geometry: PathGeometry,
    pending_geometry: Option<PathGeometry>,
    markers: MarkerSet,
    tracing: bool,
    show_outline: bool,
    removal: Option<RemovalTimer>,
    events: Vec<TracerEvent>,
}

impl PathTracer {
    /// Creates a tracer on the square path of `catalog`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the catalog has no square.
    pub fn new(config: TracerConfig, catalog: ShapeCatalog) -> Result<Self> {
        Self::with_shape(config, catalog, ShapeId::Square)
    }

    /// Creates a tracer with the standard catalog built from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn from_config(config: TracerConfig) -> Result<Self> {
        config.validate()?;
        let catalog = ShapeCatalog::standard(&config)?;
        Self::new(config, catalog)
    }

    /// Creates a tracer starting on `shape`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or `shape` is not in the catalog.
    pub fn with_shape(config: TracerConfig, catalog: ShapeCatalog, shape: ShapeId) -> Result<Self> {
        config.validate()?;
        let shape = shape.normalized();
        let geometry = catalog.resolve(&shape)?.clone();
        let markers = MarkerSet::new(
            config.marker_radius,
            config.default_speed,
            Direction::from_reversed(config.start_reversed),
        )?;

        Ok(Self {
            tracing: config.start_tracing,
            show_outline: config.show_outline,
            config,
            catalog,
            shape,
            geometry,
            pending_geometry: None,
            markers,
            removal: None,
            events: Vec::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &TracerConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &ShapeCatalog {
        &self.catalog
    }

    /// The active shape.
    #[must_use]
    pub fn shape(&self) -> &ShapeId {
        &self.shape
    }

    /// The active geometry snapshot.
    #[must_use]
    pub fn geometry(&self) -> &PathGeometry {
        &self.geometry
    }

    #[must_use]
    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    #[must_use]
    pub fn is_tracing(&self) -> bool {
        self.tracing
    }

    #[must_use]
    pub fn is_reversed(&self) -> bool {
        self.markers.direction().is_reversed()
    }

    #[must_use]
    pub fn outline_visible(&self) -> bool {
        self.show_outline
    }

    /// Whether markers are currently off the path.
    #[must_use]
    pub fn is_removal_pending(&self) -> bool {
        self.removal.is_some()
    }

    /// Seconds until removed markers return, if a removal is pending.
    #[must_use]
    pub fn removal_remaining(&self) -> Option<f64> {
        self.removal.map(|timer| timer.remaining())
    }

    /// Color ramp for marker progress.
    #[must_use]
    pub fn gradient(&self) -> &Gradient {
        &self.config.gradient
    }

    /// How many markers fit on the active path.
    #[must_use]
    pub fn max_markers(&self) -> usize {
        self.markers.max_markers(&self.geometry)
    }

    /// Switches to another path, trimming and respacing the markers.
    ///
    /// # Errors
    ///
    /// Returns `ControlError::UnknownShape` if the catalog has no such path;
    /// nothing changes in that case.
    pub fn select_shape(&mut self, shape: ShapeId) -> Result<()> {
        let shape = shape.normalized();
        let geometry = self.catalog.resolve(&shape)?.clone();

        self.geometry = geometry;
        self.shape = shape;
        self.pending_geometry = None;

        self.markers.prune(&self.geometry)?;
        self.markers.redistribute(&self.geometry)?;

        info!(shape = %self.shape, markers = self.markers.len(), "selected shape");
        self.events.push(TracerEvent::ShapeSelected {
            shape: self.shape.clone(),
        });
        self.notify_outline();
        Ok(())
    }

    /// Replaces the vertex snapshot of `shape`.
    ///
    /// If `shape` is active, the new geometry takes effect at the start of the
    /// next [`tick`](Self::tick), so that a tick never sees two snapshots.
    pub fn update_shape(&mut self, shape: ShapeId, geometry: PathGeometry) {
        let shape = shape.normalized();
        if shape == self.shape {
            self.pending_geometry = Some(geometry.clone());
        }
        self.catalog.insert(shape, geometry);
    }

    /// Adds a marker, respacing the set.
    ///
    /// # Errors
    ///
    /// Returns `MarkerError::CapacityExceeded` when the path is full.
    pub fn add_marker(&mut self) -> Result<MarkerId> {
        let tracing = self.tracing && self.removal.is_none();
        self.markers.add(&self.geometry, tracing)
    }

    /// Removes the most recently added marker, respacing the rest.
    ///
    /// # Errors
    ///
    /// Returns `MarkerError::EmptySet` when there are no markers.
    pub fn remove_marker(&mut self) -> Result<MarkerId> {
        self.markers.remove(&self.geometry)
    }

    /// Sets the speed of all markers.
    ///
    /// # Errors
    ///
    /// Returns `ControlError::InvalidParameter` for negative or non-finite speeds.
    pub fn set_speed(&mut self, speed: f64) -> Result<()> {
        self.markers.set_speed(speed)
    }

    /// Sets the direction of all markers. Markers turn around in place.
    pub fn set_direction(&mut self, reversed: bool) {
        self.markers
            .set_direction(Direction::from_reversed(reversed), &self.geometry);
    }

    /// Starts or stops all markers.
    ///
    /// While a temporary removal is pending the markers stay put until the
    /// removal ends, which always restarts them.
    pub fn set_tracing(&mut self, tracing: bool) {
        self.tracing = tracing;
        if self.removal.is_none() {
            self.markers.set_tracing(tracing);
        }
    }

    /// Changes the marker radius and drops markers that no longer fit.
    /// Returns how many markers were removed.
    ///
    /// # Errors
    ///
    /// Returns `ControlError::InvalidParameter` for non-positive radii.
    pub fn set_marker_radius(&mut self, marker_radius: f64) -> Result<usize> {
        self.markers.set_marker_radius(marker_radius)?;
        self.config.marker_radius = marker_radius;
        self.markers.prune(&self.geometry)
    }

    /// Shows or hides the path outline.
    pub fn set_outline_visible(&mut self, visible: bool) {
        self.show_outline = visible;
        if visible {
            self.notify_outline();
        } else {
            self.events.push(TracerEvent::OutlineCleared);
        }
    }

    /// Takes all markers off the path and schedules their return after the
    /// configured delay.
    ///
    /// # Errors
    ///
    /// Returns `ControlError::AlreadyInProgress` if a removal is already pending.
    pub fn trigger_temporary_removal(&mut self) -> Result<()> {
        if self.removal.is_some() {
            return Err(ControlError::AlreadyInProgress.into());
        }

        let delay = self.config.removal_delay;
        self.markers.set_tracing(false);
        self.removal = Some(RemovalTimer::start(delay));
        info!(delay, markers = self.markers.len(), "markers removed from path");
        self.events.push(TracerEvent::RemovalStarted { delay });
        Ok(())
    }

    /// Advances the simulation by `dt` seconds.
    ///
    /// Applies a pending geometry snapshot first, then either runs the removal
    /// countdown or moves the markers. Never fails: invalid deltas are ignored
    /// and marker errors are logged.
    pub fn tick(&mut self, dt: f64) {
        if !dt.is_finite() || dt < 0.0 {
            warn!(dt, "ignoring invalid tick delta");
            return;
        }

        self.apply_pending_geometry();

        if let Some(timer) = self.removal.as_mut() {
            if timer.tick(dt) {
                self.finish_removal();
            }
            return;
        }

        let failed = self.markers.advance(&self.geometry, dt);
        if failed > 0 {
            debug!(failed, "markers skipped this tick");
        }
    }

    /// Position and progress of every marker, in creation order.
    #[must_use]
    pub fn marker_positions(&self) -> Vec<MarkerSnapshot> {
        self.markers.snapshots(&self.geometry)
    }

    /// Ordered boundary points of the active path; circles are approximated by
    /// `outline_segments` points.
    #[must_use]
    pub fn current_geometry_boundary(&self) -> Vec<Point2> {
        self.geometry.boundary(self.config.outline_segments)
    }

    /// Takes the queued notifications.
    pub fn drain_events(&mut self) -> Vec<TracerEvent> {
        std::mem::take(&mut self.events)
    }

    fn finish_removal(&mut self) {
        self.removal = None;
        self.tracing = true;
        self.markers.set_tracing(true);
        if let Err(err) = self.markers.redistribute(&self.geometry) {
            warn!(%err, "failed to respace returning markers");
        }
        info!(markers = self.markers.len(), "markers returned to path");
        self.events.push(TracerEvent::RemovalFinished);
    }

    fn apply_pending_geometry(&mut self) {
        let Some(geometry) = self.pending_geometry.take() else {
            return;
        };

        let compatible = self.geometry.is_cursor_compatible(&geometry);
        let previous = std::mem::replace(&mut self.geometry, geometry);

        let result = self.markers.prune(&self.geometry).and_then(|removed| {
            if removed > 0 {
                Ok(())
            } else if compatible {
                self.markers.carry_over(&previous, &self.geometry)
            } else {
                self.markers.redistribute(&self.geometry)
            }
        });
        if let Err(err) = result {
            warn!(shape = %self.shape, %err, "failed to fit markers to updated geometry");
        }

        debug!(shape = %self.shape, compatible, "applied geometry snapshot");
        self.events.push(TracerEvent::GeometryUpdated {
            shape: self.shape.clone(),
        });
        self.notify_outline();
    }

    fn notify_outline(&mut self) {
        if self.show_outline {
            let points = self.current_geometry_boundary();
            self.events.push(TracerEvent::OutlineChanged { points });
        }
    }
}
