use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::config::TracerConfig;
use crate::error::{ControlError, Result, TracerError};
use crate::geometry::PathGeometry;
use crate::math::Point2;

/// Name of a selectable path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ShapeId {
    Square,
    Triangle,
    Irregular,
    Cube,
    Circle,
    /// Any further path registered in a [`ShapeCatalog`].
    Named(String),
}

impl ShapeId {
    /// Maps a `Named` id that spells a built-in shape to that built-in, so
    /// both forms select the same catalog entry and display the same way.
    #[must_use]
    pub fn normalized(self) -> Self {
        match self {
            Self::Named(name) => {
                Self::builtin(&name).unwrap_or_else(|| Self::Named(name.trim().to_owned()))
            }
            other => other,
        }
    }

    fn builtin(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "square" => Some(Self::Square),
            "triangle" => Some(Self::Triangle),
            "irregular" => Some(Self::Irregular),
            "cube" => Some(Self::Cube),
            "circle" => Some(Self::Circle),
            _ => None,
        }
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Square => f.write_str("square"),
            Self::Triangle => f.write_str("triangle"),
            Self::Irregular => f.write_str("irregular"),
            Self::Cube => f.write_str("cube"),
            Self::Circle => f.write_str("circle"),
            Self::Named(name) => f.write_str(name),
        }
    }
}

impl FromStr for ShapeId {
    type Err = TracerError;

    /// Parses a shape name, case-insensitively for the built-in shapes.
    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        if name.is_empty() {
            return Err(ControlError::UnknownShape(s.to_owned()).into());
        }
        Ok(Self::builtin(name).unwrap_or_else(|| Self::Named(name.to_owned())))
    }
}

/// Paths available for selection, keyed by [`ShapeId`].
#[derive(Debug, Clone, Default)]
pub struct ShapeCatalog {
    shapes: HashMap<ShapeId, PathGeometry>,
}

impl ShapeCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in square, triangle, irregular polygon, and cube outline laid
    /// out around the configured circle, plus the circle itself.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured circle is degenerate.
    pub fn standard(config: &TracerConfig) -> Result<Self> {
        let mut catalog = Self::new();
        catalog.insert(
            ShapeId::Square,
            PathGeometry::polygon(vec![
                Point2::new(-2.0, 0.0),
                Point2::new(2.0, 0.0),
                Point2::new(2.0, 4.0),
                Point2::new(-2.0, 4.0),
            ])?,
        );
        catalog.insert(
            ShapeId::Triangle,
            PathGeometry::polygon(vec![
                Point2::new(-2.0, 0.0),
                Point2::new(2.0, 0.0),
                Point2::new(0.0, 4.0),
            ])?,
        );
        catalog.insert(
            ShapeId::Irregular,
            PathGeometry::polygon(vec![
                Point2::new(-2.0, 0.0),
                Point2::new(1.0, 0.5),
                Point2::new(2.5, 2.0),
                Point2::new(1.0, 4.0),
                Point2::new(-1.5, 3.0),
            ])?,
        );
        // Silhouette of a cube drawn in oblique projection.
        catalog.insert(
            ShapeId::Cube,
            PathGeometry::polygon(vec![
                Point2::new(-2.0, 0.0),
                Point2::new(1.0, 0.0),
                Point2::new(2.5, 1.5),
                Point2::new(2.5, 4.5),
                Point2::new(-0.5, 4.5),
                Point2::new(-2.0, 3.0),
            ])?,
        );
        catalog.insert(
            ShapeId::Circle,
            PathGeometry::circle(config.circle_center, config.circle_radius)?,
        );
        Ok(catalog)
    }

    /// Adds or replaces a path. Returns the previous geometry, if any.
    pub fn insert(&mut self, shape: ShapeId, geometry: PathGeometry) -> Option<PathGeometry> {
        self.shapes.insert(shape.normalized(), geometry)
    }

    /// Looks up a path, returning `None` if it is not registered.
    #[must_use]
    pub fn get(&self, shape: &ShapeId) -> Option<&PathGeometry> {
        self.shapes.get(&shape.clone().normalized())
    }

    /// Returns `true` if the path is registered.
    #[must_use]
    pub fn contains(&self, shape: &ShapeId) -> bool {
        self.get(shape).is_some()
    }

    /// Looks up a path.
    ///
    /// # Errors
    ///
    /// Returns `ControlError::UnknownShape` if the catalog has no such path.
    pub fn resolve(&self, shape: &ShapeId) -> Result<&PathGeometry> {
        self.get(shape)
            .ok_or_else(|| ControlError::UnknownShape(shape.to_string()).into())
    }

    /// Registered shape ids, in no particular order.
    pub fn shapes(&self) -> impl Iterator<Item = &ShapeId> + '_ {
        self.shapes.keys()
    }
}
