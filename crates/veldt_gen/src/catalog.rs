//! Obstacle catalog
//!
//! The read-only asset repository the generator draws from: the ground chunk
//! template, the obstacle prototypes and the fence line. It is loaded once and
//! handed to the placer by reference.
//!
//! # Example Catalog File
//!
//! ```toml
//! [ground]
//! name = "chunk"
//! material = "grass"
//!
//! [[obstacles]]
//! name = "rock"
//! shape = { type = "sphere", radius = 1.5 }
//!
//! [[obstacles]]
//! name = "tree"
//! shape = { type = "cylinder", radius = 0.6, half_height = 3.0 }
//!
//! [fence]
//! name = "fence_line"
//! shape = { type = "box", half_extents = [25.0, 1.0, 0.2] }
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GenError, Result};

/// Collision footprint of a prototype, centered on its placement point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PrototypeShape {
    Sphere { radius: f32 },
    Cylinder { radius: f32, half_height: f32 },
    Box { half_extents: [f32; 3] },
}

impl PrototypeShape {
    /// Every dimension must be finite and strictly positive
    fn check_dimensions(&self) -> std::result::Result<(), String> {
        let dims: Vec<(&str, f32)> = match self {
            Self::Sphere { radius } => vec![("radius", *radius)],
            Self::Cylinder {
                radius,
                half_height,
            } => vec![("radius", *radius), ("half_height", *half_height)],
            Self::Box { half_extents } => half_extents.iter().map(|&e| ("half_extents", e)).collect(),
        };
        match dims.into_iter().find(|(_, v)| !(v.is_finite() && *v > 0.0)) {
            Some((field, value)) => Err(format!("{} must be positive and finite, got {}", field, value)),
            None => Ok(()),
        }
    }
}

/// A placeable object template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstaclePrototype {
    pub name: String,
    pub shape: PrototypeShape,
}

impl ObstaclePrototype {
    pub fn new(name: impl Into<String>, shape: PrototypeShape) -> Self {
        Self {
            name: name.into(),
            shape,
        }
    }
}

/// Template for the chunk ground object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundTemplate {
    pub name: String,
    /// Surface material applied to every chunk's ground
    pub material: String,
}

impl Default for GroundTemplate {
    fn default() -> Self {
        Self {
            name: "chunk".to_string(),
            material: "grass".to_string(),
        }
    }
}

/// All templates the generator needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleCatalog {
    #[serde(default)]
    pub ground: GroundTemplate,
    pub obstacles: Vec<ObstaclePrototype>,
    pub fence: ObstaclePrototype,
}

impl Default for ObstacleCatalog {
    fn default() -> Self {
        Self {
            ground: GroundTemplate::default(),
            obstacles: vec![
                ObstaclePrototype::new("rock", PrototypeShape::Sphere { radius: 1.5 }),
                ObstaclePrototype::new(
                    "tree",
                    PrototypeShape::Cylinder {
                        radius: 0.6,
                        half_height: 3.0,
                    },
                ),
                ObstaclePrototype::new("bush", PrototypeShape::Sphere { radius: 1.0 }),
            ],
            fence: ObstaclePrototype::new(
                "fence_line",
                PrototypeShape::Box {
                    half_extents: [25.0, 1.0, 0.2],
                },
            ),
        }
    }
}

impl ObstacleCatalog {
    /// Parse and validate a catalog from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let catalog: Self = toml::from_str(text)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load and validate a catalog file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| GenError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_toml_str(&text)?;
        log::info!(
            "Loaded obstacle catalog from {} ({} prototypes)",
            path.display(),
            catalog.obstacles.len()
        );
        Ok(catalog)
    }

    /// Check that the catalog can be drawn from
    pub fn validate(&self) -> Result<()> {
        if self.obstacles.is_empty() {
            return Err(GenError::EmptyCatalog);
        }
        let mut seen = HashSet::new();
        for prototype in self.obstacles.iter().chain(std::iter::once(&self.fence)) {
            if !seen.insert(prototype.name.as_str()) {
                return Err(GenError::DuplicatePrototype(prototype.name.clone()));
            }
            prototype
                .shape
                .check_dimensions()
                .map_err(|reason| GenError::InvalidPrototype {
                    name: prototype.name.clone(),
                    reason,
                })?;
        }
        Ok(())
    }

    /// Look up a prototype (obstacle or fence) by name
    pub fn prototype(&self, name: &str) -> Option<&ObstaclePrototype> {
        if self.fence.name == name {
            return Some(&self.fence);
        }
        self.obstacles.iter().find(|p| p.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_is_valid() {
        let catalog = ObstacleCatalog::default();
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.ground.material, "grass");
        assert!(catalog.prototype("rock").is_some());
        assert!(catalog.prototype("fence_line").is_some());
        assert!(catalog.prototype("castle").is_none());
    }

    #[test]
    fn test_parse_catalog() {
        let text = r#"
            [[obstacles]]
            name = "stump"
            shape = { type = "cylinder", radius = 0.4, half_height = 0.5 }

            [fence]
            name = "wall"
            shape = { type = "box", half_extents = [20.0, 2.0, 0.5] }
        "#;
        let catalog = ObstacleCatalog::from_toml_str(text).unwrap();
        assert_eq!(catalog.obstacles.len(), 1);
        assert_eq!(catalog.ground, GroundTemplate::default());
        assert_eq!(
            catalog.fence.shape,
            PrototypeShape::Box {
                half_extents: [20.0, 2.0, 0.5]
            }
        );
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let text = r#"
            obstacles = []

            [fence]
            name = "wall"
            shape = { type = "sphere", radius = 1.0 }
        "#;
        assert!(matches!(
            ObstacleCatalog::from_toml_str(text),
            Err(GenError::EmptyCatalog)
        ));
    }

    #[test]
    fn test_degenerate_shapes_rejected() {
        let text = r#"
            [[obstacles]]
            name = "pebble"
            shape = { type = "sphere", radius = -3.0 }

            [fence]
            name = "wall"
            shape = { type = "box", half_extents = [20.0, 2.0, 0.5] }
        "#;
        assert!(matches!(
            ObstacleCatalog::from_toml_str(text),
            Err(GenError::InvalidPrototype { name, .. }) if name == "pebble"
        ));

        let mut catalog = ObstacleCatalog::default();
        catalog.fence.shape = PrototypeShape::Box {
            half_extents: [25.0, -1.0, 0.2],
        };
        assert!(matches!(
            catalog.validate(),
            Err(GenError::InvalidPrototype { name, .. }) if name == "fence_line"
        ));

        catalog.fence.shape = PrototypeShape::Cylinder {
            radius: 0.5,
            half_height: f32::NAN,
        };
        assert!(catalog.validate().is_err());

        catalog.fence.shape = PrototypeShape::Sphere { radius: 0.0 };
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let mut catalog = ObstacleCatalog::default();
        catalog.fence.name = "rock".to_string();
        assert!(matches!(
            catalog.validate(),
            Err(GenError::DuplicatePrototype(name)) if name == "rock"
        ));
    }

    #[test]
    fn test_malformed_catalog() {
        assert!(matches!(
            ObstacleCatalog::from_toml_str("obstacles = 3"),
            Err(GenError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = ObstacleCatalog::load("/nonexistent/veldt/catalog.toml").unwrap_err();
        assert!(matches!(err, GenError::Io { .. }));
    }
}
