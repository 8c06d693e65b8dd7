//! Collision report shown before a layout is saved

use std::fmt;

use crate::physics::{CollisionDetector, CollisionTarget, ObjectId};

/// One item that collides with something
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionWarning {
    /// Tracking id of the item
    pub id: ObjectId,
    /// Display name of the item
    pub name: String,
    /// Everything the item collides with, room first
    pub colliding: Vec<CollisionTarget>,
}

impl fmt::Display for CollisionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is colliding with: ", self.name)?;
        for (i, target) in self.colliding.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{target}")?;
        }
        Ok(())
    }
}

/// Collision warnings for every item in a layout
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    /// One warning per colliding item, in the order items were given
    pub warnings: Vec<CollisionWarning>,
}

impl CollisionReport {
    /// Check every `(id, name)` pair against the detector's current state
    ///
    /// Items the detector does not track are skipped.
    pub fn collect<'a, I>(detector: &CollisionDetector, items: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let warnings = items
            .into_iter()
            .filter_map(|(id, name)| {
                let result = detector.check_all_collisions(id);
                result.has_collision.then(|| CollisionWarning {
                    id: ObjectId::from(id),
                    name: name.to_string(),
                    colliding: result.colliding_objects,
                })
            })
            .collect();

        Self { warnings }
    }

    /// Whether no item collides
    pub fn is_clear(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Number of colliding items
    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    /// Whether the report holds no warnings
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    /// One-line summary, e.g. "Found 2 collision(s)"
    pub fn summary(&self) -> String {
        format!("Found {} collision(s)", self.warnings.len())
    }

    /// Text for the save confirmation prompt, `None` when there is nothing to confirm
    pub fn confirmation_prompt(&self) -> Option<String> {
        if self.is_clear() {
            return None;
        }
        Some(format!("Warning: {}:\n\n{}\n\nDo you want to save anyway?", self.summary(), self))
    }
}

impl fmt::Display for CollisionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, warning) in self.warnings.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{warning}")?;
        }
        Ok(())
    }
}
