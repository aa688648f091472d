//! Relationship queries.

use polyedge_core::Direction;

/// Which relationships of an element to enumerate.
///
/// ```ignore
/// RelationshipQuery::all()
///     .direction(Direction::Incoming)
///     .types(["Sale", "KNOWS"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationshipQuery {
    direction: Direction,
    types: Vec<String>,
}

impl RelationshipQuery {
    /// Every relationship, in both directions.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Restrict to these relationship types. Hyper and unary types match
    /// their fragments.
    pub fn types<I, T>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.types.extend(types.into_iter().map(Into::into));
        self
    }

    pub fn with_type(self, type_name: impl Into<String>) -> Self {
        self.types([type_name])
    }

    pub fn get_direction(&self) -> Direction {
        self.direction
    }

    pub fn get_types(&self) -> &[String] {
        &self.types
    }
}
