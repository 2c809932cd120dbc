//! Table layout selection.

/// Which `Earthquake` table layout the process runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SchemaVariant {
    /// `Earthquake(Name, Magnitude)`; no ids, dates, or coordinates.
    Minimal,
    /// Adds `ID`, `Occurrence`, `Longitude` and `Latitude`.
    #[default]
    Extended,
}

impl SchemaVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaVariant::Minimal => "minimal",
            SchemaVariant::Extended => "extended",
        }
    }

    /// Whether rows carry a store-assigned id.
    pub fn has_ids(&self) -> bool {
        matches!(self, SchemaVariant::Extended)
    }
}

impl std::fmt::Display for SchemaVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
