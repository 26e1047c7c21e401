use super::conversion::IntoProgram;
use super::definition::ProgramDefinition;
use super::raw::{RawEdge, RawNode, RawProgram};
use crate::error::ProgramConversionError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    #[default]
    Basic,
    Intermediate,
    Advanced,
}

/// A predefined program shipped with the editor, as stored in the template catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTemplate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub complexity: Complexity,
    #[serde(default)]
    pub nodes: Vec<RawNode>,
    #[serde(default)]
    pub edges: Vec<RawEdge>,
}

/// A template with its graph converted into a ready-to-run program.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
    pub complexity: Complexity,
    pub program: ProgramDefinition,
}

impl ProgramTemplate {
    pub fn from_json(json: &str) -> Result<Self, ProgramConversionError> {
        let raw: RawTemplate = serde_json::from_str(json)?;
        Self::try_from(raw)
    }

    /// Parses a catalogue file of the form `{ "templates": [...] }`.
    pub fn catalogue_from_json(json: &str) -> Result<Vec<Self>, ProgramConversionError> {
        #[derive(Deserialize)]
        struct Catalogue {
            templates: Vec<RawTemplate>,
        }
        let catalogue: Catalogue = serde_json::from_str(json)?;
        catalogue.templates.into_iter().map(Self::try_from).collect()
    }
}

impl TryFrom<RawTemplate> for ProgramTemplate {
    type Error = ProgramConversionError;

    fn try_from(raw: RawTemplate) -> Result<Self, Self::Error> {
        let program = RawProgram {
            nodes: raw.nodes,
            edges: raw.edges,
        }
        .into_program()?;
        Ok(Self {
            id: raw.id,
            name: raw.name,
            description: raw.description,
            category: raw.category,
            tags: raw.tags,
            complexity: raw.complexity,
            program,
        })
    }
}

impl IntoProgram for ProgramTemplate {
    fn into_program(self) -> Result<ProgramDefinition, ProgramConversionError> {
        Ok(self.program)
    }
}
