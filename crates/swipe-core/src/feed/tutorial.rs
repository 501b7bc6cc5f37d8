use core::fmt;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = CatalogError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(CatalogError::UnknownDifficulty(value.to_string())),
        }
    }
}

/// One reuse tutorial in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tutorial {
    pub id: String,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub duration_mins: u32,
    pub materials: Vec<String>,
    pub rating: f32,
    pub likes: u32,
    pub category: String,
    pub bookmarked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    UnknownTutorial(String),
    UnknownDifficulty(String),
}

/// Searchable, bookmarkable tutorial collection.
#[derive(Debug, Clone, Default)]
pub struct TutorialLibrary {
    tutorials: Vec<Tutorial>,
}

impl TutorialLibrary {
    pub fn new(tutorials: Vec<Tutorial>) -> Self {
        Self { tutorials }
    }

    pub fn tutorials(&self) -> &[Tutorial] {
        &self.tutorials
    }

    /// Case-insensitive substring search over title and description,
    /// optionally narrowed to one category. An empty query matches
    /// everything; `None` (or "All") leaves every category in.
    pub fn search(&self, query: &str, category: Option<&str>) -> Vec<&Tutorial> {
        let needle = query.to_lowercase();
        let category = category.filter(|c| !c.eq_ignore_ascii_case("all"));

        self.tutorials
            .iter()
            .filter(|tutorial| {
                let matches_query = needle.is_empty()
                    || tutorial.title.to_lowercase().contains(&needle)
                    || tutorial.description.to_lowercase().contains(&needle);
                let matches_category =
                    category.is_none_or(|c| tutorial.category.eq_ignore_ascii_case(c));
                matches_query && matches_category
            })
            .collect()
    }

    /// Flip one tutorial's bookmark; returns the new state.
    pub fn toggle_bookmark(&mut self, id: &str) -> Result<bool, CatalogError> {
        let tutorial = self
            .tutorials
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| CatalogError::UnknownTutorial(id.to_string()))?;
        tutorial.bookmarked = !tutorial.bookmarked;
        Ok(tutorial.bookmarked)
    }

    pub fn bookmarked(&self) -> impl Iterator<Item = &Tutorial> {
        self.tutorials.iter().filter(|t| t.bookmarked)
    }

    /// Distinct categories in first-seen order, for filter chips.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for tutorial in &self.tutorials {
            if !seen.iter().any(|c: &&str| c.eq_ignore_ascii_case(&tutorial.category)) {
                seen.push(tutorial.category.as_str());
            }
        }
        seen
    }
}
