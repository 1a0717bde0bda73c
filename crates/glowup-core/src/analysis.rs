//! Structured output of the remote style/health/attribute analysis.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{Category, Gender, SubCategory};
use crate::error::{GlowupError, Result};

/// Color palette suited to the subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPalette {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub shades: Vec<String>,
}

/// Skin health metrics.
///
/// The magnitude fields are the service's own indicators ("Low", "20%", …);
/// only the overall score is normalized to 0–100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkinHealth {
    pub overall_health: String,
    pub oiliness: String,
    pub spots: String,
    pub wrinkles: String,
    pub dark_circles: String,
    pub health_score: u8,
}

/// Physical attributes estimated from the photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhysicalAttributes {
    pub estimated_age: String,
    pub skin_color: String,
    pub eye_color: String,
    pub hair_color: String,
    pub gender: Gender,
    pub height: String,
    pub weight: String,
}

/// One suggested style item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
}

/// Recommendations keyed by sub-category.
///
/// The parent category is derivable from each [`SubCategory`], so a single
/// flat map covers the whole category/sub-category grouping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationSet {
    slots: BTreeMap<SubCategory, Vec<Recommendation>>,
}

impl RecommendationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the items for a sub-category, replacing any previous entry.
    pub fn insert(&mut self, sub: SubCategory, items: Vec<Recommendation>) {
        self.slots.insert(sub, items);
    }

    /// The ordered items for a sub-category (empty if absent).
    pub fn for_slot(&self, sub: SubCategory) -> &[Recommendation] {
        self.slots.get(&sub).map(Vec::as_slice).unwrap_or_default()
    }

    /// Whether any sub-category of the given category has items.
    pub fn has_category(&self, category: Category) -> bool {
        self.slots
            .iter()
            .any(|(sub, items)| sub.category() == category && !items.is_empty())
    }

    /// Number of populated sub-categories.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Checks the contract coverage rule: every sub-category applicable to
    /// the detected gender must be present and non-empty.
    ///
    /// # Errors
    ///
    /// Returns a schema error naming the first missing slot.
    pub fn validate_coverage(&self, gender: Gender) -> Result<()> {
        for category in Category::visible_categories(Some(gender)) {
            for sub in category.sub_options(Some(gender)) {
                if self.for_slot(sub).is_empty() {
                    return Err(GlowupError::schema(format!(
                        "Recommendations missing for {category}/{sub}"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// The full analysis result, replaced atomically on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleAnalysis {
    pub vibe: String,
    pub face_shape: String,
    pub body_type: String,
    pub color_palette: ColorPalette,
    pub skin_health: SkinHealth,
    pub physical_attributes: PhysicalAttributes,
    pub recommendations: RecommendationSet,
    pub occasion_tips: Vec<String>,
}

impl StyleAnalysis {
    /// The detected gender classification.
    pub fn gender(&self) -> Gender {
        self.physical_attributes.gender
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str) -> Recommendation {
        Recommendation {
            title: title.to_string(),
            description: "desc".to_string(),
            tags: vec!["tag".to_string()],
            badge: None,
        }
    }

    fn filled_for(gender: Gender) -> RecommendationSet {
        let mut set = RecommendationSet::new();
        for category in Category::visible_categories(Some(gender)) {
            for sub in category.sub_options(Some(gender)) {
                set.insert(sub, vec![item("a"), item("b"), item("c")]);
            }
        }
        set
    }

    #[test]
    fn test_coverage_accepts_complete_set() {
        assert!(filled_for(Gender::Male).validate_coverage(Gender::Male).is_ok());
        assert!(filled_for(Gender::Female).validate_coverage(Gender::Female).is_ok());
    }

    #[test]
    fn test_coverage_rejects_missing_slot() {
        let mut set = filled_for(Gender::Male);
        set.insert(SubCategory::Beard, Vec::new());
        let err = set.validate_coverage(Gender::Male).unwrap_err();
        assert!(err.is_schema());
        assert!(err.to_string().contains("beard"));
    }

    #[test]
    fn test_male_set_does_not_need_makeup() {
        // Makeup slots are only required for female subjects.
        let set = filled_for(Gender::Male);
        assert!(!set.has_category(Category::Makeup));
        assert!(set.validate_coverage(Gender::Male).is_ok());
    }

    #[test]
    fn test_for_slot_defaults_empty() {
        let set = RecommendationSet::new();
        assert!(set.for_slot(SubCategory::Wedding).is_empty());
        assert!(set.is_empty());
    }
}
