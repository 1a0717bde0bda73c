//! The closed recommendation taxonomy.
//!
//! Categories and sub-categories are fixed enums rather than free-form
//! strings; the analysis client validates service responses into this
//! taxonomy at the boundary. Visibility of some entries depends on the
//! detected gender: the makeup category is shown only for female subjects
//! and the beard sub-option only for male subjects.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Gender classification as detected by the analysis service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Parses the service's free-text gender label.
    ///
    /// The service is prompted for a classification but answers in prose
    /// ("male", "Girl", "woman, mid 20s"), so matching is lenient.
    pub fn from_detected(label: &str) -> Self {
        let lower = label.trim().to_lowercase();
        let word = lower.split(|c: char| !c.is_alphabetic()).next().unwrap_or("");
        match word {
            "male" | "boy" | "man" => Self::Male,
            "female" | "girl" | "woman" => Self::Female,
            _ => Self::Other,
        }
    }
}

/// Top-level recommendation category.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
pub enum Category {
    #[serde(rename = "hair")]
    #[strum(serialize = "hair")]
    Hair,
    #[serde(rename = "makeup")]
    #[strum(serialize = "makeup")]
    Makeup,
    #[serde(rename = "outfit")]
    #[strum(serialize = "outfit")]
    Outfit,
    #[serde(rename = "access")]
    #[strum(serialize = "access")]
    Accessories,
    #[serde(rename = "tattoo")]
    #[strum(serialize = "tattoo")]
    Tattoo,
    #[serde(rename = "diet")]
    #[strum(serialize = "diet")]
    Diet,
}

impl Category {
    /// Whether this category is shown at all for the given gender.
    ///
    /// Makeup is female-only; with no analysis yet (`None`) it stays hidden.
    pub fn visible_for(self, gender: Option<Gender>) -> bool {
        match self {
            Self::Makeup => matches!(gender, Some(Gender::Female)),
            _ => true,
        }
    }

    /// The categories shown in navigation for the given gender, in display order.
    pub fn visible_categories(gender: Option<Gender>) -> Vec<Category> {
        use strum::IntoEnumIterator;
        Self::iter().filter(|c| c.visible_for(gender)).collect()
    }

    /// The gender-filtered sub-category options for this category.
    ///
    /// Every category has at least one option for every gender.
    pub fn sub_options(self, gender: Option<Gender>) -> Vec<SubCategory> {
        self.all_sub_options()
            .iter()
            .copied()
            .filter(|sub| *sub != SubCategory::Beard || gender == Some(Gender::Male))
            .collect()
    }

    /// Every sub-category of this category, unfiltered.
    pub fn all_sub_options(self) -> &'static [SubCategory] {
        use SubCategory::*;
        match self {
            Self::Hair => &[Hair, Beard],
            Self::Makeup => &[
                ContactLens,
                Eyebrows,
                EyeLiner,
                Lipstick,
                LipLiner,
                Stickers,
                EarRings,
            ],
            Self::Outfit => &[
                Party, Wedding, Office, Fashion, Travel, Beach, Trekking, Summer, Winter, Rainy,
            ],
            Self::Accessories => &[Shoes, Watches, Sunglasses, Caps, Bands, Studs, Belts, Ties],
            Self::Tattoo => &[
                Face, Neck, Fingers, Hands, Shoulder, Front, Back, Belly, Waist, Legs,
            ],
            Self::Diet => &[
                Protein, Powders, Salads, DryFruits, Fruits, Seeds, Keto, NonVeg, Veg, GreenLeaves,
            ],
        }
    }

    /// The first valid sub-category option for the given gender.
    pub fn default_sub(self, gender: Option<Gender>) -> SubCategory {
        // Option lists are never empty, even with Beard filtered out.
        self.sub_options(gender)[0]
    }

    /// The label sent to the transformation service for this category.
    ///
    /// Hair transformations are keyed by the sub-option (hair vs beard);
    /// every other category is keyed by the category itself.
    pub fn transformation_label(self, sub: SubCategory) -> String {
        match self {
            Self::Hair => sub.to_string(),
            other => other.to_string(),
        }
    }
}

/// Sub-category within a [`Category`].
///
/// The `Display`/serde labels are the wire labels the analysis service is
/// prompted with, so they double as response-schema keys.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
pub enum SubCategory {
    // Hair
    #[serde(rename = "hair")]
    #[strum(serialize = "hair")]
    Hair,
    #[serde(rename = "beard")]
    #[strum(serialize = "beard")]
    Beard,
    // Makeup
    #[serde(rename = "Contact Lens")]
    #[strum(serialize = "Contact Lens")]
    ContactLens,
    Eyebrows,
    #[serde(rename = "Eye Liner")]
    #[strum(serialize = "Eye Liner")]
    EyeLiner,
    Lipstick,
    #[serde(rename = "Lip Liner")]
    #[strum(serialize = "Lip Liner")]
    LipLiner,
    Stickers,
    #[serde(rename = "Ear Rings")]
    #[strum(serialize = "Ear Rings")]
    EarRings,
    // Outfit
    Party,
    Wedding,
    Office,
    Fashion,
    Travel,
    Beach,
    Trekking,
    Summer,
    Winter,
    Rainy,
    // Accessories
    Shoes,
    Watches,
    Sunglasses,
    Caps,
    Bands,
    Studs,
    Belts,
    Ties,
    // Tattoo
    Face,
    Neck,
    Fingers,
    Hands,
    Shoulder,
    Front,
    Back,
    Belly,
    Waist,
    Legs,
    // Diet
    Protein,
    Powders,
    Salads,
    DryFruits,
    Fruits,
    Seeds,
    Keto,
    NonVeg,
    Veg,
    GreenLeaves,
}

impl SubCategory {
    /// The category this sub-category belongs to.
    pub fn category(self) -> Category {
        use SubCategory::*;
        match self {
            Hair | Beard => Category::Hair,
            ContactLens | Eyebrows | EyeLiner | Lipstick | LipLiner | Stickers | EarRings => {
                Category::Makeup
            }
            Party | Wedding | Office | Fashion | Travel | Beach | Trekking | Summer | Winter
            | Rainy => Category::Outfit,
            Shoes | Watches | Sunglasses | Caps | Bands | Studs | Belts | Ties => {
                Category::Accessories
            }
            Face | Neck | Fingers | Hands | Shoulder | Front | Back | Belly | Waist | Legs => {
                Category::Tattoo
            }
            Protein | Powders | Salads | DryFruits | Fruits | Seeds | Keto | NonVeg | Veg
            | GreenLeaves => Category::Diet,
        }
    }

    /// Parses a wire label from the analysis response.
    pub fn from_wire_label(label: &str) -> Option<Self> {
        label.parse().ok()
    }
}
