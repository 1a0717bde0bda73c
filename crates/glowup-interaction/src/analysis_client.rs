//! GeminiAnalysisClient - style/health analysis over the Gemini REST API.
//!
//! One image in, one strictly-validated [`StyleAnalysis`] out. The request
//! carries a JSON response schema built from the closed taxonomy, and the
//! response is validated back into it; partial results never escape.

use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use strum::IntoEnumIterator;

use glowup_core::analysis::{
    ColorPalette, PhysicalAttributes, Recommendation, RecommendationSet, SkinHealth, StyleAnalysis,
};
use glowup_core::catalog::{Category, Gender, SubCategory};
use glowup_core::client::AnalysisClient;
use glowup_core::error::{GlowupError, Result};
use glowup_core::image::EncodedImage;

use crate::config::GeminiConfig;
use crate::wire::{
    Content, GenerateContentRequest, GenerationConfig, Part, extract_text, send_request,
};

const ANALYSIS_PROMPT: &str = "Perform a comprehensive premium style and health analysis.
Analyze gender, face structure, skin tone, height, weight, and age from the photo.
Generate EXACTLY 3-5 high-quality, personalized recommendations for EVERY sub-category listed in the schema.
Recommendations MUST be relevant to the person's detected physical attributes. No generic filler.
Provide specific outfit styles for Wedding/Office/etc. that suit their body type.
Suggest sunglasses that fit their face shape.
Suggest diet options that suit their estimated age and physique.
Return result in strict JSON format according to the provided schema.";

/// Client for the remote style analysis, backed by a reasoning-capable
/// Gemini model.
#[derive(Clone)]
pub struct GeminiAnalysisClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiAnalysisClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Builds a client with the API key loaded from the environment.
    pub fn try_from_env() -> Result<Self> {
        Ok(Self::new(GeminiConfig::try_from_env()?))
    }
}

#[async_trait]
impl AnalysisClient for GeminiAnalysisClient {
    async fn analyze(&self, image: &EncodedImage) -> Result<StyleAnalysis> {
        // EncodedImage construction already rejects empty payloads, which
        // covers the non-empty input constraint.
        tracing::debug!(
            target: "gemini",
            model = self.config.analysis_model(),
            "issuing style analysis request"
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![
                    Part::image(image),
                    Part::Text {
                        text: ANALYSIS_PROMPT.to_string(),
                    },
                ],
            }],
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: analysis_schema(),
            }),
        };

        let url = self.config.generate_url(self.config.analysis_model());
        let response = send_request(&self.client, url, &request)
            .await
            .map_err(GlowupError::analysis)?;

        let text = extract_text(response)
            .ok_or_else(|| GlowupError::analysis("Gemini returned no analysis text"))?;
        parse_analysis_text(&text)
    }
}

/// Parses and validates the model's JSON answer into the closed taxonomy.
pub(crate) fn parse_analysis_text(text: &str) -> Result<StyleAnalysis> {
    let wire: WireAnalysis = serde_json::from_str(text)
        .map_err(|err| GlowupError::schema(format!("Analysis response did not match the schema: {err}")))?;
    validate(wire)
}

// ============================================================================
// Response schema
// ============================================================================

fn recommendation_array_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "title": { "type": "STRING" },
                "description": { "type": "STRING" },
                "tags": { "type": "ARRAY", "items": { "type": "STRING" } },
                "badge": { "type": "STRING" }
            },
            "required": ["title", "description", "tags"]
        }
    })
}

/// The strict JSON response schema, generated from the closed taxonomy so
/// the prompt and the validator can never drift apart.
fn analysis_schema() -> Value {
    let mut categories = serde_json::Map::new();
    for category in Category::iter() {
        let mut subs = serde_json::Map::new();
        for sub in category.all_sub_options() {
            subs.insert(sub.to_string(), recommendation_array_schema());
        }
        categories.insert(
            category.to_string(),
            json!({ "type": "OBJECT", "properties": subs }),
        );
    }

    json!({
        "type": "OBJECT",
        "properties": {
            "vibe": { "type": "STRING", "description": "Overall style vibe identified" },
            "faceShape": { "type": "STRING", "description": "Detected face shape (Oval, Square, etc.)" },
            "bodyType": { "type": "STRING", "description": "Body structure analysis (Ectomorph, Endomorph, etc.)" },
            "colorPalette": {
                "type": "OBJECT",
                "properties": {
                    "primary": { "type": "STRING" },
                    "secondary": { "type": "STRING" },
                    "accent": { "type": "STRING" },
                    "shades": { "type": "ARRAY", "items": { "type": "STRING" } }
                },
                "required": ["primary", "secondary", "accent", "shades"]
            },
            "skinHealth": {
                "type": "OBJECT",
                "properties": {
                    "overallHealth": { "type": "STRING" },
                    "oiliness": { "type": "STRING" },
                    "spots": { "type": "STRING" },
                    "wrinkles": { "type": "STRING" },
                    "darkCircles": { "type": "STRING" },
                    "healthScore": { "type": "NUMBER" }
                },
                "required": ["overallHealth", "oiliness", "spots", "wrinkles", "darkCircles", "healthScore"]
            },
            "physicalAttributes": {
                "type": "OBJECT",
                "properties": {
                    "estimatedAge": { "type": "STRING" },
                    "skinColor": { "type": "STRING" },
                    "eyeColor": { "type": "STRING" },
                    "hairColor": { "type": "STRING" },
                    "gender": { "type": "STRING" },
                    "height": { "type": "STRING", "description": "Estimated height (e.g. 5'10'')" },
                    "weight": { "type": "STRING", "description": "Estimated weight (e.g. 160 lbs)" }
                },
                "required": ["estimatedAge", "skinColor", "eyeColor", "hairColor", "gender", "height", "weight"]
            },
            "recommendations": { "type": "OBJECT", "properties": categories },
            "occasionTips": { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "required": [
            "vibe",
            "faceShape",
            "bodyType",
            "colorPalette",
            "skinHealth",
            "physicalAttributes",
            "recommendations",
            "occasionTips"
        ]
    })
}

// ============================================================================
// Wire deserialization and validation
// ============================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireAnalysis {
    vibe: String,
    face_shape: String,
    body_type: String,
    color_palette: WirePalette,
    skin_health: WireSkinHealth,
    physical_attributes: WireAttributes,
    #[serde(default)]
    recommendations: BTreeMap<String, BTreeMap<String, Vec<WireRecommendation>>>,
    #[serde(default)]
    occasion_tips: Vec<String>,
}

#[derive(Deserialize)]
struct WirePalette {
    primary: String,
    secondary: String,
    accent: String,
    #[serde(default)]
    shades: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireSkinHealth {
    overall_health: String,
    oiliness: String,
    spots: String,
    wrinkles: String,
    dark_circles: String,
    #[serde(default)]
    health_score: Option<f64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireAttributes {
    estimated_age: String,
    skin_color: String,
    eye_color: String,
    hair_color: String,
    #[serde(default)]
    gender: Option<String>,
    #[serde(default)]
    height: Option<String>,
    #[serde(default)]
    weight: Option<String>,
}

#[derive(Deserialize)]
struct WireRecommendation {
    title: String,
    description: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    badge: Option<String>,
}

impl From<WireRecommendation> for Recommendation {
    fn from(wire: WireRecommendation) -> Self {
        Self {
            title: wire.title,
            description: wire.description,
            tags: wire.tags,
            badge: wire.badge,
        }
    }
}

fn validate(wire: WireAnalysis) -> Result<StyleAnalysis> {
    let gender = Gender::from_detected(wire.physical_attributes.gender.as_deref().unwrap_or(""));

    let mut recommendations = RecommendationSet::new();
    for (category_key, subs) in wire.recommendations {
        let category: Category = category_key.parse().map_err(|_| {
            GlowupError::schema(format!("Unknown recommendation category '{category_key}'"))
        })?;
        for (sub_key, items) in subs {
            let sub = SubCategory::from_wire_label(&sub_key)
                .ok_or_else(|| GlowupError::schema(format!("Unknown sub-category '{sub_key}'")))?;
            if sub.category() != category {
                return Err(GlowupError::schema(format!(
                    "Sub-category '{sub_key}' does not belong to '{category_key}'"
                )));
            }
            let items: Vec<Recommendation> = items.into_iter().map(Into::into).collect();
            if !items.is_empty() {
                recommendations.insert(sub, items);
            }
        }
    }

    let health_score = wire
        .skin_health
        .health_score
        .unwrap_or(85.0)
        .clamp(0.0, 100.0)
        .round() as u8;

    let analysis = StyleAnalysis {
        vibe: wire.vibe,
        face_shape: wire.face_shape,
        body_type: wire.body_type,
        color_palette: ColorPalette {
            primary: wire.color_palette.primary,
            secondary: wire.color_palette.secondary,
            accent: wire.color_palette.accent,
            shades: wire.color_palette.shades,
        },
        skin_health: SkinHealth {
            overall_health: wire.skin_health.overall_health,
            oiliness: wire.skin_health.oiliness,
            spots: wire.skin_health.spots,
            wrinkles: wire.skin_health.wrinkles,
            dark_circles: wire.skin_health.dark_circles,
            health_score,
        },
        physical_attributes: PhysicalAttributes {
            estimated_age: wire.physical_attributes.estimated_age,
            skin_color: wire.physical_attributes.skin_color,
            eye_color: wire.physical_attributes.eye_color,
            hair_color: wire.physical_attributes.hair_color,
            gender,
            height: wire.physical_attributes.height.unwrap_or_default(),
            weight: wire.physical_attributes.weight.unwrap_or_default(),
        },
        recommendations,
        occasion_tips: wire.occasion_tips,
    };

    analysis.recommendations.validate_coverage(gender)?;
    Ok(analysis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn recommendation_json(title: &str) -> Value {
        json!({
            "title": title,
            "description": "Suits the detected features",
            "tags": ["clean", "modern"],
            "badge": "HOT"
        })
    }

    /// A complete wire response for the given gender string.
    fn wire_json(gender: &str) -> Value {
        let detected = Gender::from_detected(gender);
        let mut recommendations = serde_json::Map::new();
        for category in Category::iter() {
            if !category.visible_for(Some(detected)) {
                continue;
            }
            let mut subs = serde_json::Map::new();
            for sub in category.sub_options(Some(detected)) {
                subs.insert(
                    sub.to_string(),
                    json!([
                        recommendation_json("A"),
                        recommendation_json("B"),
                        recommendation_json("C")
                    ]),
                );
            }
            recommendations.insert(category.to_string(), Value::Object(subs));
        }

        json!({
            "vibe": "Smart Casual",
            "faceShape": "Oval",
            "bodyType": "Mesomorph",
            "colorPalette": {
                "primary": "Navy",
                "secondary": "Grey",
                "accent": "Burgundy",
                "shades": ["#1a2238", "#6b7280"]
            },
            "skinHealth": {
                "overallHealth": "Good",
                "oiliness": "20",
                "spots": "10",
                "wrinkles": "8",
                "darkCircles": "15",
                "healthScore": 87.4
            },
            "physicalAttributes": {
                "estimatedAge": "28 years",
                "skinColor": "Tan",
                "eyeColor": "Brown",
                "hairColor": "Black",
                "gender": gender,
                "height": "5'10''",
                "weight": "160 lbs"
            },
            "recommendations": recommendations,
            "occasionTips": ["Dress one notch above the room."]
        })
    }

    #[test]
    fn test_parse_complete_male_response() {
        let analysis = parse_analysis_text(&wire_json("male").to_string()).unwrap();
        assert_eq!(analysis.gender(), Gender::Male);
        assert_eq!(analysis.skin_health.health_score, 87);
        assert_eq!(
            analysis.recommendations.for_slot(SubCategory::Beard).len(),
            3
        );
        assert!(!analysis.recommendations.has_category(Category::Makeup));
        assert_eq!(
            analysis.recommendations.for_slot(SubCategory::Wedding)[0].badge.as_deref(),
            Some("HOT")
        );
    }

    #[test]
    fn test_parse_complete_female_response_covers_makeup() {
        let analysis = parse_analysis_text(&wire_json("girl").to_string()).unwrap();
        assert_eq!(analysis.gender(), Gender::Female);
        assert!(analysis.recommendations.has_category(Category::Makeup));
        assert!(
            !analysis
                .recommendations
                .for_slot(SubCategory::ContactLens)
                .is_empty()
        );
    }

    #[test]
    fn test_unknown_sub_category_is_schema_error() {
        let mut value = wire_json("male");
        value["recommendations"]["hair"]["mullet"] = json!([recommendation_json("X")]);
        let err = parse_analysis_text(&value.to_string()).unwrap_err();
        assert!(err.is_schema());
        assert!(err.to_string().contains("mullet"));
    }

    #[test]
    fn test_sub_category_in_wrong_category_is_schema_error() {
        let mut value = wire_json("male");
        value["recommendations"]["hair"]["Wedding"] = json!([recommendation_json("X")]);
        let err = parse_analysis_text(&value.to_string()).unwrap_err();
        assert!(err.is_schema());
    }

    #[test]
    fn test_missing_coverage_is_schema_error() {
        let mut value = wire_json("male");
        value["recommendations"]["diet"]
            .as_object_mut()
            .unwrap()
            .remove("Keto");
        let err = parse_analysis_text(&value.to_string()).unwrap_err();
        assert!(err.is_schema());
        assert!(err.to_string().contains("Keto"));
    }

    #[test]
    fn test_malformed_json_is_schema_error() {
        assert!(parse_analysis_text("not json").unwrap_err().is_schema());
    }

    #[test]
    fn test_health_score_clamped() {
        let mut value = wire_json("male");
        value["skinHealth"]["healthScore"] = json!(250.0);
        let analysis = parse_analysis_text(&value.to_string()).unwrap();
        assert_eq!(analysis.skin_health.health_score, 100);
    }

    #[test]
    fn test_schema_lists_every_sub_category() {
        let schema = analysis_schema();
        let categories = schema["properties"]["recommendations"]["properties"]
            .as_object()
            .unwrap();
        for category in Category::iter() {
            let subs = categories[&category.to_string()]["properties"]
                .as_object()
                .unwrap();
            for sub in category.all_sub_options() {
                assert!(subs.contains_key(&sub.to_string()), "{category}/{sub}");
            }
        }
        assert!(categories["hair"]["properties"].get("beard").is_some());
        assert!(categories["makeup"]["properties"].get("Contact Lens").is_some());
    }
}
