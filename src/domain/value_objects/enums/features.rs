use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Flat capabilities gated by plan tier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    ViewFullCurriculum,
    ContactCandidate,
    SaveFavorites,
    AdvancedSearch,
}

impl Feature {
    pub const ALL: [Feature; 4] = [
        Feature::ViewFullCurriculum,
        Feature::ContactCandidate,
        Feature::SaveFavorites,
        Feature::AdvancedSearch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::ViewFullCurriculum => "view_full_curriculum",
            Feature::ContactCandidate => "contact_candidate",
            Feature::SaveFavorites => "save_favorites",
            Feature::AdvancedSearch => "advanced_search",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        Feature::ALL
            .into_iter()
            .find(|feature| feature.as_str() == value)
    }
}

impl Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capabilities with a numeric cap per billing period.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MeteredFeature {
    CurriculumViews,
    Contacts,
}

impl MeteredFeature {
    pub const ALL: [MeteredFeature; 2] = [MeteredFeature::CurriculumViews, MeteredFeature::Contacts];

    pub fn as_str(&self) -> &'static str {
        match self {
            MeteredFeature::CurriculumViews => "curriculum_views",
            MeteredFeature::Contacts => "contacts",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "curriculum_views" | "curriculumViews" => Some(MeteredFeature::CurriculumViews),
            "contacts" => Some(MeteredFeature::Contacts),
            _ => None,
        }
    }
}

impl Display for MeteredFeature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
