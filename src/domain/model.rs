use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Page size used by the listing when nothing else is configured.
pub const DEFAULT_PER_PAGE: usize = 5;

pub const SPECIALTIES: [&str; 12] = [
    "Cardiologist",
    "Dermatologist",
    "Neurologist",
    "Pediatrician",
    "Orthopedic",
    "Gynecologist",
    "Psychiatrist",
    "Ophthalmologist",
    "Dentist",
    "ENT Specialist",
    "General Physician",
    "Urologist",
];

pub const CONSULTATION_TYPES: [ConsultationType; 3] = [
    ConsultationType::Online,
    ConsultationType::InPerson,
    ConsultationType::HomeVisit,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConsultationType {
    #[serde(rename = "Online")]
    Online,
    #[serde(rename = "In-person")]
    InPerson,
    #[serde(rename = "Home Visit")]
    HomeVisit,
}

impl ConsultationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsultationType::Online => "Online",
            ConsultationType::InPerson => "In-person",
            ConsultationType::HomeVisit => "Home Visit",
        }
    }
}

impl fmt::Display for ConsultationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConsultationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CONSULTATION_TYPES
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown consultation type: {}", s))
    }
}

/// One practitioner's directory entry, as served by the remote endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub specialty: String,
    pub consultation_types: Vec<ConsultationType>,
    pub experience: u32,
    pub rating: f64,
    pub review_count: u32,
    pub fees: f64,
    pub qualification: String,
    pub image_url: String,
    pub availability: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Doctor {
    pub fn offers(&self, consultation_type: ConsultationType) -> bool {
        self.consultation_types.contains(&consultation_type)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    #[default]
    None,
    FeesLowToHigh,
    FeesHighToLow,
    ExperienceHighToLow,
}

impl SortBy {
    /// Query-string token; empty for [`SortBy::None`].
    pub fn as_param(&self) -> &'static str {
        match self {
            SortBy::None => "",
            SortBy::FeesLowToHigh => "fees_low_to_high",
            SortBy::FeesHighToLow => "fees_high_to_low",
            SortBy::ExperienceHighToLow => "experience_high_to_low",
        }
    }

    /// Lenient parse: anything unrecognised means "no sorting".
    pub fn from_param(value: &str) -> Self {
        match value {
            "fees_low_to_high" => SortBy::FeesLowToHigh,
            "fees_high_to_low" => SortBy::FeesHighToLow,
            "experience_high_to_low" => SortBy::ExperienceHighToLow,
            _ => SortBy::None,
        }
    }

    pub fn label(&self) -> String {
        self.as_param().replace('_', " ")
    }

    pub fn is_none(&self) -> bool {
        matches!(self, SortBy::None)
    }
}

/// Search, filter, sort and pagination selection for one listing view.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    pub search: String,
    pub consultation_type: Option<ConsultationType>,
    pub specialties: Vec<String>,
    pub sort_by: SortBy,
    pub page: usize,
    pub per_page: usize,
}

impl FilterSpec {
    pub fn new(per_page: usize) -> Self {
        Self {
            per_page: per_page.max(1),
            ..Self::default()
        }
    }

    /// True when no search, filter or sort is active.
    pub fn is_unfiltered(&self) -> bool {
        self.search.is_empty()
            && self.consultation_type.is_none()
            && self.specialties.is_empty()
            && self.sort_by.is_none()
    }

    pub fn clear_filters(&mut self) {
        self.search.clear();
        self.consultation_type = None;
        self.specialties.clear();
        self.sort_by = SortBy::None;
        self.page = 1;
    }
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            search: String::new(),
            consultation_type: None,
            specialties: Vec::new(),
            sort_by: SortBy::None,
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// One page of matching doctors plus the size of the whole match set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageResult {
    pub doctors: Vec<Doctor>,
    pub total_count: usize,
}
