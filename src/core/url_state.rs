//! Mapping between a [`FilterSpec`] and the listing's shareable query string.
//!
//! Parsing is permissive: unknown keys, unknown enum values and malformed
//! page numbers fall back to their defaults instead of failing.

use crate::domain::model::{ConsultationType, FilterSpec, SortBy};
use url::form_urlencoded;

pub const PARAM_PAGE: &str = "page";
pub const PARAM_SEARCH: &str = "search";
pub const PARAM_CONSULTATION_TYPE: &str = "consultationType";
pub const PARAM_SPECIALTIES: &str = "specialties";
pub const PARAM_SORT_BY: &str = "sortBy";

/// Serialize `spec` into a query string (without the leading `?`).
///
/// `page` is always written; the remaining parameters only when set.
pub fn to_query_string(spec: &FilterSpec) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    serializer.append_pair(PARAM_PAGE, &spec.page.to_string());

    if !spec.search.is_empty() {
        serializer.append_pair(PARAM_SEARCH, &spec.search);
    }
    if let Some(consultation_type) = spec.consultation_type {
        serializer.append_pair(PARAM_CONSULTATION_TYPE, consultation_type.as_str());
    }
    if !spec.specialties.is_empty() {
        serializer.append_pair(PARAM_SPECIALTIES, &spec.specialties.join(","));
    }
    if !spec.sort_by.is_none() {
        serializer.append_pair(PARAM_SORT_BY, spec.sort_by.as_param());
    }

    serializer.finish()
}

/// Build a [`FilterSpec`] from a query string, with or without a leading `?`.
pub fn from_query_string(query: &str, per_page: usize) -> FilterSpec {
    let mut spec = FilterSpec::new(per_page);
    let query = query.strip_prefix('?').unwrap_or(query);

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match &*key {
            PARAM_PAGE => {
                spec.page = match value.trim().parse::<usize>() {
                    Ok(page) if page >= 1 => page,
                    _ => {
                        tracing::debug!("Ignoring invalid page parameter: {:?}", value);
                        1
                    }
                };
            }
            PARAM_SEARCH => spec.search = value.into_owned(),
            PARAM_CONSULTATION_TYPE => {
                spec.consultation_type = value.parse::<ConsultationType>().ok();
            }
            PARAM_SPECIALTIES => {
                spec.specialties = value
                    .split(',')
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            PARAM_SORT_BY => spec.sort_by = SortBy::from_param(&value),
            other => tracing::debug!("Ignoring unknown query parameter: {}", other),
        }
    }

    spec
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_spec_writes_only_page() {
        assert_eq!(to_query_string(&FilterSpec::default()), "page=1");
    }

    #[test]
    fn test_full_spec_round_trip() {
        let spec = FilterSpec {
            search: "Dr. Rao & Sons".to_string(),
            consultation_type: Some(ConsultationType::HomeVisit),
            specialties: vec!["ENT Specialist".to_string(), "Dentist".to_string()],
            sort_by: SortBy::FeesHighToLow,
            page: 3,
            per_page: 5,
        };

        let query = to_query_string(&spec);
        assert!(query.starts_with("page=3&"));
        assert!(query.contains("consultationType=Home+Visit"));
        assert_eq!(from_query_string(&query, 5), spec);
    }

    #[test]
    fn test_missing_params_take_defaults() {
        let spec = from_query_string("", 5);
        assert_eq!(spec, FilterSpec::default());

        let spec = from_query_string("?search=derm", 5);
        assert_eq!(spec.search, "derm");
        assert_eq!(spec.page, 1);
    }

    #[test]
    fn test_invalid_values_are_ignored() {
        let spec = from_query_string(
            "page=abc&consultationType=Video&sortBy=rating&specialties=,,Dentist,&utm_source=mail",
            5,
        );
        assert_eq!(spec.page, 1);
        assert_eq!(spec.consultation_type, None);
        assert_eq!(spec.sort_by, SortBy::None);
        assert_eq!(spec.specialties, vec!["Dentist".to_string()]);

        assert_eq!(from_query_string("page=0", 5).page, 1);
    }

    #[test]
    fn test_reads_unencoded_commas() {
        let spec = from_query_string("specialties=Cardiologist,Urologist&page=2", 5);
        assert_eq!(spec.specialties, vec!["Cardiologist", "Urologist"]);
        assert_eq!(spec.page, 2);
    }
}
