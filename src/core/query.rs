//! Query engine: search, filter, sort and paginate the in-memory doctor list.

use crate::domain::model::{Doctor, FilterSpec, PageResult, SortBy};
use std::cmp::Ordering;

/// Whether `doctor` survives the search, consultation-type and specialty filters.
pub fn matches(doctor: &Doctor, spec: &FilterSpec) -> bool {
    if !spec.search.is_empty() {
        let needle = spec.search.to_lowercase();
        if !doctor.name.to_lowercase().contains(&needle)
            && !doctor.specialty.to_lowercase().contains(&needle)
        {
            return false;
        }
    }

    if let Some(consultation_type) = spec.consultation_type {
        if !doctor.offers(consultation_type) {
            return false;
        }
    }

    spec.specialties.is_empty() || spec.specialties.iter().any(|s| *s == doctor.specialty)
}

fn compare(sort_by: SortBy, a: &Doctor, b: &Doctor) -> Ordering {
    match sort_by {
        SortBy::None => Ordering::Equal,
        SortBy::FeesLowToHigh => a.fees.total_cmp(&b.fees),
        SortBy::FeesHighToLow => b.fees.total_cmp(&a.fees),
        SortBy::ExperienceHighToLow => b.experience.cmp(&a.experience),
    }
}

/// Apply `spec` to `doctors` and return the requested page with the total match count.
///
/// Sorting is stable, so doctors with equal keys keep their input order and
/// pagination stays deterministic. Pages past the end come back empty.
pub fn filter_and_sort(doctors: &[Doctor], spec: &FilterSpec) -> PageResult {
    let mut filtered: Vec<&Doctor> = doctors.iter().filter(|d| matches(d, spec)).collect();

    if !spec.sort_by.is_none() {
        filtered.sort_by(|a, b| compare(spec.sort_by, a, b));
    }

    let total_count = filtered.len();
    let start = spec.page.saturating_sub(1).saturating_mul(spec.per_page);
    let end = start.saturating_add(spec.per_page).min(total_count);

    let page = if start < end {
        filtered[start..end].iter().map(|d| (*d).clone()).collect()
    } else {
        Vec::new()
    };

    tracing::debug!(
        "Query matched {} of {} doctors, returning {} on page {}",
        total_count,
        doctors.len(),
        page.len(),
        spec.page
    );

    PageResult {
        doctors: page,
        total_count,
    }
}
