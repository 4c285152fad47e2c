use crate::domain::model::Doctor;

pub const MAX_SUGGESTIONS: usize = 5;

/// Up to [`MAX_SUGGESTIONS`] distinct doctor names containing `query`, case-insensitively,
/// in the order they first appear in `doctors`.
pub fn suggest_names(query: &str, doctors: &[Doctor]) -> Vec<String> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    let mut names: Vec<String> = Vec::with_capacity(MAX_SUGGESTIONS);

    for doctor in doctors {
        if names.len() == MAX_SUGGESTIONS {
            break;
        }
        if doctor.name.to_lowercase().contains(&needle) && !names.contains(&doctor.name) {
            names.push(doctor.name.clone());
        }
    }

    names
}
