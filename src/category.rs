//! Tag heuristics: category assignment, emergency capability, display
//! specialties, and the opening-status summary.
//!
//! Both providers normalize their native vocabulary (place types, OSM
//! amenity/healthcare tags) into one flat tag list at parse time, so every
//! heuristic here is a pure function over `&[String]`.

use crate::types::{Category, CLOSED, HOURS_UNAVAILABLE, OPEN_NOW};

/// Known tag markers mapped to display specialties, in output order.
const SPECIALTY_TABLE: &[(&str, &str)] = &[
    ("hospital", "General Hospital"),
    ("emergency", "Emergency Care"),
    ("pediatric", "Pediatrics"),
    ("cardiology", "Cardiology"),
    ("orthopedic", "Orthopedics"),
    ("dental", "Dental Care"),
    ("urgent_care", "Urgent Care"),
    ("clinic", "General Practice"),
    ("doctors", "General Practice"),
    ("doctor", "General Practice"),
];

/// Assign the output category for a hit's tags.
///
/// Priority is fixed: a hospital marker wins over everything, clinic and
/// doctor markers come next, anything else is generic medical.
pub fn categorize(tags: &[String]) -> Category {
    if has_tag(tags, "hospital") {
        Category::Hospital
    } else if has_tag(tags, "clinic") || has_tag(tags, "doctor") || has_tag(tags, "doctors") {
        Category::Clinic
    } else {
        Category::Medical
    }
}

/// Whether the tags indicate emergency capability.
pub fn emergency(tags: &[String]) -> bool {
    has_tag(tags, "hospital") || has_tag(tags, "emergency")
}

/// Map tags to ordered display specialties. Unknown tags are dropped; the
/// result may be empty.
pub fn specialties(tags: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for (marker, display) in SPECIALTY_TABLE {
        if has_tag(tags, marker) && !out.iter().any(|s| s == display) {
            out.push((*display).to_string());
        }
    }
    out
}

/// Summarise the provider's open-now flag into the output vocabulary.
pub fn opening_status(open_now: Option<bool>) -> String {
    match open_now {
        Some(true) => OPEN_NOW.to_string(),
        Some(false) => CLOSED.to_string(),
        None => HOURS_UNAVAILABLE.to_string(),
    }
}

fn has_tag(tags: &[String], marker: &str) -> bool {
    tags.iter().any(|t| t == marker)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn hospital_tag_wins_over_clinic() {
        let t = tags(&["clinic", "hospital", "health"]);
        assert_eq!(categorize(&t), Category::Hospital);
    }

    #[test]
    fn clinic_and_doctor_tags_categorize_as_clinic() {
        assert_eq!(categorize(&tags(&["clinic"])), Category::Clinic);
        assert_eq!(categorize(&tags(&["doctor", "health"])), Category::Clinic);
        assert_eq!(categorize(&tags(&["doctors"])), Category::Clinic);
    }

    #[test]
    fn unknown_or_empty_tags_are_generic_medical() {
        assert_eq!(categorize(&tags(&["pharmacy", "health"])), Category::Medical);
        assert_eq!(categorize(&[]), Category::Medical);
    }

    #[test]
    fn categorization_matches_only_whole_tags() {
        // "hospitality" must not count as a hospital marker
        assert_eq!(categorize(&tags(&["hospitality"])), Category::Medical);
    }

    #[test]
    fn emergency_from_hospital_or_emergency_tag() {
        assert!(emergency(&tags(&["hospital"])));
        assert!(emergency(&tags(&["emergency", "clinic"])));
        assert!(!emergency(&tags(&["clinic", "health"])));
        assert!(!emergency(&[]));
    }

    #[test]
    fn specialties_follow_table_order() {
        let t = tags(&["dental", "emergency", "hospital"]);
        let s = specialties(&t);
        assert_eq!(s, vec!["General Hospital", "Emergency Care", "Dental Care"]);
    }

    #[test]
    fn specialties_deduplicate_display_names() {
        // clinic and doctors both map to General Practice
        let s = specialties(&tags(&["clinic", "doctors"]));
        assert_eq!(s, vec!["General Practice"]);
    }

    #[test]
    fn unknown_tags_yield_no_specialties() {
        assert!(specialties(&tags(&["pharmacy", "spa"])).is_empty());
        assert!(specialties(&[]).is_empty());
    }

    #[test]
    fn opening_status_covers_all_states() {
        assert_eq!(opening_status(Some(true)), OPEN_NOW);
        assert_eq!(opening_status(Some(false)), CLOSED);
        assert_eq!(opening_status(None), HOURS_UNAVAILABLE);
    }
}
