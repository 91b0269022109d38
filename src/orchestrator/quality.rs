//! Information-completeness scoring for duplicate resolution.
//!
//! When two providers report the same physical facility, the copy with
//! more usable contact data should win. Scores are additive:
//!
//! - +2 for a phone that is present and not the placeholder (phones are
//!   what callers of a medical lookup actually need)
//! - +1 for a real rating (> 0)
//! - +1 for a website
//! - +1 for a non-empty specialties list

use crate::types::{Facility, PHONE_UNAVAILABLE};

/// Calculate the completeness score for a facility.
pub fn completeness_score(facility: &Facility) -> u32 {
    let mut score = 0;
    if facility.phone != PHONE_UNAVAILABLE {
        score += 2;
    }
    if facility.rating > 0.0 {
        score += 1;
    }
    if facility.website.is_some() {
        score += 1;
    }
    if !facility.specialties.is_empty() {
        score += 1;
    }
    score
}

/// Whether `candidate` carries strictly more information than `incumbent`.
///
/// Strict comparison keeps ties on the incumbent, which is what makes
/// duplicate resolution deterministic under any input order.
pub fn has_better_info(candidate: &Facility, incumbent: &Facility) -> bool {
    completeness_score(candidate) > completeness_score(incumbent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, HOURS_UNAVAILABLE};

    fn bare_facility() -> Facility {
        Facility {
            id: "places_x_hospital_0".into(),
            name: "Bare Hospital".into(),
            category: Category::Hospital,
            latitude: 19.0,
            longitude: 72.8,
            address: "somewhere".into(),
            phone: PHONE_UNAVAILABLE.into(),
            distance_km: 1.0,
            rating: 0.0,
            website: None,
            opening_status: HOURS_UNAVAILABLE.into(),
            specialties: vec![],
            emergency: true,
        }
    }

    #[test]
    fn placeholder_only_facility_scores_zero() {
        assert_eq!(completeness_score(&bare_facility()), 0);
    }

    #[test]
    fn phone_is_worth_two() {
        let mut f = bare_facility();
        f.phone = "+91 22 1234".into();
        assert_eq!(completeness_score(&f), 2);
    }

    #[test]
    fn rating_website_and_specialties_are_worth_one_each() {
        let mut f = bare_facility();
        f.rating = 4.5;
        assert_eq!(completeness_score(&f), 1);
        f.website = Some("https://x.example".into());
        assert_eq!(completeness_score(&f), 2);
        f.specialties = vec!["Emergency Care".into()];
        assert_eq!(completeness_score(&f), 3);
    }

    #[test]
    fn full_facility_scores_five() {
        let mut f = bare_facility();
        f.phone = "+91 22 1234".into();
        f.rating = 4.0;
        f.website = Some("https://x.example".into());
        f.specialties = vec!["General Hospital".into()];
        assert_eq!(completeness_score(&f), 5);
    }

    #[test]
    fn zero_rating_does_not_count() {
        let mut f = bare_facility();
        f.rating = 0.0;
        assert_eq!(completeness_score(&f), 0);
    }

    #[test]
    fn better_info_is_strict() {
        let mut rich = bare_facility();
        rich.phone = "+91 22 1234".into();
        let poor = bare_facility();

        assert!(has_better_info(&rich, &poor));
        assert!(!has_better_info(&poor, &rich));
        assert!(!has_better_info(&poor, &poor), "ties must not replace");
    }
}
