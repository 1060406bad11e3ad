//! Condition keyword to medical specialty taxonomy

use std::collections::BTreeSet;

/// Specialty used when no keyword matches
pub const PRIMARY_CARE: &str = "primary care";

/// Ordered keyword table. A keyword matches when it appears anywhere in the
/// lowercased condition text, so "heartburn" matches "heart".
pub const SPECIALTY_TAXONOMY: &[(&str, &[&str])] = &[
    ("headache", &["neurologist", "primary care"]),
    ("migraine", &["neurologist", "pain management"]),
    (
        "back pain",
        &["orthopedist", "physical therapist", "pain management"],
    ),
    ("joint pain", &["rheumatologist", "orthopedist"]),
    ("heart", &["cardiologist"]),
    ("skin", &["dermatologist"]),
    ("allergy", &["allergist", "immunologist"]),
    ("breathing", &["pulmonologist", "allergist"]),
    ("stomach", &["gastroenterologist"]),
    ("diabetes", &["endocrinologist", "primary care"]),
    ("anxiety", &["psychiatrist", "psychologist"]),
    ("depression", &["psychiatrist", "psychologist"]),
    ("cancer", &["oncologist"]),
    ("pregnancy", &["obstetrician", "gynecologist"]),
    ("child", &["pediatrician"]),
];

/// Resolve the set of specialties relevant to a free-text condition.
///
/// Every matching keyword contributes its specialties. Never returns an
/// empty set: unmatched text resolves to `{"primary care"}`.
pub fn resolve_specialties(condition_text: &str) -> BTreeSet<&'static str> {
    let condition = condition_text.to_lowercase();

    let mut specialties: BTreeSet<&'static str> = SPECIALTY_TAXONOMY
        .iter()
        .filter(|(keyword, _)| condition.contains(keyword))
        .flat_map(|(_, specialties)| specialties.iter().copied())
        .collect();

    if specialties.is_empty() {
        specialties.insert(PRIMARY_CARE);
    }

    specialties
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_inside_longer_text() {
        let specialties = resolve_specialties("severe migraine pain");
        assert!(specialties.contains("neurologist"));
        assert!(specialties.contains("pain management"));
        assert_eq!(specialties.len(), 2);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let specialties = resolve_specialties("Chronic BACK PAIN");
        assert!(specialties.contains("orthopedist"));
        assert!(specialties.contains("physical therapist"));
        assert!(specialties.contains("pain management"));
    }

    #[test]
    fn test_all_matching_keywords_are_unioned() {
        // "headache" and "migraine" both match
        let specialties = resolve_specialties("migraine headache");
        let expected: BTreeSet<&str> = ["neurologist", "primary care", "pain management"]
            .into_iter()
            .collect();
        assert_eq!(specialties, expected);
    }

    #[test]
    fn test_unmatched_text_falls_back_to_primary_care() {
        for text in ["common cold", "", "sprained ankle", "FEVER"] {
            let specialties = resolve_specialties(text);
            assert_eq!(specialties.len(), 1, "unexpected result for {text:?}");
            assert!(specialties.contains(PRIMARY_CARE));
        }
    }

    #[test]
    fn test_substring_matching_is_not_tokenized() {
        assert!(resolve_specialties("heartburn").contains("cardiologist"));
        assert!(resolve_specialties("childhood asthma").contains("pediatrician"));
    }

    #[test]
    fn test_every_keyword_resolves_to_its_specialties() {
        for (keyword, mapped) in SPECIALTY_TAXONOMY {
            let specialties = resolve_specialties(keyword);
            for specialty in *mapped {
                assert!(specialties.contains(specialty), "{keyword} -> {specialty}");
            }
        }
    }
}
