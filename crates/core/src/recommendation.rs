//! Rule-based specialist referral for a diagnosis

use serde::{Deserialize, Serialize};

/// Level of care suggested by the diagnosis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CareLevel {
    #[serde(rename = "self-care", alias = "self care")]
    SelfCare,
    #[serde(rename = "primary care", alias = "primary")]
    PrimaryCare,
    #[serde(rename = "specialist")]
    Specialist,
    #[serde(rename = "urgent care", alias = "urgent")]
    UrgentCare,
    #[serde(rename = "emergency")]
    Emergency,
}

/// Specialties a recommendation can point to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MedicalSpecialty {
    #[serde(rename = "Primary Care Physician")]
    PrimaryCarePhysician,
    Cardiologist,
    Neurologist,
    Pulmonologist,
    Endocrinologist,
    Gastroenterologist,
    Dermatologist,
    #[serde(rename = "Emergency Room")]
    EmergencyRoom,
}

/// How soon the patient should be seen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Routine,
    Urgent,
    Emergency,
}

/// One candidate condition with its estimated probability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionLikelihood {
    pub name: String,
    #[serde(default)]
    pub probability: f64,
}

/// Diagnosis produced by the conversation flow.
///
/// `conditions` is ordered by descending confidence; the selector does not
/// re-sort it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisInput {
    #[serde(default)]
    pub conditions: Vec<ConditionLikelihood>,
    pub care_level: CareLevel,
}

/// A single specialist referral
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorRecommendation {
    pub specialty: MedicalSpecialty,
    pub reason: String,
    pub urgency: Urgency,
}

/// How a rule derives urgency once it has matched
#[derive(Debug, Clone, Copy)]
pub enum UrgencyRule {
    Routine,
    /// Urgent only at the given care level
    UrgentAtCareLevel(CareLevel),
    /// Urgent when any condition mentions the keyword
    UrgentWhenMentioned(&'static str),
}

/// A row in the referral cascade
#[derive(Debug, Clone, Copy)]
pub struct SpecialistRule {
    pub keywords: &'static [&'static str],
    pub specialty: MedicalSpecialty,
    pub reason: &'static str,
    pub urgency: UrgencyRule,
}

/// Keyword rules in priority order; the first rule with a keyword found in
/// any condition name wins.
pub const SPECIALIST_RULES: &[SpecialistRule] = &[
    SpecialistRule {
        keywords: &["heart", "chest pain", "angina", "arrhythmia"],
        specialty: MedicalSpecialty::Cardiologist,
        reason: "Cardiac evaluation recommended",
        urgency: UrgencyRule::UrgentAtCareLevel(CareLevel::UrgentCare),
    },
    SpecialistRule {
        keywords: &["migraine", "seizure", "stroke", "neuropathy"],
        specialty: MedicalSpecialty::Neurologist,
        reason: "Neurological evaluation suggested",
        urgency: UrgencyRule::UrgentWhenMentioned("stroke"),
    },
    SpecialistRule {
        keywords: &["asthma", "copd", "pneumonia", "shortness of breath"],
        specialty: MedicalSpecialty::Pulmonologist,
        reason: "Respiratory evaluation recommended",
        urgency: UrgencyRule::UrgentWhenMentioned("pneumonia"),
    },
    SpecialistRule {
        keywords: &["diabetes", "thyroid"],
        specialty: MedicalSpecialty::Endocrinologist,
        reason: "Metabolic/hormonal evaluation needed",
        urgency: UrgencyRule::Routine,
    },
];

const EMERGENCY_REASON: &str = "Immediate medical attention required";
const DEFAULT_REASON: &str = "Initial evaluation and referral if needed";

fn mentions(conditions: &[String], keyword: &str) -> bool {
    conditions.iter().any(|c| c.contains(keyword))
}

impl SpecialistRule {
    fn matches(&self, conditions: &[String]) -> bool {
        self.keywords.iter().any(|k| mentions(conditions, k))
    }

    fn urgency(&self, conditions: &[String], care_level: CareLevel) -> Urgency {
        let urgent = match self.urgency {
            UrgencyRule::Routine => false,
            UrgencyRule::UrgentAtCareLevel(level) => care_level == level,
            UrgencyRule::UrgentWhenMentioned(keyword) => mentions(conditions, keyword),
        };

        if urgent {
            Urgency::Urgent
        } else {
            Urgency::Routine
        }
    }
}

/// Pick exactly one specialist referral for a diagnosis.
///
/// An emergency care level always sends the patient to the emergency room.
/// Otherwise the first rule in [`SPECIALIST_RULES`] whose keyword appears
/// in a condition name decides, falling back to primary care.
pub fn recommend_specialist(
    conditions: &[ConditionLikelihood],
    care_level: CareLevel,
) -> DoctorRecommendation {
    if care_level == CareLevel::Emergency {
        return DoctorRecommendation {
            specialty: MedicalSpecialty::EmergencyRoom,
            reason: EMERGENCY_REASON.to_string(),
            urgency: Urgency::Emergency,
        };
    }

    let names: Vec<String> = conditions.iter().map(|c| c.name.to_lowercase()).collect();

    match SPECIALIST_RULES.iter().find(|rule| rule.matches(&names)) {
        Some(rule) => DoctorRecommendation {
            specialty: rule.specialty,
            reason: rule.reason.to_string(),
            urgency: rule.urgency(&names, care_level),
        },
        None => DoctorRecommendation {
            specialty: MedicalSpecialty::PrimaryCarePhysician,
            reason: DEFAULT_REASON.to_string(),
            urgency: Urgency::Routine,
        },
    }
}

impl DiagnosisInput {
    pub fn recommend(&self) -> DoctorRecommendation {
        recommend_specialist(&self.conditions, self.care_level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conditions(names: &[&str]) -> Vec<ConditionLikelihood> {
        names
            .iter()
            .map(|name| ConditionLikelihood {
                name: name.to_string(),
                probability: 0.5,
            })
            .collect()
    }

    #[test]
    fn test_emergency_overrides_everything() {
        let rec = recommend_specialist(&[], CareLevel::Emergency);
        assert_eq!(rec.specialty, MedicalSpecialty::EmergencyRoom);
        assert_eq!(rec.urgency, Urgency::Emergency);
        assert_eq!(rec.reason, "Immediate medical attention required");

        let rec = recommend_specialist(&conditions(&["Chest pain"]), CareLevel::Emergency);
        assert_eq!(rec.specialty, MedicalSpecialty::EmergencyRoom);
    }

    #[test]
    fn test_cardiac_urgency_follows_care_level() {
        let chest_pain = vec![ConditionLikelihood {
            name: "chest pain".to_string(),
            probability: 0.9,
        }];

        let rec = recommend_specialist(&chest_pain, CareLevel::UrgentCare);
        assert_eq!(rec.specialty, MedicalSpecialty::Cardiologist);
        assert_eq!(rec.urgency, Urgency::Urgent);

        let rec = recommend_specialist(&chest_pain, CareLevel::Specialist);
        assert_eq!(rec.specialty, MedicalSpecialty::Cardiologist);
        assert_eq!(rec.urgency, Urgency::Routine);
    }

    #[test]
    fn test_neurological_urgent_only_for_stroke() {
        let rec = recommend_specialist(&conditions(&["Migraine"]), CareLevel::PrimaryCare);
        assert_eq!(rec.specialty, MedicalSpecialty::Neurologist);
        assert_eq!(rec.urgency, Urgency::Routine);

        let rec = recommend_specialist(
            &conditions(&["Migraine", "Transient ischemic attack (mini-stroke)"]),
            CareLevel::PrimaryCare,
        );
        assert_eq!(rec.specialty, MedicalSpecialty::Neurologist);
        assert_eq!(rec.urgency, Urgency::Urgent);
    }

    #[test]
    fn test_respiratory_urgent_only_for_pneumonia() {
        let rec = recommend_specialist(&conditions(&["Asthma"]), CareLevel::Specialist);
        assert_eq!(rec.specialty, MedicalSpecialty::Pulmonologist);
        assert_eq!(rec.urgency, Urgency::Routine);

        let rec = recommend_specialist(&conditions(&["Bacterial Pneumonia"]), CareLevel::SelfCare);
        assert_eq!(rec.specialty, MedicalSpecialty::Pulmonologist);
        assert_eq!(rec.urgency, Urgency::Urgent);
    }

    #[test]
    fn test_endocrine_is_routine() {
        let rec = recommend_specialist(&conditions(&["Type 2 Diabetes"]), CareLevel::UrgentCare);
        assert_eq!(rec.specialty, MedicalSpecialty::Endocrinologist);
        assert_eq!(rec.urgency, Urgency::Routine);
        assert_eq!(rec.reason, "Metabolic/hormonal evaluation needed");
    }

    #[test]
    fn test_default_is_primary_care() {
        let common_cold = vec![ConditionLikelihood {
            name: "common cold".to_string(),
            probability: 0.5,
        }];

        let rec = recommend_specialist(&common_cold, CareLevel::SelfCare);
        assert_eq!(rec.specialty, MedicalSpecialty::PrimaryCarePhysician);
        assert_eq!(rec.urgency, Urgency::Routine);
        assert_eq!(rec.reason, "Initial evaluation and referral if needed");

        let rec = recommend_specialist(&[], CareLevel::UrgentCare);
        assert_eq!(rec.specialty, MedicalSpecialty::PrimaryCarePhysician);
    }

    #[test]
    fn test_cascade_order_wins_over_condition_order() {
        // Diabetes is listed first but the cardiac rule has priority
        let rec = recommend_specialist(
            &conditions(&["Diabetes", "Migraine", "Arrhythmia"]),
            CareLevel::Specialist,
        );
        assert_eq!(rec.specialty, MedicalSpecialty::Cardiologist);
    }

    #[test]
    fn test_substring_matching() {
        let rec = recommend_specialist(&conditions(&["Heartburn"]), CareLevel::SelfCare);
        assert_eq!(rec.specialty, MedicalSpecialty::Cardiologist);
    }

    #[test]
    fn test_wire_format() {
        let input: DiagnosisInput = serde_json::from_str(
            r#"{"conditions": [{"name": "Chest pain", "probability": 0.9}], "careLevel": "urgent care"}"#,
        )
        .unwrap();
        assert_eq!(input.care_level, CareLevel::UrgentCare);

        let json = serde_json::to_value(input.recommend()).unwrap();
        assert_eq!(json["specialty"], "Cardiologist");
        assert_eq!(json["urgency"], "urgent");

        let input: DiagnosisInput =
            serde_json::from_str(r#"{"careLevel": "emergency"}"#).unwrap();
        let json = serde_json::to_value(input.recommend()).unwrap();
        assert_eq!(json["specialty"], "Emergency Room");
        assert_eq!(json["urgency"], "emergency");
    }

    #[test]
    fn test_care_level_aliases() {
        for (raw, expected) in [
            ("\"primary\"", CareLevel::PrimaryCare),
            ("\"urgent\"", CareLevel::UrgentCare),
            ("\"self-care\"", CareLevel::SelfCare),
            ("\"specialist\"", CareLevel::Specialist),
        ] {
            let level: CareLevel = serde_json::from_str(raw).unwrap();
            assert_eq!(level, expected);
        }
        assert!(serde_json::from_str::<CareLevel>("\"hospital\"").is_err());
    }
}
