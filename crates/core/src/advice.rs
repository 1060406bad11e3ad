//! Self-care advice for common conditions

const GENERAL_ADVICE: &[&str] = &[
    "Consult with a healthcare professional for proper diagnosis",
    "Track your symptoms and their frequency",
    "Stay hydrated and get adequate rest",
];

const CONDITION_ADVICE: &[(&str, &[&str])] = &[
    (
        "migraine",
        &[
            "Avoid known trigger foods like chocolate or aged cheese",
            "Consider keeping a headache journal",
            "Reduce exposure to bright lights and loud noises during episodes",
        ],
    ),
    (
        "common cold",
        &[
            "Get plenty of rest and stay hydrated",
            "Use over-the-counter medications to relieve symptoms",
            "Consider using a humidifier to ease congestion",
        ],
    ),
    (
        "flu",
        &[
            "Rest and avoid contact with others to prevent spread",
            "Take fever-reducing medications as needed",
            "Seek medical attention if symptoms worsen significantly",
        ],
    ),
    (
        "covid-19",
        &[
            "Isolate yourself to prevent spreading the virus",
            "Monitor your oxygen levels if possible",
            "Seek immediate medical attention if you experience difficulty breathing",
        ],
    ),
    (
        "allergies",
        &[
            "Identify and avoid allergen triggers when possible",
            "Consider over-the-counter antihistamines",
            "Use air purifiers to reduce indoor allergens",
        ],
    ),
];

/// Advice for a named condition.
///
/// Known conditions (exact name, case-insensitive) get their specific tips
/// followed by the first general tip; anything else gets the general tips.
pub fn care_advice(condition: &str) -> Vec<&'static str> {
    let condition = condition.trim().to_lowercase();

    match CONDITION_ADVICE.iter().find(|(name, _)| *name == condition) {
        Some((_, specific)) => specific
            .iter()
            .chain(GENERAL_ADVICE.iter().take(1))
            .copied()
            .collect(),
        None => GENERAL_ADVICE.to_vec(),
    }
}
