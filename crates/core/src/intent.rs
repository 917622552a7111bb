use crate::models::Intent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    Contains,
    ContainsIgnoreCase,
    EqualsIgnoreCase,
}

#[derive(Debug, Clone, Copy)]
pub struct KeywordSet {
    pub mode: MatchMode,
    pub keywords: &'static [&'static str],
}

#[derive(Debug, Clone, Copy)]
pub struct IntentRule {
    pub intent: Intent,
    pub any_of: &'static [KeywordSet],
}

// First match wins.
pub const INTENT_RULES: &[IntentRule] = &[
    IntentRule {
        intent: Intent::ViewPackages,
        any_of: &[KeywordSet {
            mode: MatchMode::Contains,
            keywords: &["แพ็กเกจ", "ราคา", "ประกัน", "package", "price", "insurance"],
        }],
    },
    IntentRule {
        intent: Intent::StartClaim,
        any_of: &[KeywordSet {
            mode: MatchMode::Contains,
            keywords: &[
                "เคลม",
                "รถชน",
                "แจ้งเหตุ",
                "claim",
                "collision",
                "incident report",
            ],
        }],
    },
    IntentRule {
        intent: Intent::Greeting,
        any_of: &[
            KeywordSet {
                mode: MatchMode::ContainsIgnoreCase,
                keywords: &["สวัสดี", "hello", "hi"],
            },
            KeywordSet {
                mode: MatchMode::EqualsIgnoreCase,
                keywords: &["หวัดดี"],
            },
        ],
    },
];

pub fn normalize_text(input: &str) -> String {
    input.trim().to_string()
}

pub fn classify_intent(text: &str) -> Intent {
    classify_with_rules(INTENT_RULES, text)
}

pub fn classify_with_rules(rules: &[IntentRule], text: &str) -> Intent {
    let lower = text.to_lowercase();

    rules
        .iter()
        .find(|rule| {
            rule.any_of
                .iter()
                .any(|set| keyword_set_matches(set, text, &lower))
        })
        .map(|rule| rule.intent)
        .unwrap_or(Intent::Fallback)
}

fn keyword_set_matches(set: &KeywordSet, raw: &str, lower: &str) -> bool {
    match set.mode {
        MatchMode::Contains => contains_any(raw, set.keywords),
        MatchMode::ContainsIgnoreCase => contains_any(lower, set.keywords),
        MatchMode::EqualsIgnoreCase => set.keywords.contains(&lower),
    }
}

fn contains_any(input: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| input.contains(needle))
}
