//! Fixed detection patterns
//!
//! English-only, case-insensitive heuristics. Paraphrases and other
//! languages slip through; that is accepted.

use regex::Regex;

fn compile_one(pattern: &str) -> Regex {
    Regex::new(&format!("(?i){pattern}")).expect("detection patterns are compile-time constants")
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().map(|p| compile_one(p)).collect()
}

// ============================================================================
// Pattern Sources
// ============================================================================

const INJECTION_SOURCES: &[&str] = &[
    r"ignore\s+(all\s+)?(previous|above|prior)\s+(instructions?|prompts?)",
    r"disregard\s+(all\s+)?(previous|above|prior)",
    r"forget\s+(everything|all)\s+(you\s+)?(know|learned)",
    r"you\s+are\s+now\s+(a\s+)?new\s+(ai|assistant|bot)",
    r"system\s*:\s*you\s+are",
    r"\[SYSTEM\]",
    r"<\|im_start\|>",
    r"<\|system\|>",
    r"jailbreak",
    r"DAN\s*mode",
];

const LEAKY_SOURCES: &[&str] = &[
    r"reveal\s+(your|the)\s+(system|initial)\s+(prompt|instructions?)",
    r"what\s+(is|are)\s+your\s+(system|initial)\s+(prompt|instructions?)",
    r"show\s+(me\s+)?(your|the)\s+(original|system)",
    r"repeat\s+(the\s+)?(previous|above|system)",
];

const CONFLICT_SOURCES: &[(&str, &str)] = &[
    (r"always\s+respond\s+in\s+json", r"never\s+use\s+json"),
    (r"be\s+(very\s+)?concise", r"be\s+(very\s+)?detailed"),
    (r"formal\s+(tone|language)", r"casual\s+(tone|language)"),
];

// ============================================================================
// Compiled Patterns
// ============================================================================

/// A pair of instructions that contradict each other when both are present
#[derive(Debug)]
pub(crate) struct ConflictPair {
    pub positive: Regex,
    pub negative: Regex,
}

impl ConflictPair {
    pub fn matches(&self, text: &str) -> bool {
        self.positive.is_match(text) && self.negative.is_match(text)
    }
}

lazy_static::lazy_static! {
    /// Attempts to override the system behavior
    pub(crate) static ref INJECTION_PATTERNS: Vec<Regex> = compile(INJECTION_SOURCES);

    /// Requests to disclose the system prompt
    pub(crate) static ref LEAKY_PATTERNS: Vec<Regex> = compile(LEAKY_SOURCES);

    pub(crate) static ref CONFLICT_PAIRS: Vec<ConflictPair> = CONFLICT_SOURCES
        .iter()
        .map(|(positive, negative)| ConflictPair {
            positive: compile_one(positive),
            negative: compile_one(negative),
        })
        .collect();

    /// Brace-delimited spans, shortest match
    pub(crate) static ref BRACE_SPAN: Regex = Regex::new(r"(?s)\{.*?\}")
        .expect("brace pattern is a compile-time constant");
}
