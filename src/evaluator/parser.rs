use std::sync::OnceLock;

use regex::Regex;

use super::focus::FocusFilter;
use super::types::StructuredEvaluation;

pub const NO_JUSTIFICATION: &str = "No se proporcionó justificación.";
pub const NO_CONCLUSION: &str = "No se proporcionó conclusión.";
pub const NO_RECOMMENDATIONS: &str = "No se proporcionaron recomendaciones.";

const SCORE_MIN: f64 = 0.0;
const SCORE_MAX: f64 = 100.0;
const REASONING_END: &str = "</think>";

/// Sections found in a judge reply. `None` means the label was absent, which
/// is distinct from a label followed by nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedSections {
    pub baseline_score: Option<f64>,
    pub candidate_score: Option<f64>,
    pub justification: Option<String>,
    pub conclusion: Option<String>,
    pub recommendations: Option<String>,
}

struct Patterns {
    baseline_score: Regex,
    candidate_score: Regex,
    justification: Regex,
    conclusion: Regex,
    recommendations: Regex,
}

impl Patterns {
    fn compile() -> Self {
        Self {
            baseline_score: compile(&score_pattern(1)),
            candidate_score: compile(&score_pattern(2)),
            justification: compile(&label_pattern("JUSTIFICACI[ÓO]N")),
            conclusion: compile(&label_pattern("CONCLUSI[ÓO]N")),
            recommendations: compile(&label_pattern("RECOMENDACIONES")),
        }
    }
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(Patterns::compile)
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in pattern compiles")
}

// Labels may arrive wrapped in markdown bold.
fn label_pattern(label: &str) -> String {
    format!(r"(?i)\**[ \t]*{label}\**[ \t]*:[ \t]*\**")
}

fn score_pattern(index: u8) -> String {
    format!(r"(?i)PUNTUACI[ÓO]N\s+TEXTO\s+{index}\**\s*:[\s*]*([-+]?\d+(?:[.,]\d+)?)")
}

/// Locates the five labelled sections of a reply.
///
/// Anything before the last reasoning block terminator is ignored so that a
/// model thinking aloud about the format cannot shadow the real answer.
pub fn parse_sections(reply: &str) -> ParsedSections {
    let text = match reply.rfind(REASONING_END) {
        Some(idx) => &reply[idx + REASONING_END.len()..],
        None => reply,
    };
    let p = patterns();

    ParsedSections {
        baseline_score: score(text, &p.baseline_score),
        candidate_score: score(text, &p.candidate_score),
        justification: section(text, &p.justification, Some(&p.conclusion)),
        conclusion: section(text, &p.conclusion, Some(&p.recommendations)),
        recommendations: section(text, &p.recommendations, None),
    }
}

fn score(text: &str, pattern: &Regex) -> Option<f64> {
    pattern
        .captures(text)
        .and_then(|caps| caps[1].replace(',', ".").parse().ok())
}

fn section(text: &str, label: &Regex, next: Option<&Regex>) -> Option<String> {
    let found = label.find(text)?;
    let rest = &text[found.end()..];
    let end = next
        .and_then(|re| re.find(rest))
        .map_or(rest.len(), |m| m.start());
    Some(rest[..end].trim().to_string())
}

/// Clamps into [0, 100] and renders exactly two decimals. Missing scores
/// count as zero.
pub fn format_score(score: Option<f64>) -> String {
    let value = score.filter(|v| v.is_finite()).unwrap_or(SCORE_MIN);
    // adding +0.0 turns -0.0 into 0.0
    let clamped = value.clamp(SCORE_MIN, SCORE_MAX) + 0.0;
    format!("{clamped:.2}")
}

/// Builds the structured evaluation for a reply, filling placeholders for
/// missing sections and optionally refocusing the prose on the candidate.
pub fn build_structured(reply: &str, focus: Option<&FocusFilter>) -> StructuredEvaluation {
    let sections = parse_sections(reply);
    let text = |value: Option<String>, placeholder: &str| match value {
        Some(content) => match focus {
            Some(filter) => filter.apply(&content),
            None => content,
        },
        None => placeholder.to_string(),
    };

    StructuredEvaluation {
        score1: format_score(sections.baseline_score),
        score2: format_score(sections.candidate_score),
        justification: text(sections.justification, NO_JUSTIFICATION),
        conclusion: text(sections.conclusion, NO_CONCLUSION),
        recommendations: text(sections.recommendations, NO_RECOMMENDATIONS),
        raw_response: reply.to_string(),
    }
}
