//! Rewrites judge prose so it talks about the candidate rather than the
//! baseline it was compared with.

use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};

/// Phrases the judge is asked to use, and the neutral wording that replaces
/// surviving baseline references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusTerms {
    pub baseline: &'static str,
    pub candidate: &'static str,
    pub neutral: &'static str,
}

pub const PROMPT_TERMS: FocusTerms = FocusTerms {
    baseline: "prompt predeterminado",
    candidate: "prompt del usuario",
    neutral: "prompt que propone el reto",
};

pub const TEXT_TERMS: FocusTerms = FocusTerms {
    baseline: "texto predeterminado",
    candidate: "texto del usuario",
    neutral: "texto de referencia",
};

#[derive(Debug)]
pub struct FocusFilter {
    terms: FocusTerms,
    baseline_label: Regex,
    candidate_label: Regex,
    comparisons: Vec<(Regex, String)>,
    baseline: Regex,
}

fn compile(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .expect("built-in pattern compiles")
}

impl FocusFilter {
    pub fn new(terms: FocusTerms) -> Self {
        let b = regex::escape(terms.baseline);
        let c = regex::escape(terms.candidate);
        Self {
            terms,
            baseline_label: compile(r"\b(?:prompt|texto)\s+1\b"),
            candidate_label: compile(r"\b(?:prompt|texto)\s+2\b"),
            comparisons: vec![
                (
                    compile(&format!(r"el {b} es (?:mejor|peor) que el {c}[^.]*\.")),
                    String::new(),
                ),
                (
                    compile(&format!(r"[^.]*?comparad[oa] con el {b}[^.]*\.")),
                    String::new(),
                ),
                (
                    compile(&format!(r"[^.]*?a diferencia del {b}[^.]*\.")),
                    String::new(),
                ),
                (
                    compile(&format!(r"el {b}[^.]*?mientras que el {c}")),
                    format!("El {}", terms.candidate),
                ),
            ],
            baseline: compile(&b),
        }
    }

    /// Filter for prompt-vs-prompt evaluations.
    pub fn prompts() -> &'static FocusFilter {
        static FILTER: OnceLock<FocusFilter> = OnceLock::new();
        FILTER.get_or_init(|| FocusFilter::new(PROMPT_TERMS))
    }

    /// Filter for text-vs-text evaluations.
    pub fn texts() -> &'static FocusFilter {
        static FILTER: OnceLock<FocusFilter> = OnceLock::new();
        FILTER.get_or_init(|| FocusFilter::new(TEXT_TERMS))
    }

    /// Applies the filter:
    /// 1. numbered references become the baseline/candidate terms,
    /// 2. direct comparison sentences are removed,
    /// 3. sentences that mention the baseline but not the candidate are dropped,
    /// 4. remaining baseline references get neutral wording.
    pub fn apply(&self, text: &str) -> String {
        let mut processed = self
            .baseline_label
            .replace_all(text, regex::NoExpand(self.terms.baseline))
            .into_owned();
        processed = self
            .candidate_label
            .replace_all(&processed, regex::NoExpand(self.terms.candidate))
            .into_owned();

        for (pattern, replacement) in &self.comparisons {
            processed = pattern
                .replace_all(&processed, regex::NoExpand(replacement))
                .into_owned();
        }

        let kept = self.drop_baseline_only(&processed);
        self.baseline
            .replace_all(&kept, regex::NoExpand(self.terms.neutral))
            .trim()
            .to_string()
    }

    fn drop_baseline_only(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for (sentence, separator) in split_sentences(text) {
            let lower = sentence.to_lowercase();
            if lower.contains(self.terms.baseline) && !lower.contains(self.terms.candidate) {
                continue;
            }
            out.push_str(sentence);
            out.push_str(separator);
        }
        out
    }
}

/// Splits text into sentences. A sentence ends at `.`, `!` or `?` followed by
/// whitespace; each sentence is paired with the whitespace that follows it.
pub fn split_sentences(text: &str) -> Vec<(&str, &str)> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((_, ch)) = chars.next() {
        if !matches!(ch, '.' | '!' | '?') {
            continue;
        }
        let Some(&(sentence_end, next)) = chars.peek() else {
            break;
        };
        if !next.is_whitespace() {
            continue;
        }
        let mut gap_end = sentence_end;
        while let Some(&(idx, c)) = chars.peek() {
            if !c.is_whitespace() {
                break;
            }
            gap_end = idx + c.len_utf8();
            chars.next();
        }
        parts.push((&text[start..sentence_end], &text[sentence_end..gap_end]));
        start = gap_end;
    }

    if start < text.len() {
        parts.push((&text[start..], ""));
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_only_sentence_is_removed() {
        let text = "El prompt predeterminado es demasiado vago. El prompt del usuario define el público.";
        assert_eq!(
            FocusFilter::prompts().apply(text),
            "El prompt del usuario define el público."
        );
    }

    #[test]
    fn sentence_mentioning_both_is_kept_with_neutral_wording() {
        let text = "El prompt del usuario es más claro que el prompt predeterminado.";
        assert_eq!(
            FocusFilter::prompts().apply(text),
            "El prompt del usuario es más claro que el prompt que propone el reto."
        );
    }

    #[test]
    fn numbered_references_are_renamed() {
        let text = "Prompt 2 añade contexto! Prompt 1 no lo hace.";
        assert_eq!(FocusFilter::prompts().apply(text), "prompt del usuario añade contexto!");
    }

    #[test]
    fn direct_comparisons_are_removed() {
        let text = "Buen trabajo. Comparado con el prompt predeterminado, gana claridad. Sigue así.";
        assert_eq!(FocusFilter::prompts().apply(text), "Buen trabajo. Sigue así.");

        let text = "El prompt predeterminado es peor que el prompt del usuario en todo. Fin.";
        assert_eq!(FocusFilter::prompts().apply(text), "Fin.");
    }

    #[test]
    fn while_clause_keeps_candidate_half() {
        let text = "El prompt predeterminado es genérico mientras que el prompt del usuario concreta el tono.";
        assert_eq!(
            FocusFilter::prompts().apply(text),
            "El prompt del usuario concreta el tono."
        );
    }

    #[test]
    fn text_terms_use_their_own_vocabulary() {
        let text = "Texto 1 es plano. El texto del usuario mejora al texto predeterminado.";
        assert_eq!(
            FocusFilter::texts().apply(text),
            "El texto del usuario mejora al texto de referencia."
        );
    }

    #[test]
    fn list_formatting_survives() {
        let text = "- Añade ejemplos.\n- Acota la longitud.";
        assert_eq!(FocusFilter::prompts().apply(text), text);
    }

    #[test]
    fn split_keeps_separators() {
        let parts = split_sentences("Uno. Dos!\n\nTres? cuatro");
        assert_eq!(
            parts,
            vec![("Uno.", " "), ("Dos!", "\n\n"), ("Tres?", " "), ("cuatro", "")]
        );
    }

    #[test]
    fn decimal_points_do_not_split() {
        let parts = split_sentences("Obtiene 8.5 puntos. Bien.");
        assert_eq!(parts, vec![("Obtiene 8.5 puntos.", " "), ("Bien.", "")]);
    }
}
