use super::focus::{FocusTerms, PROMPT_TERMS, TEXT_TERMS};

/// What is being compared. Decides the vocabulary of the outbound prompt and
/// which focus terms apply to the reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    /// Two prompts from a predefined challenge.
    Prompts,
    /// Two free-form texts supplied by the caller.
    Texts,
}

impl Subject {
    pub fn terms(&self) -> FocusTerms {
        match self {
            Subject::Prompts => PROMPT_TERMS,
            Subject::Texts => TEXT_TERMS,
        }
    }

    fn noun(&self) -> &'static str {
        match self {
            Subject::Prompts => "prompt",
            Subject::Texts => "texto",
        }
    }

    fn plural(&self) -> &'static str {
        match self {
            Subject::Prompts => "prompts",
            Subject::Texts => "textos",
        }
    }

    fn labels(&self) -> (&'static str, &'static str) {
        match self {
            Subject::Prompts => ("Prompt 1 (Base)", "Prompt 2 (Mejorado)"),
            Subject::Texts => ("Texto 1", "Texto 2"),
        }
    }

    /// Message shown to the user when the evaluation could not be produced.
    pub fn failure_message(&self) -> String {
        format!(
            "Error al evaluar los {}. Por favor, intente nuevamente.",
            self.plural()
        )
    }
}

/// Builds the instruction sent to the judge model. The five labels requested
/// here are the ones the reply parser looks for.
pub fn build_comparison_prompt(
    subject: Subject,
    criteria: &str,
    baseline: &str,
    candidate: &str,
) -> String {
    let noun = subject.noun();
    let plural = subject.plural();
    let terms = subject.terms();
    let (baseline_label, candidate_label) = subject.labels();
    let (first, second) = match subject {
        Subject::Prompts => ("Prompt 1", "Prompt 2"),
        Subject::Texts => ("Texto 1", "Texto 2"),
    };

    format!(
        r#"Eres un evaluador experto de {plural}. Analiza estos dos {plural} y determina cuál cumple mejor el objetivo: "{criteria}".

{baseline_label}: {baseline}

{candidate_label}: {candidate}

INSTRUCCIONES DE FORMATO:
- Puedes usar formato Markdown para resaltar puntos importantes (**negrita**, *cursiva*, listas con - o 1. etc.)
- Mantén una estructura clara con párrafos separados por líneas en blanco
- Usa **negrita** para destacar aspectos clave
- Cuando te refieras a los {plural}, usa "{baseline_term}" y "{candidate_term}" en lugar de "{first}" y "{second}"
- En la JUSTIFICACIÓN, enfócate en analizar el "{candidate_term}", sus fortalezas y debilidades
- En la CONCLUSIÓN, evalúa principalmente el {candidate_term} y sus méritos propios
- En las RECOMENDACIONES, concéntrate en mejorar el {candidate_term} independientemente de su puntuación

Debes seguir ESTRICTAMENTE este formato en tu respuesta (sin desviarte):

PUNTUACIÓN TEXTO 1: [un número entre 0.00 y 100.00 con exactamente dos decimales]
PUNTUACIÓN TEXTO 2: [un número entre 0.00 y 100.00 con exactamente dos decimales]
JUSTIFICACIÓN: [tu análisis detallado del {noun} del usuario, usa Markdown para formatear]
CONCLUSIÓN: [indica claramente las fortalezas o debilidades del {noun} del usuario en 1-2 frases]
RECOMENDACIONES: [sugiere al menos 3 formas concretas de mejorar el {noun} del usuario, usa listas con -]"#,
        baseline_term = terms.baseline,
        candidate_term = terms.candidate,
    )
}
