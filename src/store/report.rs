use std::fmt::{self, Write};

use crate::evaluator::Evaluation;

use super::record::EvaluationRecord;

const UNAVAILABLE: &str = "No disponible";
const RULE: &str = "-----------";

/// Human-readable report written next to each JSON record.
pub fn render_report(record: &EvaluationRecord) -> String {
    let mut out = String::new();
    match write_report(&mut out, record) {
        Ok(()) => out,
        Err(_) => String::new(),
    }
}

fn write_report(out: &mut impl Write, record: &EvaluationRecord) -> fmt::Result {
    let result = &record.result;
    let challenge = record.challenge_details.as_ref();

    writeln!(out, "EVALUACIÓN DE PROMPTS")?;
    writeln!(out, "=====================")?;
    writeln!(out, "Usuario: {}", result.user_id)?;
    writeln!(out, "Fecha: {}", result.timestamp.format("%Y-%m-%d %H:%M:%S UTC"))?;
    writeln!(
        out,
        "Reto: {}\n",
        challenge.map_or(result.challenge_id.as_str(), |c| c.title.as_str())
    )?;
    writeln!(out, "Descripción: {}", challenge.map_or(UNAVAILABLE, |c| c.description.as_str()))?;
    writeln!(out, "Prompt base: {}", challenge.map_or(UNAVAILABLE, |c| c.base_prompt.as_str()))?;
    writeln!(out, "Criterios: {}\n", challenge.map_or(UNAVAILABLE, |c| c.criteria.as_str()))?;

    match &result.evaluation {
        Evaluation::RawText(text) => {
            writeln!(out, "RESULTADO COMPLETO:\n{text}")?;
            if let Some(error) = &result.error {
                writeln!(out, "\nERROR: {error}")?;
            }
        }
        Evaluation::Structured(evaluation) => {
            writeln!(out, "PUNTUACIONES\n{RULE}")?;
            writeln!(out, "Prompt Base: {}", evaluation.score1)?;
            writeln!(out, "Prompt Mejorado: {}\n", evaluation.score2)?;
            for (title, body) in [
                ("JUSTIFICACIÓN", &evaluation.justification),
                ("CONCLUSIÓN", &evaluation.conclusion),
                ("RECOMENDACIONES", &evaluation.recommendations),
            ] {
                writeln!(out, "{title}\n{RULE}\n{body}\n")?;
            }
            writeln!(out, "RESPUESTA COMPLETA\n{RULE}\n{}", evaluation.raw_response)?;
        }
    }
    Ok(())
}
