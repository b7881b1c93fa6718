//! Predefined prompt-improvement challenges.
//!
//! The catalog is a fixed in-memory list; there is no way to add challenges
//! at runtime.

use serde::{Deserialize, Serialize};

/// A challenge pairs a deliberately weak base prompt with the criteria a
/// better prompt should satisfy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    pub id: String,
    pub title: String,
    pub description: String,
    pub base_prompt: String,
    pub criteria: String,
}

/// Public view of a challenge, without the base prompt and criteria.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicChallenge<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub description: &'a str,
}

impl Challenge {
    fn new(id: &str, title: &str, description: &str, base_prompt: &str, criteria: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            base_prompt: base_prompt.to_string(),
            criteria: criteria.to_string(),
        }
    }

    pub fn public(&self) -> PublicChallenge<'_> {
        PublicChallenge {
            id: &self.id,
            title: &self.title,
            description: &self.description,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChallengeCatalog {
    challenges: Vec<Challenge>,
}

impl Default for ChallengeCatalog {
    fn default() -> Self {
        Self::predefined()
    }
}

impl ChallengeCatalog {
    pub fn new(challenges: Vec<Challenge>) -> Self {
        Self { challenges }
    }

    /// The challenges shipped with the service.
    pub fn predefined() -> Self {
        Self::new(vec![
            Challenge::new(
                "challenge1",
                "Explicación de conceptos científicos",
                "Cómo explicar la teoría de la relatividad a estudiantes de secundaria",
                "Explica la teoría de la relatividad",
                "claridad, uso de analogías, adaptación a nivel educativo secundaria",
            ),
            Challenge::new(
                "challenge2",
                "Redacción creativa",
                "Crear una historia corta de ciencia ficción sobre viajes en el tiempo",
                "Escribe una historia corta sobre viajes en el tiempo",
                "originalidad, coherencia narrativa, desarrollo de personajes",
            ),
            Challenge::new(
                "challenge3",
                "Resolución de problemas",
                "Cómo ayudar a un equipo a resolver conflictos internos",
                "Dame consejos para resolver conflictos en un equipo",
                "aplicabilidad práctica, consideración de diferentes perspectivas, claridad en los pasos a seguir",
            ),
        ])
    }

    pub fn get(&self, id: &str) -> Option<&Challenge> {
        self.challenges.iter().find(|challenge| challenge.id == id)
    }

    pub fn public_list(&self) -> Vec<PublicChallenge<'_>> {
        self.challenges.iter().map(Challenge::public).collect()
    }

    pub fn len(&self) -> usize {
        self.challenges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.challenges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_id() {
        let catalog = ChallengeCatalog::predefined();
        let challenge = catalog.get("challenge2").expect("challenge2 exists");
        assert_eq!(challenge.title, "Redacción creativa");
        assert!(catalog.get("challenge99").is_none());
    }

    #[test]
    fn public_view_strips_prompt_and_criteria() {
        let catalog = ChallengeCatalog::predefined();
        let json = serde_json::to_value(catalog.public_list()).unwrap();
        let first = &json[0];
        assert_eq!(first["id"], "challenge1");
        assert!(first.get("basePrompt").is_none());
        assert!(first.get("criteria").is_none());
        assert_eq!(json.as_array().unwrap().len(), catalog.len());
    }
}
