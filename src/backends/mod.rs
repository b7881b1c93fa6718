//! Clients for external text-generation services.

pub mod openai_compatible;
