#[path = "builder/backend.rs"]
mod backend;

#[path = "builder/generator_builder.rs"]
mod generator_builder;

pub use backend::Backend;
pub use generator_builder::GeneratorBuilder;
