//! Output generation

mod yaml;

pub use yaml::{EmitError, EmitterOptions, YamlEmitter};
