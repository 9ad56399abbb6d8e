//! Value objects - Immutable objects defined by their attributes

mod dialogue_script;
mod dialogue_token;
mod export;
mod quest_progress;
mod step_ref;

// Dialogue script tokenizer
pub use dialogue_script::tokenize;
pub use dialogue_token::{leaves, reconstruct, ParamKind, Token, TokenKind};

// Export file naming
pub use export::{export_file_name, ExportKind, Exportable};

// Runtime quest state used by dialogue selection
pub use quest_progress::QuestProgress;
pub use step_ref::StepRef;
