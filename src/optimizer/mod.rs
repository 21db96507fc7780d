//! # Optimizer Module
//!
//! Modulo che separa le responsabilità in sottomoduli:
//! - `media_optimizer`: Orchestratore principale
//! - `task_optimizer`: Worker per singoli file
//! - `path_resolver`: Logica di calcolo path centralizzata
//! - `reporter`: Report testuale o JSON

pub mod media_optimizer;
pub mod path_resolver;
pub mod reporter;
pub mod task_optimizer;

pub use media_optimizer::{MediaOptimizer, RunSummary};
pub use path_resolver::PathResolver;
pub use reporter::Reporter;
pub use task_optimizer::TaskOptimizer;
