pub mod check_result;
pub mod config;

pub use check_result::{AiSuggestion, BlockKind, CheckResult, CheckSummary, ErrorDetail, Paragraph, Run};
pub use config::{ConfigError, DocCheckConfig, ServerConfig};
