//! Service layer for doccheck
//!
//! File acceptance, the checking API client and the session state shared by
//! the CLI and the web front-end.

pub mod checker_client;
pub mod document_file;
pub mod messages;
pub mod session;

// Re-export commonly used types
pub use checker_client::{rejection_message, CheckError, CheckerClient, DocumentChecker};
pub use document_file::{DocumentFile, FileError, DOCX_MIME};
pub use messages::{Locale, Message};
pub use session::{Session, SessionView};
