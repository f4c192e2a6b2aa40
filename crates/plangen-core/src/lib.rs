//! Plangen Core - learning plan content generation pipeline
//!
//! This crate turns an operator's choices into a prompt, sends it to a
//! chat-completion endpoint and stores the returned markdown under a plans
//! directory.
//!
//! # Main Components
//!
//! - **Catalog**: fixed lookup tables (domains, difficulties, categories, ...)
//! - **Request**: the validated [`GenerationRequest`] record
//! - **Prompt**: pure rendering of a request into instruction text
//! - **Client**: single-shot chat-completion client over `reqwest`
//! - **Writer**: folder and filename derivation plus YAML front matter
//! - **Plans**: best-effort title discovery from existing plan files
//!
//! # Example
//!
//! ```no_run
//! use plangen_core::{Catalog, Difficulty, GenerationMode, GenerationRequest, Pipeline, Settings};
//!
//! async fn example() -> plangen_core::Result<()> {
//!     let catalog = Catalog::standard();
//!     let request = GenerationRequest::builder(GenerationMode::Full)
//!         .title("Linear Algebra")
//!         .domain("mathematics")
//!         .difficulty(Difficulty::Basic)
//!         .build(&catalog)?;
//!
//!     let pipeline = Pipeline::from_settings(Settings::default())?;
//!     let content = pipeline.complete(&request).await?;
//!     pipeline.save(&content, &request)?;
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod client;
pub mod error;
pub mod pipeline;
pub mod plans;
pub mod prompt;
pub mod request;
pub mod writer;

pub use catalog::{Catalog, Category, ContentSize, ContentType, Difficulty, Domain};
pub use client::{ApiKey, ChatPayload, ClientSettings, CompletionClient};
pub use error::{Error, Result};
pub use pipeline::{Pipeline, Settings};
pub use plans::PlanTitleEntry;
pub use request::{GenerationMode, GenerationRequest, RequestDetails};
pub use writer::ContentWriter;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Load variables from a `.env` file in the working directory, if present
pub fn load_dotenv() -> Option<std::path::PathBuf> {
    dotenv::dotenv().ok()
}
