//! The generation request record and its validating builder

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::catalog::{Catalog, Category, ContentSize, ContentType, Difficulty, Domain};
use crate::error::{Error, Result};

/// Which flavour of the pipeline runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMode {
    /// Full questionnaire, front matter, fixed token budget
    #[default]
    Full,
    /// Size-driven depth and token budget, raw output
    Simple,
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationMode::Full => f.write_str("full"),
            GenerationMode::Simple => f.write_str("simple"),
        }
    }
}

impl FromStr for GenerationMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "full" => Ok(GenerationMode::Full),
            "simple" => Ok(GenerationMode::Simple),
            other => Err(Error::validation("mode", format!("unknown mode '{}'", other))),
        }
    }
}

/// Mode-specific part of a request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RequestDetails {
    Full {
        category: Option<Category>,
        content_type: ContentType,
        custom_instructions: Option<String>,
        include_code: bool,
    },
    Simple {
        size: ContentSize,
    },
}

/// A fully validated request, immutable once built
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequest {
    title: String,
    domain: Domain,
    difficulty: Difficulty,
    #[serde(flatten)]
    details: RequestDetails,
}

impl GenerationRequest {
    /// Start building a request for the given mode
    pub fn builder(mode: GenerationMode) -> GenerationRequestBuilder {
        GenerationRequestBuilder::new(mode)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn details(&self) -> &RequestDetails {
        &self.details
    }

    pub fn mode(&self) -> GenerationMode {
        match self.details {
            RequestDetails::Full { .. } => GenerationMode::Full,
            RequestDetails::Simple { .. } => GenerationMode::Simple,
        }
    }

    pub fn category(&self) -> Option<Category> {
        match &self.details {
            RequestDetails::Full { category, .. } => *category,
            RequestDetails::Simple { .. } => None,
        }
    }

    /// Label announced to the operator before generating
    pub fn content_label(&self) -> String {
        match &self.details {
            RequestDetails::Full { content_type, .. } => content_type.label().to_string(),
            RequestDetails::Simple { size } => format!("{} learning guide", size.label()),
        }
    }

    /// Token budget for this request; simple mode derives it from the size
    pub fn max_tokens(&self, full_mode_default: u32) -> u32 {
        match &self.details {
            RequestDetails::Full { .. } => full_mode_default,
            RequestDetails::Simple { size } => size.max_tokens(),
        }
    }
}

/// Builder for [`GenerationRequest`]
#[derive(Debug, Clone)]
pub struct GenerationRequestBuilder {
    mode: GenerationMode,
    title: Option<String>,
    domain_key: Option<String>,
    difficulty: Option<Difficulty>,
    category: Option<Category>,
    content_type: ContentType,
    custom_instructions: Option<String>,
    include_code: bool,
    size: ContentSize,
}

impl GenerationRequestBuilder {
    fn new(mode: GenerationMode) -> Self {
        Self {
            mode,
            title: None,
            domain_key: None,
            difficulty: None,
            category: None,
            content_type: ContentType::TopicOverview,
            custom_instructions: None,
            include_code: true,
            size: ContentSize::Standard,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn domain(mut self, key: impl Into<String>) -> Self {
        self.domain_key = Some(key.into());
        self
    }

    pub fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }

    pub fn content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = content_type;
        self
    }

    pub fn custom_instructions(mut self, text: impl Into<String>) -> Self {
        self.custom_instructions = Some(text.into());
        self
    }

    pub fn include_code(mut self, include_code: bool) -> Self {
        self.include_code = include_code;
        self
    }

    pub fn size(mut self, size: ContentSize) -> Self {
        self.size = size;
        self
    }

    /// Validate against the catalog and produce the request
    pub fn build(self, catalog: &Catalog) -> Result<GenerationRequest> {
        let title = self
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::validation("title", "Title is required"))?;

        let key = self
            .domain_key
            .ok_or_else(|| Error::validation("domain", "a domain must be selected"))?;
        let domain = catalog
            .domain(&key)
            .cloned()
            .ok_or_else(|| Error::validation("domain", format!("unknown domain '{}'", key)))?;

        let difficulty = self
            .difficulty
            .ok_or_else(|| Error::validation("difficulty", "a difficulty must be selected"))?;

        let details = match self.mode {
            GenerationMode::Full => RequestDetails::Full {
                category: self.category,
                content_type: self.content_type,
                custom_instructions: self
                    .custom_instructions
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty()),
                include_code: self.include_code,
            },
            GenerationMode::Simple => RequestDetails::Simple { size: self.size },
        };

        Ok(GenerationRequest {
            title,
            domain,
            difficulty,
            details,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::standard()
    }

    #[test]
    fn builds_full_request_with_trimmed_fields() {
        let request = GenerationRequest::builder(GenerationMode::Full)
            .title("  Linear Algebra  ")
            .domain("mathematics")
            .difficulty(Difficulty::Basic)
            .custom_instructions("   ")
            .build(&catalog())
            .unwrap();

        assert_eq!(request.title(), "Linear Algebra");
        assert_eq!(request.domain().label, "Mathematics");
        assert_eq!(request.mode(), GenerationMode::Full);
        assert_eq!(
            request.details(),
            &RequestDetails::Full {
                category: None,
                content_type: ContentType::TopicOverview,
                custom_instructions: None,
                include_code: true,
            }
        );
    }

    #[test]
    fn rejects_blank_title() {
        let err = GenerationRequest::builder(GenerationMode::Full)
            .title("   ")
            .domain("mathematics")
            .difficulty(Difficulty::Basic)
            .build(&catalog())
            .unwrap_err();
        assert!(err.to_string().contains("Title is required"));
    }

    #[test]
    fn rejects_unknown_domain() {
        let err = GenerationRequest::builder(GenerationMode::Full)
            .title("Knife Skills")
            .domain("cooking")
            .difficulty(Difficulty::Basic)
            .build(&catalog())
            .unwrap_err();
        assert!(matches!(err, Error::Validation { ref field, .. } if field == "domain"));
    }

    #[test]
    fn simple_request_uses_size_budget() {
        let request = GenerationRequest::builder(GenerationMode::Simple)
            .title("Graphs")
            .domain("computer_science")
            .difficulty(Difficulty::All)
            .size(ContentSize::BiteSize)
            .build(&catalog())
            .unwrap();

        assert_eq!(request.mode(), GenerationMode::Simple);
        assert_eq!(request.max_tokens(4096), 1024);
        assert_eq!(request.category(), None);
    }

    #[test]
    fn mode_parses_from_text() {
        assert_eq!("Simple".parse::<GenerationMode>().unwrap(), GenerationMode::Simple);
        assert!("other".parse::<GenerationMode>().is_err());
    }
}
