//! Fixed lookup tables for domains, difficulties, categories, content types
//! and content sizes.
//!
//! The tables are built once at process start into a [`Catalog`] and passed
//! explicitly to the collector and the prompt builder.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A subject domain a piece of content belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    /// Stable identifier (e.g. `computer_science`)
    pub key: String,
    /// Human-readable label used in prompts and front matter
    pub label: String,
    /// Shorter label used by simple mode
    pub short_label: String,
}

impl Domain {
    fn new(key: &str, label: &str, short_label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            short_label: short_label.to_string(),
        }
    }
}

/// Difficulty level; also selects the storage folder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Basic,
    Intermediate,
    Advanced,
    All,
}

impl Difficulty {
    /// Menu order used by full mode
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Basic,
        Difficulty::Intermediate,
        Difficulty::Advanced,
        Difficulty::All,
    ];

    /// Menu order used by simple mode
    pub const SIMPLE_ORDER: [Difficulty; 4] = [
        Difficulty::All,
        Difficulty::Basic,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Basic => "Basic",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
            Difficulty::All => "All",
        }
    }

    /// Folder the generated file is stored under.
    ///
    /// `All` is a sentinel and maps to `general`.
    pub fn folder_name(&self) -> String {
        match self {
            Difficulty::All => "general".to_string(),
            other => other.label().to_lowercase(),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::validation("difficulty", format!("unknown difficulty '{}'", s)))
    }
}

/// Optional category tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Coding,
    Design,
    Product,
    Marketing,
    SoftSkills,
    PromptEngineering,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Coding,
        Category::Design,
        Category::Product,
        Category::Marketing,
        Category::SoftSkills,
        Category::PromptEngineering,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Category::Coding => "coding",
            Category::Design => "design",
            Category::Product => "product",
            Category::Marketing => "marketing",
            Category::SoftSkills => "soft_skills",
            Category::PromptEngineering => "prompt_engineering",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Category::ALL
            .into_iter()
            .find(|c| c.key() == s.trim())
            .ok_or_else(|| Error::validation("category", format!("unknown category '{}'", s)))
    }
}

/// Kind of document the model is asked to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentType {
    TopicOverview,
    LearningRoadmap,
    TutorialGuide,
    ConceptExplanation,
    PracticeExercises,
    ProjectIdeas,
}

impl ContentType {
    pub const ALL: [ContentType; 6] = [
        ContentType::TopicOverview,
        ContentType::LearningRoadmap,
        ContentType::TutorialGuide,
        ContentType::ConceptExplanation,
        ContentType::PracticeExercises,
        ContentType::ProjectIdeas,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ContentType::TopicOverview => "Topic Overview",
            ContentType::LearningRoadmap => "Learning Roadmap",
            ContentType::TutorialGuide => "Tutorial Guide",
            ContentType::ConceptExplanation => "Concept Explanation",
            ContentType::PracticeExercises => "Practice Exercises",
            ContentType::ProjectIdeas => "Project Ideas",
        }
    }

    /// Guidance sentence listed in the prompt's content type guidelines
    pub fn guideline(&self) -> &'static str {
        match self {
            ContentType::TopicOverview => "Explain the concept, its importance, and applications",
            ContentType::LearningRoadmap => "Provide a step-by-step learning path with milestones",
            ContentType::TutorialGuide => "Create a hands-on tutorial with examples",
            ContentType::ConceptExplanation => "Deep dive into the theory and fundamentals",
            ContentType::PracticeExercises => "Provide exercises with varying difficulty",
            ContentType::ProjectIdeas => "Suggest practical projects to build skills",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ContentType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ContentType::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::validation("content type", format!("unknown content type '{}'", s)))
    }
}

/// Content size used by simple mode; drives prompt depth and token budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentSize {
    BiteSize,
    Standard,
    Comprehensive,
    InDepth,
}

impl ContentSize {
    pub const ALL: [ContentSize; 4] = [
        ContentSize::BiteSize,
        ContentSize::Standard,
        ContentSize::Comprehensive,
        ContentSize::InDepth,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ContentSize::BiteSize => "Bite-Size",
            ContentSize::Standard => "Standard",
            ContentSize::Comprehensive => "Comprehensive",
            ContentSize::InDepth => "In-Depth",
        }
    }

    pub fn depth(&self) -> &'static str {
        match self {
            ContentSize::BiteSize => "brief",
            ContentSize::Standard => "moderate",
            ContentSize::Comprehensive => "detailed",
            ContentSize::InDepth => "extensive",
        }
    }

    pub fn max_tokens(&self) -> u32 {
        match self {
            ContentSize::BiteSize => 1024,
            ContentSize::Standard => 2048,
            ContentSize::Comprehensive => 4096,
            ContentSize::InDepth => 6000,
        }
    }
}

impl fmt::Display for ContentSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Immutable set of lookup tables shared by the collector and prompt builder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    domains: Vec<Domain>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl Catalog {
    /// The built-in ten-domain table
    pub fn standard() -> Self {
        Self {
            domains: vec![
                Domain::new("thinking", "Thinking & Problem-Solving", "Thinking & Problem-Solving"),
                Domain::new("mathematics", "Mathematics", "Mathematics"),
                Domain::new(
                    "computer_science",
                    "Computer Science (Theory + Systems)",
                    "Computer Science",
                ),
                Domain::new("web_development", "Full-Stack Web Development", "Web Development"),
                Domain::new(
                    "ai_ml",
                    "Artificial Intelligence (AI, ML, DL, NLP, Agents, RAG)",
                    "Artificial Intelligence",
                ),
                Domain::new("system_design", "System Design & Architecture", "System Design"),
                Domain::new("ui_ux", "UI/UX & Product Design", "UI/UX Design"),
                Domain::new(
                    "media",
                    "Media Creation (Video, Photo, Audio, Content)",
                    "Media Creation",
                ),
                Domain::new("automation", "Automation & Productivity Systems", "Automation"),
                Domain::new("business", "Business, Startups & Monetization", "Business & Startups"),
            ],
        }
    }

    /// Create a catalog from a custom domain table
    pub fn with_domains(domains: Vec<Domain>) -> Self {
        Self { domains }
    }

    pub fn domains(&self) -> &[Domain] {
        &self.domains
    }

    /// Look a domain up by its key
    pub fn domain(&self, key: &str) -> Option<&Domain> {
        self.domains.iter().find(|d| d.key == key)
    }

    /// Look a domain up by its full or short display label (case-insensitive)
    pub fn domain_by_label(&self, label: &str) -> Option<&Domain> {
        let label = label.trim();
        self.domains.iter().find(|d| {
            d.label.eq_ignore_ascii_case(label) || d.short_label.eq_ignore_ascii_case(label)
        })
    }
}
