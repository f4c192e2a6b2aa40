//! Persisting generated content under the plans directory

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{Error, Result};
use crate::request::{GenerationMode, GenerationRequest, RequestDetails};

/// Replace every non-alphanumeric character with `_` and lowercase.
///
/// `"C++ Basics!"` becomes `"c___basics_"`.
pub fn sanitize_filename(title: &str) -> String {
    title
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect::<String>()
        .to_lowercase()
}

/// Metadata block written ahead of full-mode content
#[derive(Debug, Serialize)]
struct FrontMatter<'a> {
    title: &'a str,
    domain: &'a str,
    difficulty: &'a str,
    category: &'a str,
    content_type: &'a str,
    generated: bool,
}

/// Writes generated documents into `<plans_dir>/<difficulty folder>/`
#[derive(Debug, Clone)]
pub struct ContentWriter {
    plans_dir: PathBuf,
}

impl ContentWriter {
    pub fn new(plans_dir: impl Into<PathBuf>) -> Self {
        Self {
            plans_dir: plans_dir.into(),
        }
    }

    pub fn plans_dir(&self) -> &Path {
        &self.plans_dir
    }

    /// Folder a request's file goes into
    pub fn folder_for(&self, request: &GenerationRequest) -> PathBuf {
        self.plans_dir.join(request.difficulty().folder_name())
    }

    /// Full path a request's file is written to
    pub fn path_for(&self, request: &GenerationRequest) -> PathBuf {
        self.folder_for(request)
            .join(format!("{}.md", sanitize_filename(request.title())))
    }

    /// Render the document body for a request
    pub fn render(&self, content: &str, request: &GenerationRequest) -> Result<String> {
        match (request.mode(), request.details()) {
            (GenerationMode::Full, RequestDetails::Full { category, content_type, .. }) => {
                let front_matter = FrontMatter {
                    title: request.title(),
                    domain: &request.domain().label,
                    difficulty: request.difficulty().label(),
                    category: category.map(|c| c.key()).unwrap_or("general"),
                    content_type: content_type.label(),
                    generated: true,
                };
                let yaml = serde_yaml::to_string(&front_matter)?;
                Ok(format!("---\n{}---\n\n{}", yaml, content))
            }
            _ => Ok(content.to_string()),
        }
    }

    /// Write content for a request, creating folders as needed.
    ///
    /// An existing file with the same name is overwritten.
    pub fn write(&self, content: &str, request: &GenerationRequest) -> Result<PathBuf> {
        let folder = self.folder_for(request);
        fs::create_dir_all(&folder).map_err(|e| Error::io(&folder, e))?;

        let path = self.path_for(request);
        let document = self.render(content, request)?;
        fs::write(&path, document).map_err(|e| Error::io(&path, e))?;

        info!(path = %path.display(), bytes = content.len(), "Content written");
        Ok(path)
    }
}
