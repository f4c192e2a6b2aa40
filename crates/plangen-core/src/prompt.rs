//! Prompt rendering
//!
//! Turns a [`GenerationRequest`] into the system and user messages sent to
//! the completion endpoint. Rendering is pure and cannot fail.

use crate::catalog::ContentType;
use crate::request::{GenerationMode, GenerationRequest, RequestDetails};

/// System message for full mode
pub const FULL_SYSTEM_PROMPT: &str = "You are an expert technical educator specializing in creating comprehensive learning materials. You write in clear, well-structured markdown.";

/// System message for simple mode
pub const SIMPLE_SYSTEM_PROMPT: &str = "You are an expert educator creating learning content.";

/// System message matching the request's mode
pub fn system_prompt(mode: GenerationMode) -> &'static str {
    match mode {
        GenerationMode::Full => FULL_SYSTEM_PROMPT,
        GenerationMode::Simple => SIMPLE_SYSTEM_PROMPT,
    }
}

/// Render the user instruction for a request
pub fn build_prompt(request: &GenerationRequest) -> String {
    match request.details() {
        RequestDetails::Full {
            category,
            content_type,
            custom_instructions,
            include_code,
        } => {
            let category = category
                .map(|c| c.key().to_string())
                .unwrap_or_else(|| "General".to_string());
            let code_requirement = if *include_code {
                "Include practical code examples where relevant"
            } else {
                "Focus on concepts without code examples"
            };
            let guidelines = ContentType::ALL
                .iter()
                .map(|c| format!("- {}: {}", c.label(), c.guideline()))
                .collect::<Vec<_>>()
                .join("\n");

            let mut prompt = format!(
                "You are an expert technical educator creating high-quality learning content.

Generate comprehensive {content} content for the following:

**Title:** {title}
**Domain:** {domain}
**Difficulty Level:** {difficulty}
**Category:** {category}

Requirements:
1. Write in clear, educational markdown format
2. Include appropriate headings, lists, and formatting
3. Be thorough but concise
4. {code_requirement}
5. Use tables for structured information where appropriate
6. Include key takeaways or summary points
7. Add links to related topics where relevant (using relative markdown links)

Content Type Guidelines:
{guidelines}

Format the output as a complete markdown document suitable for a learning plan.",
                content = content_type.label().to_lowercase(),
                title = request.title(),
                domain = request.domain().label,
                difficulty = request.difficulty(),
            );

            if let Some(extra) = custom_instructions.as_deref().map(str::trim) {
                if !extra.is_empty() {
                    prompt.push_str("\n\nAdditional instructions: ");
                    prompt.push_str(extra);
                }
            }

            prompt
        }
        RequestDetails::Simple { size } => format!(
            "Create a {depth} learning guide for:

Title: {title}
Domain: {domain}
Difficulty: {difficulty}

Format as a well-structured markdown document with:
- Clear headings and sections
- Key concepts explained
- Practical examples where relevant
- Learning objectives
- Related topics to explore",
            depth = size.depth(),
            title = request.title(),
            domain = request.domain().short_label,
            difficulty = request.difficulty(),
        ),
    }
}
