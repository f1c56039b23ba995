//! Form validation applied before anything is submitted
//!
//! Text is trimmed first and lengths are counted in characters.

use serde::Serialize;
use thiserror::Error;

use crate::models::{LogType, ProjectType};

pub const FEEDBACK_MIN_LEN: usize = 10;
pub const FEEDBACK_MAX_LEN: usize = 1000;
pub const REPLY_MAX_LEN: usize = 1000;
pub const VIBE_LOG_TITLE_MIN_LEN: usize = 3;
pub const VIBE_LOG_TITLE_MAX_LEN: usize = 100;
pub const VIBE_LOG_CONTENT_MIN_LEN: usize = 10;
pub const VIBE_LOG_CONTENT_MAX_LEN: usize = 5000;
pub const PROJECT_NAME_MIN_LEN: usize = 3;
pub const PROJECT_NAME_MAX_LEN: usize = 100;
pub const PROJECT_DESCRIPTION_MIN_LEN: usize = 10;
pub const PROJECT_DESCRIPTION_MAX_LEN: usize = 5000;
pub const PROJECT_MAX_TAGS: usize = 10;
pub const PROJECT_MAX_TOOLS: usize = 10;
pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 30;
pub const BIO_MAX_LEN: usize = 500;

/// A rejected form field
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

fn text(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<String, ValidationError> {
    let value = value.trim();
    let len = value.chars().count();

    if len == 0 {
        return Err(ValidationError::new(field, "cannot be empty"));
    }
    if len < min {
        return Err(ValidationError::new(
            field,
            format!("must be at least {} characters", min),
        ));
    }
    if len > max {
        return Err(ValidationError::new(
            field,
            format!("must be at most {} characters", max),
        ));
    }
    Ok(value.to_string())
}

/// Validate feedback content, returning the trimmed text
pub fn validate_feedback(content: &str) -> Result<String, ValidationError> {
    text("content", content, FEEDBACK_MIN_LEN, FEEDBACK_MAX_LEN)
}

/// Validate reply content, returning the trimmed text
pub fn validate_reply(content: &str) -> Result<String, ValidationError> {
    text("content", content, 1, REPLY_MAX_LEN)
}

/// Validate the raw text sent to the AI formatter
pub fn validate_raw_log(content: &str) -> Result<String, ValidationError> {
    text("rawContent", content, 1, VIBE_LOG_CONTENT_MAX_LEN)
}

/// Validate a username: letters, digits, `_` and `-` only
pub fn validate_username(username: &str) -> Result<String, ValidationError> {
    let username = text("username", username, USERNAME_MIN_LEN, USERNAME_MAX_LEN)?;
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(ValidationError::new(
            "username",
            "may only contain letters, digits, '_' and '-'",
        ));
    }
    Ok(username)
}

/// Validate a profile bio; an empty bio is allowed
pub fn validate_bio(bio: &str) -> Result<String, ValidationError> {
    let bio = bio.trim();
    if bio.chars().count() > BIO_MAX_LEN {
        return Err(ValidationError::new(
            "bio",
            format!("must be at most {} characters", BIO_MAX_LEN),
        ));
    }
    Ok(bio.to_string())
}

/// Input of the vibe log form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VibeLogForm {
    pub log_type: Option<LogType>,
    pub title: String,
    pub content: String,
}

/// Vibe log fields that passed validation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VibeLogInput {
    pub log_type: LogType,
    pub title: String,
    pub content: String,
}

impl VibeLogForm {
    pub fn new(log_type: LogType, title: &str, content: &str) -> Self {
        Self {
            log_type: Some(log_type),
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    pub fn validate(&self) -> Result<VibeLogInput, ValidationError> {
        let log_type = self
            .log_type
            .ok_or_else(|| ValidationError::new("log_type", "is required"))?;
        let title = text(
            "title",
            &self.title,
            VIBE_LOG_TITLE_MIN_LEN,
            VIBE_LOG_TITLE_MAX_LEN,
        )?;
        let content = text(
            "content",
            &self.content,
            VIBE_LOG_CONTENT_MIN_LEN,
            VIBE_LOG_CONTENT_MAX_LEN,
        )?;

        Ok(VibeLogInput {
            log_type,
            title,
            content,
        })
    }
}

/// Input of the project form
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectForm {
    pub name: String,
    pub description: String,
    pub category: String,
    pub project_type: ProjectType,
    pub live_demo_url: Option<String>,
    pub demo_video_url: Option<String>,
    pub screenshot_urls: Vec<String>,
    pub tags: Vec<String>,
    pub tools_used: Vec<String>,
    pub feedback_tags: Vec<String>,
    pub is_hackathon_entry: bool,
}

impl ProjectForm {
    pub fn new(name: &str, description: &str, category: &str, project_type: ProjectType) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            project_type,
            live_demo_url: None,
            demo_video_url: None,
            screenshot_urls: Vec::new(),
            tags: Vec::new(),
            tools_used: Vec::new(),
            feedback_tags: Vec::new(),
            is_hackathon_entry: false,
        }
    }
}

/// Project fields that passed validation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectInput {
    pub name: String,
    pub description: String,
    pub category: String,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    pub live_demo_url: Option<String>,
    pub demo_video_url: Option<String>,
    pub screenshot_urls: Vec<String>,
    pub tags: Vec<String>,
    pub tools_used: Vec<String>,
    pub feedback_tags: Vec<String>,
    pub is_hackathon_entry: bool,
}

fn tag_list(
    field: &'static str,
    values: &[String],
    max: usize,
) -> Result<Vec<String>, ValidationError> {
    let mut cleaned: Vec<String> = Vec::with_capacity(values.len());
    for value in values.iter().map(|v| v.trim()).filter(|v| !v.is_empty()) {
        if !cleaned.iter().any(|c| c.eq_ignore_ascii_case(value)) {
            cleaned.push(value.to_string());
        }
    }
    if cleaned.len() > max {
        return Err(ValidationError::new(
            field,
            format!("at most {} entries allowed", max),
        ));
    }
    Ok(cleaned)
}

fn optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl ProjectForm {
    pub fn validate(&self) -> Result<ProjectInput, ValidationError> {
        let name = text(
            "name",
            &self.name,
            PROJECT_NAME_MIN_LEN,
            PROJECT_NAME_MAX_LEN,
        )?;
        let description = text(
            "description",
            &self.description,
            PROJECT_DESCRIPTION_MIN_LEN,
            PROJECT_DESCRIPTION_MAX_LEN,
        )?;
        let category = text("category", &self.category, 1, usize::MAX)?;

        Ok(ProjectInput {
            name,
            description,
            category,
            project_type: self.project_type,
            live_demo_url: optional(&self.live_demo_url),
            demo_video_url: optional(&self.demo_video_url),
            screenshot_urls: self.screenshot_urls.clone(),
            tags: tag_list("tags", &self.tags, PROJECT_MAX_TAGS)?,
            tools_used: tag_list("tools_used", &self.tools_used, PROJECT_MAX_TOOLS)?,
            feedback_tags: tag_list("feedback_tags", &self.feedback_tags, PROJECT_MAX_TAGS)?,
            is_hackathon_entry: self.is_hackathon_entry,
        })
    }
}
