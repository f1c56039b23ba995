//! Rows of the remote tables

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Table names
pub mod tables {
    pub const PROFILES: &str = "profiles";
    pub const STARTSNAPS: &str = "startsnaps";
    pub const VIBELOGS: &str = "vibelogs";
    pub const FEEDBACKS: &str = "feedbacks";
    pub const FEEDBACK_REPLIES: &str = "feedback_replies";
}

/// A row of `profiles`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: Uuid,
    pub username: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub twitter_url: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Fields a user may change on their own profile
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
}

/// Whether a project is still an idea or already live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Idea,
    Live,
}

/// A row of `startsnaps`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartSnap {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: String,
    pub category: String,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    #[serde(default)]
    pub live_demo_url: Option<String>,
    #[serde(default)]
    pub demo_video_url: Option<String>,
    #[serde(default)]
    pub screenshot_urls: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub tools_used: Vec<String>,
    #[serde(default)]
    pub feedback_tags: Vec<String>,
    #[serde(default)]
    pub is_hackathon_entry: bool,
    #[serde(default)]
    pub support_count: i64,
    #[serde(default)]
    pub supporters: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Kind of progress update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogType {
    Launch,
    Update,
    Feature,
    Fix,
    Learning,
}

impl LogType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogType::Launch => "launch",
            LogType::Update => "update",
            LogType::Feature => "feature",
            LogType::Fix => "fix",
            LogType::Learning => "learning",
        }
    }
}

impl fmt::Display for LogType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row of `vibelogs`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VibeLog {
    pub id: Uuid,
    pub startsnap_id: Uuid,
    pub log_type: LogType,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A row of `feedbacks`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub id: Uuid,
    pub startsnap_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A row of `feedback_replies`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackReply {
    pub id: Uuid,
    pub parent_feedback_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A feedback entry with its replies embedded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackThread {
    #[serde(flatten)]
    pub feedback: Feedback,
    #[serde(default, rename = "feedback_replies")]
    pub replies: Vec<FeedbackReply>,
}

/// Everything the project page shows
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDetail {
    pub project: StartSnap,
    pub owner: Option<Profile>,
    pub vibe_logs: Vec<VibeLog>,
    pub feedback: Vec<FeedbackThread>,
}
