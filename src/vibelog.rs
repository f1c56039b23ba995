//! Vibe logs: progress updates posted by a project's owner

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::tables::VIBELOGS;
use crate::models::{LogType, VibeLog};
use crate::validation::{validate_raw_log, VibeLogForm, VibeLogInput};
use crate::StartSnapClient;

/// Edge function that rewrites a raw log into a polished entry
pub const FORMATTER_FUNCTION: &str = "ai-vibe-log-formatter";

#[derive(Debug, Serialize)]
struct NewVibeLog<'a> {
    startsnap_id: Uuid,
    #[serde(flatten)]
    input: &'a VibeLogInput,
}

#[derive(Debug, Serialize)]
struct VibeLogUpdate<'a> {
    #[serde(flatten)]
    input: &'a VibeLogInput,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FormatRequest<'a> {
    raw_content: &'a str,
    log_type: LogType,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FormatResponse {
    formatted_log: Option<String>,
}

/// Vibe log operations for project pages
pub struct VibeLogService {
    client: StartSnapClient,
}

impl VibeLogService {
    pub(crate) fn new(client: StartSnapClient) -> Self {
        Self { client }
    }

    /// Vibe logs of a project, newest first
    pub async fn list(&self, startsnap_id: Uuid) -> Result<Vec<VibeLog>> {
        self.client
            .from(VIBELOGS)
            .select("*")
            .eq("startsnap_id", startsnap_id)
            .order("created_at", false)
            .execute()
            .await
    }

    /// Post a vibe log
    pub async fn add(&self, startsnap_id: Uuid, form: &VibeLogForm) -> Result<Vec<VibeLog>> {
        let input = form.validate()?;
        self.client.auth().require_user_id()?;

        let inserted: Vec<VibeLog> = self
            .client
            .from(VIBELOGS)
            .insert(NewVibeLog {
                startsnap_id,
                input: &input,
            })
            .execute()
            .await?;

        if let Some(log) = inserted.first() {
            info!(vibe_log_id = %log.id, %startsnap_id, log_type = %log.log_type, "vibe log added");
        }

        self.list(startsnap_id).await
    }

    /// Edit a vibe log
    pub async fn edit(
        &self,
        startsnap_id: Uuid,
        vibe_log_id: Uuid,
        form: &VibeLogForm,
    ) -> Result<Vec<VibeLog>> {
        let input = form.validate()?;
        self.client.auth().require_user_id()?;

        let updated: Vec<VibeLog> = self
            .client
            .from(VIBELOGS)
            .update(VibeLogUpdate {
                input: &input,
                updated_at: Utc::now(),
            })
            .eq("id", vibe_log_id)
            .eq("startsnap_id", startsnap_id)
            .execute()
            .await?;

        if updated.is_empty() {
            return Err(Error::not_found(format!("vibe log {}", vibe_log_id)));
        }
        info!(%vibe_log_id, "vibe log edited");

        self.list(startsnap_id).await
    }

    /// Delete a vibe log
    pub async fn delete(&self, startsnap_id: Uuid, vibe_log_id: Uuid) -> Result<Vec<VibeLog>> {
        self.client.auth().require_user_id()?;

        let deleted: Vec<VibeLog> = self
            .client
            .from(VIBELOGS)
            .delete()
            .eq("id", vibe_log_id)
            .eq("startsnap_id", startsnap_id)
            .execute()
            .await?;

        if deleted.is_empty() {
            return Err(Error::not_found(format!("vibe log {}", vibe_log_id)));
        }
        info!(%vibe_log_id, "vibe log deleted");

        self.list(startsnap_id).await
    }

    /// Rewrite raw log content with the AI formatter.
    ///
    /// The returned text replaces the form content; nothing is saved.
    pub async fn format_with_ai(&self, raw_content: &str, log_type: LogType) -> Result<String> {
        let raw_content = validate_raw_log(raw_content)?;
        debug!(%log_type, "formatting vibe log");

        let response: FormatResponse = self
            .client
            .functions()
            .invoke(
                FORMATTER_FUNCTION,
                &FormatRequest {
                    raw_content: &raw_content,
                    log_type,
                },
            )
            .await?;

        response
            .formatted_log
            .filter(|log| !log.trim().is_empty())
            .ok_or_else(|| Error::function("formatter returned no content"))
    }
}
