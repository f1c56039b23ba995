//! Projects ("StartSnaps")

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::tables::STARTSNAPS;
use crate::models::{ProjectDetail, StartSnap};
use crate::validation::{ProjectForm, ProjectInput};
use crate::StartSnapClient;

#[derive(Debug, Serialize)]
struct NewStartSnap<'a> {
    user_id: Uuid,
    #[serde(flatten)]
    input: &'a ProjectInput,
}

#[derive(Debug, Serialize)]
struct StartSnapUpdate<'a> {
    #[serde(flatten)]
    input: &'a ProjectInput,
    updated_at: DateTime<Utc>,
}

/// Project lookups and owner edits
pub struct ProjectService {
    client: StartSnapClient,
}

impl ProjectService {
    pub(crate) fn new(client: StartSnapClient) -> Self {
        Self { client }
    }

    /// A single project
    pub async fn get(&self, id: Uuid) -> Result<StartSnap> {
        self.client
            .from(STARTSNAPS)
            .select("*")
            .eq("id", id)
            .execute_one()
            .await?
            .ok_or_else(|| Error::not_found(format!("startsnap {}", id)))
    }

    /// Projects of a user, newest first
    pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<StartSnap>> {
        self.client
            .from(STARTSNAPS)
            .select("*")
            .eq("user_id", user_id)
            .order("created_at", false)
            .execute()
            .await
    }

    /// Most recent projects
    pub async fn list_recent(&self, limit: usize) -> Result<Vec<StartSnap>> {
        self.client
            .from(STARTSNAPS)
            .select("*")
            .order("created_at", false)
            .limit(limit)
            .execute()
            .await
    }

    /// A project with its owner, vibe logs and feedback
    pub async fn detail(&self, id: Uuid) -> Result<ProjectDetail> {
        let project = self.get(id).await?;

        let profiles = self.client.profiles();
        let vibe_logs = self.client.vibe_logs();
        let feedback = self.client.feedback();

        let (owner, vibe_logs, feedback) = tokio::try_join!(
            profiles.get_by_user_id(project.user_id),
            vibe_logs.list(id),
            feedback.fetch_threads(id),
        )?;

        Ok(ProjectDetail {
            project,
            owner,
            vibe_logs,
            feedback,
        })
    }

    /// Publish a project as the signed-in user
    pub async fn create(&self, form: &ProjectForm) -> Result<StartSnap> {
        let input = form.validate()?;
        let user_id = self.client.auth().require_user_id()?;

        let inserted: Vec<StartSnap> = self
            .client
            .from(STARTSNAPS)
            .insert(NewStartSnap {
                user_id,
                input: &input,
            })
            .execute()
            .await?;

        let project = inserted
            .into_iter()
            .next()
            .ok_or_else(|| Error::general("insert returned no startsnap"))?;
        info!(startsnap_id = %project.id, %user_id, "startsnap created");
        Ok(project)
    }

    /// Edit a project owned by the signed-in user
    pub async fn update(&self, id: Uuid, form: &ProjectForm) -> Result<StartSnap> {
        let input = form.validate()?;
        let user_id = self.client.auth().require_user_id()?;

        let updated: Vec<StartSnap> = self
            .client
            .from(STARTSNAPS)
            .update(StartSnapUpdate {
                input: &input,
                updated_at: Utc::now(),
            })
            .eq("id", id)
            .eq("user_id", user_id)
            .execute()
            .await?;

        let project = updated
            .into_iter()
            .next()
            .ok_or_else(|| Error::not_found(format!("startsnap {}", id)))?;
        info!(startsnap_id = %id, "startsnap updated");
        Ok(project)
    }

    /// Delete a project owned by the signed-in user
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let user_id = self.client.auth().require_user_id()?;

        let deleted: Vec<StartSnap> = self
            .client
            .from(STARTSNAPS)
            .delete()
            .eq("id", id)
            .eq("user_id", user_id)
            .execute()
            .await?;

        if deleted.is_empty() {
            return Err(Error::not_found(format!("startsnap {}", id)));
        }
        info!(startsnap_id = %id, "startsnap deleted");
        Ok(())
    }
}
