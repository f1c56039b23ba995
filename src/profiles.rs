//! Public profiles

use chrono::Utc;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::tables::PROFILES;
use crate::models::{Profile, ProfileUpdate};
use crate::validation::{validate_bio, validate_username};
use crate::StartSnapClient;

#[derive(Debug, Serialize)]
struct ProfilePatch<'a> {
    #[serde(flatten)]
    update: &'a ProfileUpdate,
    updated_at: chrono::DateTime<Utc>,
}

/// Profile lookups and edits
pub struct ProfileService {
    client: StartSnapClient,
}

impl ProfileService {
    pub(crate) fn new(client: StartSnapClient) -> Self {
        Self { client }
    }

    /// Profile with the given username
    pub async fn get_by_username(&self, username: &str) -> Result<Option<Profile>> {
        self.client
            .from(PROFILES)
            .select("*")
            .eq("username", username.trim())
            .execute_one()
            .await
    }

    /// Profile of the given user
    pub async fn get_by_user_id(&self, user_id: Uuid) -> Result<Option<Profile>> {
        self.client
            .from(PROFILES)
            .select("*")
            .eq("user_id", user_id)
            .execute_one()
            .await
    }

    /// Profiles of several users, e.g. the authors of a feedback tree.
    ///
    /// Ids without a profile are left out of the result.
    pub async fn list_by_user_ids(&self, user_ids: &[Uuid]) -> Result<Vec<Profile>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        self.client
            .from(PROFILES)
            .select("*")
            .in_list("user_id", user_ids)
            .execute()
            .await
    }

    /// Update the signed-in user's profile
    pub async fn update_own(&self, update: &ProfileUpdate) -> Result<Profile> {
        let mut update = update.clone();
        if let Some(username) = &update.username {
            update.username = Some(validate_username(username)?);
        }
        if let Some(bio) = &update.bio {
            update.bio = Some(validate_bio(bio)?);
        }

        let user_id = self.client.auth().require_user_id()?;

        let updated: Vec<Profile> = self
            .client
            .from(PROFILES)
            .update(ProfilePatch {
                update: &update,
                updated_at: Utc::now(),
            })
            .eq("user_id", user_id)
            .execute()
            .await?;

        let profile = updated
            .into_iter()
            .next()
            .ok_or_else(|| Error::not_found(format!("profile of {}", user_id)))?;
        info!(%user_id, "profile updated");
        Ok(profile)
    }
}
