//! Threaded feedback on projects
//!
//! Every mutation validates locally, issues one remote call (an ownership
//! check and two deletes for a feedback delete) and then re-fetches the whole feedback tree of the
//! project. A failed call returns its error without re-fetching, so the
//! caller keeps the list it already had.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::tables::{FEEDBACKS, FEEDBACK_REPLIES};
use crate::models::{Feedback, FeedbackReply, FeedbackThread};
use crate::validation::{validate_feedback, validate_reply};
use crate::StartSnapClient;

#[derive(Debug, Serialize)]
struct NewFeedback<'a> {
    startsnap_id: Uuid,
    user_id: Uuid,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct NewReply<'a> {
    parent_feedback_id: Uuid,
    user_id: Uuid,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ContentUpdate<'a> {
    content: &'a str,
    updated_at: DateTime<Utc>,
}

/// Feedback operations for project pages
pub struct FeedbackService {
    client: StartSnapClient,
}

impl FeedbackService {
    pub(crate) fn new(client: StartSnapClient) -> Self {
        Self { client }
    }

    /// Feedback of a project, oldest first, each with its replies oldest first
    pub async fn fetch_threads(&self, startsnap_id: Uuid) -> Result<Vec<FeedbackThread>> {
        let mut threads: Vec<FeedbackThread> = self
            .client
            .from(FEEDBACKS)
            .select("*,feedback_replies(*)")
            .eq("startsnap_id", startsnap_id)
            .order("created_at", true)
            .order_embedded(FEEDBACK_REPLIES, "created_at", true)
            .execute()
            .await?;

        for thread in &mut threads {
            thread.replies.sort_by_key(|reply| reply.created_at);
        }

        Ok(threads)
    }

    /// Post feedback as the signed-in user
    pub async fn add_feedback(
        &self,
        startsnap_id: Uuid,
        content: &str,
    ) -> Result<Vec<FeedbackThread>> {
        let content = validate_feedback(content)?;
        let user_id = self.client.auth().require_user_id()?;

        let inserted: Vec<Feedback> = self
            .client
            .from(FEEDBACKS)
            .insert(NewFeedback {
                startsnap_id,
                user_id,
                content: &content,
            })
            .execute()
            .await?;

        if let Some(feedback) = inserted.first() {
            info!(feedback_id = %feedback.id, %startsnap_id, "feedback added");
        }

        self.fetch_threads(startsnap_id).await
    }

    /// Edit feedback written by the signed-in user
    pub async fn edit_feedback(
        &self,
        startsnap_id: Uuid,
        feedback_id: Uuid,
        content: &str,
    ) -> Result<Vec<FeedbackThread>> {
        let content = validate_feedback(content)?;
        let user_id = self.client.auth().require_user_id()?;

        let updated: Vec<Feedback> = self
            .client
            .from(FEEDBACKS)
            .update(ContentUpdate {
                content: &content,
                updated_at: Utc::now(),
            })
            .eq("id", feedback_id)
            .eq("user_id", user_id)
            .execute()
            .await?;

        if updated.is_empty() {
            return Err(Error::not_found(format!("feedback {}", feedback_id)));
        }
        info!(%feedback_id, "feedback edited");

        self.fetch_threads(startsnap_id).await
    }

    /// Delete feedback written by the signed-in user, replies first.
    ///
    /// Nothing is deleted unless the feedback belongs to the signed-in user.
    pub async fn delete_feedback(
        &self,
        startsnap_id: Uuid,
        feedback_id: Uuid,
    ) -> Result<Vec<FeedbackThread>> {
        let user_id = self.client.auth().require_user_id()?;

        let owned: Option<Feedback> = self
            .client
            .from(FEEDBACKS)
            .select("*")
            .eq("id", feedback_id)
            .eq("user_id", user_id)
            .execute_one()
            .await?;
        if owned.is_none() {
            return Err(Error::not_found(format!("feedback {}", feedback_id)));
        }

        self.client
            .from(FEEDBACK_REPLIES)
            .delete()
            .eq("parent_feedback_id", feedback_id)
            .execute_no_return()
            .await?;

        let deleted: Vec<Feedback> = self
            .client
            .from(FEEDBACKS)
            .delete()
            .eq("id", feedback_id)
            .eq("user_id", user_id)
            .execute()
            .await?;

        if deleted.is_empty() {
            return Err(Error::not_found(format!("feedback {}", feedback_id)));
        }
        info!(%feedback_id, "feedback deleted");

        self.fetch_threads(startsnap_id).await
    }

    /// Reply to a feedback entry as the signed-in user
    pub async fn add_reply(
        &self,
        startsnap_id: Uuid,
        feedback_id: Uuid,
        content: &str,
    ) -> Result<Vec<FeedbackThread>> {
        let content = validate_reply(content)?;
        let user_id = self.client.auth().require_user_id()?;

        let inserted: Vec<FeedbackReply> = self
            .client
            .from(FEEDBACK_REPLIES)
            .insert(NewReply {
                parent_feedback_id: feedback_id,
                user_id,
                content: &content,
            })
            .execute()
            .await?;

        if let Some(reply) = inserted.first() {
            info!(reply_id = %reply.id, %feedback_id, "reply added");
        }

        self.fetch_threads(startsnap_id).await
    }

    /// Edit a reply written by the signed-in user
    pub async fn edit_reply(
        &self,
        startsnap_id: Uuid,
        reply_id: Uuid,
        content: &str,
    ) -> Result<Vec<FeedbackThread>> {
        let content = validate_reply(content)?;
        let user_id = self.client.auth().require_user_id()?;

        let updated: Vec<FeedbackReply> = self
            .client
            .from(FEEDBACK_REPLIES)
            .update(ContentUpdate {
                content: &content,
                updated_at: Utc::now(),
            })
            .eq("id", reply_id)
            .eq("user_id", user_id)
            .execute()
            .await?;

        if updated.is_empty() {
            return Err(Error::not_found(format!("reply {}", reply_id)));
        }
        info!(%reply_id, "reply edited");

        self.fetch_threads(startsnap_id).await
    }

    /// Delete a reply written by the signed-in user
    pub async fn delete_reply(
        &self,
        startsnap_id: Uuid,
        reply_id: Uuid,
    ) -> Result<Vec<FeedbackThread>> {
        let user_id = self.client.auth().require_user_id()?;

        let deleted: Vec<FeedbackReply> = self
            .client
            .from(FEEDBACK_REPLIES)
            .delete()
            .eq("id", reply_id)
            .eq("user_id", user_id)
            .execute()
            .await?;

        if deleted.is_empty() {
            return Err(Error::not_found(format!("reply {}", reply_id)));
        }
        info!(%reply_id, "reply deleted");

        self.fetch_threads(startsnap_id).await
    }
}
