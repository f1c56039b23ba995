//! Support button state for a project

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::tables::STARTSNAPS;
use crate::models::StartSnap;
use crate::StartSnapClient;

#[derive(Debug, Clone, PartialEq)]
struct SupportState {
    supporters: Vec<Uuid>,
    support_count: i64,
}

#[derive(Debug, Serialize)]
struct SupportUpdate<'a> {
    supporters: &'a [Uuid],
    support_count: i64,
}

/// Clears the in-flight flag when the request finishes, successful or not
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Toggles the signed-in user's support for one project
///
/// Only one toggle runs at a time; a second call while the first is pending
/// fails with [`Error::Busy`].
pub struct SupportToggle {
    client: StartSnapClient,
    startsnap_id: Uuid,
    state: Mutex<SupportState>,
    in_flight: AtomicBool,
}

impl SupportToggle {
    pub(crate) fn new(client: StartSnapClient, project: &StartSnap) -> Self {
        Self {
            client,
            startsnap_id: project.id,
            state: Mutex::new(SupportState {
                supporters: project.supporters.clone(),
                support_count: project.support_count,
            }),
            in_flight: AtomicBool::new(false),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SupportState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Number of supporters
    pub fn count(&self) -> i64 {
        self.lock().support_count
    }

    /// Whether the signed-in user supports the project
    pub fn is_supported(&self) -> bool {
        match self.client.auth().user_id() {
            Some(user_id) => self.lock().supporters.contains(&user_id),
            None => false,
        }
    }

    /// Whether a toggle request is pending
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Add or remove the signed-in user's support.
    ///
    /// Returns whether the user supports the project afterwards, as read from
    /// the row the backend returned.
    ///
    /// The whole locally known `supporters` list is written back, so a
    /// supporter added by another client since this toggle was created is
    /// overwritten. Nothing guards against concurrent writers on the row.
    pub async fn toggle(&self) -> Result<bool> {
        let user_id = self.client.auth().require_user_id()?;

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(Error::Busy(format!("support for {}", self.startsnap_id)));
        }
        let _guard = InFlight(&self.in_flight);

        let (supporters, support_count) = {
            let state = self.lock();
            let mut supporters = state.supporters.clone();
            let count = if supporters.contains(&user_id) {
                supporters.retain(|id| *id != user_id);
                state.support_count - 1
            } else {
                supporters.push(user_id);
                state.support_count + 1
            };
            (supporters, count.max(0))
        };

        let updated: Vec<StartSnap> = self
            .client
            .from(STARTSNAPS)
            .update(SupportUpdate {
                supporters: &supporters,
                support_count,
            })
            .eq("id", self.startsnap_id)
            .execute()
            .await?;

        let row = updated
            .into_iter()
            .next()
            .ok_or_else(|| Error::not_found(format!("startsnap {}", self.startsnap_id)))?;

        let supported = row.supporters.contains(&user_id);
        *self.lock() = SupportState {
            supporters: row.supporters,
            support_count: row.support_count,
        };

        info!(
            startsnap_id = %self.startsnap_id,
            supported,
            count = row.support_count,
            "support toggled"
        );
        Ok(supported)
    }
}
