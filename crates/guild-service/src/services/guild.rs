//! Guild service
//!
//! Member roster with presence, the login feed, and weekday/hour summaries.

use std::cmp::Reverse;

use chrono::Utc;
use guild_core::{daily_buckets, hourly_buckets};
use tracing::instrument;

use crate::dto::{ActivityEventResponse, ActivitySummaryResponse, MemberResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Guild service
pub struct GuildService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> GuildService<'a> {
    /// Create a new GuildService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Active accounts as members: online first, then most recently seen, then name
    #[instrument(skip(self))]
    pub async fn list_members(&self) -> ServiceResult<Vec<MemberResponse>> {
        let users = self.ctx.user_repo().list_active().await?;
        let now = Utc::now();
        let window = self.ctx.settings().presence_window;

        let mut members: Vec<MemberResponse> = users
            .into_iter()
            .map(|user| MemberResponse {
                online: user.is_online(now, window),
                id: user.id.to_string(),
                name: user.name,
                role: user.role,
                last_seen: user.last_seen_at,
            })
            .collect();

        members.sort_by(|a, b| {
            (!a.online, Reverse(a.last_seen), &a.name).cmp(&(!b.online, Reverse(b.last_seen), &b.name))
        });
        Ok(members)
    }

    /// Most recent login events, newest first
    #[instrument(skip(self))]
    pub async fn recent_activity(&self) -> ServiceResult<Vec<ActivityEventResponse>> {
        let limit = self.ctx.settings().activity_feed_limit;
        let events = self.ctx.activity_repo().list_recent(limit).await?;
        Ok(events.into_iter().map(ActivityEventResponse::from).collect())
    }

    /// Weekday and hour-of-day histograms over every recorded event
    #[instrument(skip(self))]
    pub async fn activity_summary(&self) -> ServiceResult<ActivitySummaryResponse> {
        let events = self.ctx.activity_repo().list_all().await?;
        Ok(ActivitySummaryResponse {
            daily: daily_buckets(&events, self.ctx.settings().activity_offset),
            hourly: hourly_buckets(&events),
            total_events: events.len(),
        })
    }
}
