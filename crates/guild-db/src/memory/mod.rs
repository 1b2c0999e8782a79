//! In-memory implementation of every repository trait
//!
//! Backs development runs and tests without a database. All tables live in a
//! single [`MemoryStore`] so joins (build author names) see a consistent view.
//! Locks are never held across an await point.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::instrument;

use guild_core::entities::{
    AuditLogEntry, Build, Item, ItemCategory, MemberActivityLog, Spell, User,
};
use guild_core::error::DomainError;
use guild_core::traits::{
    ActivityRepository, AuditLogRepository, AuthoredBuild, BuildRepository, ItemRepository,
    RepoResult, SpellRepository, UserRepository,
};
use guild_core::value_objects::{BuildId, UserId};

/// Process-local data store
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    audit_logs: RwLock<Vec<AuditLogEntry>>,
    items: RwLock<BTreeMap<String, Item>>,
    spells: RwLock<HashMap<String, Spell>>,
    builds: RwLock<Vec<Build>>,
    activity: RwLock<Vec<MemberActivityLog>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn author_name(&self, author_id: UserId) -> Option<String> {
        self.users
            .read()
            .iter()
            .find(|u| u.id == author_id)
            .map(|u| u.name.clone())
    }

    fn with_author(&self, build: Build) -> AuthoredBuild {
        AuthoredBuild {
            author_name: self.author_name(build.author_id),
            build,
        }
    }
}

/// Newest first; among equal timestamps the later insertion wins
fn newest_first<T: Clone>(rows: &[T], at: impl Fn(&T) -> DateTime<Utc>) -> Vec<T> {
    let mut out: Vec<T> = rows.iter().rev().cloned().collect();
    out.sort_by_key(|row| std::cmp::Reverse(at(row)));
    out
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        Ok(self.users.read().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> RepoResult<Option<User>> {
        Ok(self.users.read().iter().find(|u| u.name_matches(name)).cloned())
    }

    async fn list(&self) -> RepoResult<Vec<User>> {
        Ok(newest_first(&self.users.read(), |u| u.created_at))
    }

    async fn list_active(&self) -> RepoResult<Vec<User>> {
        let mut active: Vec<User> = self
            .users
            .read()
            .iter()
            .filter(|u| u.is_active())
            .cloned()
            .collect();
        active.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(active)
    }

    #[instrument(skip(self, user), fields(name = %user.name))]
    async fn create(&self, user: &User) -> RepoResult<()> {
        let mut users = self.users.write();
        if users.iter().any(|u| u.name_matches(&user.name)) {
            return Err(DomainError::UsernameTaken);
        }
        users.push(user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> RepoResult<()> {
        let mut users = self.users.write();
        let stored = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(DomainError::UserNotFound(user.id))?;
        stored.role = user.role;
        stored.status = user.status;
        stored.avatar_url.clone_from(&user.avatar_url);
        Ok(())
    }

    async fn touch_last_seen(&self, id: UserId, at: DateTime<Utc>) -> RepoResult<()> {
        if let Some(user) = self.users.write().iter_mut().find(|u| u.id == id) {
            user.last_seen_at = Some(at);
        }
        Ok(())
    }

    async fn delete(&self, id: UserId) -> RepoResult<bool> {
        let mut users = self.users.write();
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() < before)
    }
}

#[async_trait]
impl AuditLogRepository for MemoryStore {
    async fn append(&self, entry: &AuditLogEntry) -> RepoResult<()> {
        self.audit_logs.write().push(entry.clone());
        Ok(())
    }

    async fn list_recent(&self, limit: Option<i64>) -> RepoResult<Vec<AuditLogEntry>> {
        let mut entries = newest_first(&self.audit_logs.read(), |e| e.timestamp);
        if let Some(limit) = limit {
            entries.truncate(usize::try_from(limit.max(0)).unwrap_or(usize::MAX));
        }
        Ok(entries)
    }
}

#[async_trait]
impl ItemRepository for MemoryStore {
    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Item>> {
        Ok(self.items.read().get(id).cloned())
    }

    async fn find_by_ids(&self, ids: &[String]) -> RepoResult<Vec<Item>> {
        let items = self.items.read();
        Ok(ids.iter().filter_map(|id| items.get(id).cloned()).collect())
    }

    async fn search(&self, category: ItemCategory, search: Option<&str>) -> RepoResult<Vec<Item>> {
        let mut found: Vec<Item> = self
            .items
            .read()
            .values()
            .filter(|item| item.category == category)
            .filter(|item| search.map_or(true, |needle| item.name_contains(needle)))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(found)
    }

    async fn upsert(&self, item: &Item) -> RepoResult<()> {
        self.items.write().insert(item.id.clone(), item.clone());
        Ok(())
    }
}

#[async_trait]
impl SpellRepository for MemoryStore {
    async fn find_by_ids(&self, ids: &[String]) -> RepoResult<Vec<Spell>> {
        let spells = self.spells.read();
        Ok(ids.iter().filter_map(|id| spells.get(id).cloned()).collect())
    }

    async fn upsert(&self, spell: &Spell) -> RepoResult<()> {
        self.spells.write().insert(spell.id.clone(), spell.clone());
        Ok(())
    }
}

#[async_trait]
impl BuildRepository for MemoryStore {
    async fn list(&self) -> RepoResult<Vec<AuthoredBuild>> {
        let builds = newest_first(&self.builds.read(), |b| b.created_at);
        Ok(builds.into_iter().map(|b| self.with_author(b)).collect())
    }

    async fn find_by_id(&self, id: BuildId) -> RepoResult<Option<AuthoredBuild>> {
        let build = self.builds.read().iter().find(|b| b.id == id).cloned();
        Ok(build.map(|b| self.with_author(b)))
    }

    async fn create(&self, build: &Build) -> RepoResult<()> {
        self.builds.write().push(build.clone());
        Ok(())
    }

    async fn set_ai_guide(&self, id: BuildId, guide: &str) -> RepoResult<()> {
        let mut builds = self.builds.write();
        let build = builds
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(DomainError::BuildNotFound(id))?;
        build.ai_guide = Some(guide.to_string());
        Ok(())
    }
}

#[async_trait]
impl ActivityRepository for MemoryStore {
    async fn append(&self, event: &MemberActivityLog) -> RepoResult<()> {
        self.activity.write().push(event.clone());
        Ok(())
    }

    async fn list_recent(&self, limit: i64) -> RepoResult<Vec<MemberActivityLog>> {
        let mut events = newest_first(&self.activity.read(), |e| e.timestamp);
        events.truncate(usize::try_from(limit.max(0)).unwrap_or(usize::MAX));
        Ok(events)
    }

    async fn list_all(&self) -> RepoResult<Vec<MemberActivityLog>> {
        Ok(self.activity.read().clone())
    }
}
