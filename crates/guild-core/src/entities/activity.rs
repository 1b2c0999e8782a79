//! Member activity event - one connection of a guild member

use chrono::{DateTime, Utc};

use crate::value_objects::ActivityLogId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberActivityLog {
    pub id: ActivityLogId,
    pub member_name: String,
    pub timestamp: DateTime<Utc>,
}

impl MemberActivityLog {
    pub fn new(member_name: String, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: ActivityLogId::new(),
            member_name,
            timestamp,
        }
    }
}
