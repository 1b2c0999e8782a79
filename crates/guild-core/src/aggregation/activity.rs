//! Chart buckets over member activity events

use chrono::{Datelike, FixedOffset, Timelike};
use serde::Serialize;
use std::collections::BTreeSet;

use crate::entities::MemberActivityLog;

/// Weekday labels, Sunday first
pub const DAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// One chart bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityBucket {
    pub label: String,
    pub count: u32,
    /// Distinct member names, sorted
    pub members: Vec<String>,
}

fn bucketize<F>(events: &[MemberActivityLog], labels: Vec<String>, bucket_of: F) -> Vec<ActivityBucket>
where
    F: Fn(&MemberActivityLog) -> usize,
{
    let mut counts = vec![0u32; labels.len()];
    let mut members = vec![BTreeSet::<&str>::new(); labels.len()];
    for event in events {
        let index = bucket_of(event);
        counts[index] += 1;
        members[index].insert(event.member_name.as_str());
    }

    labels
        .into_iter()
        .zip(counts)
        .zip(members)
        .map(|((label, count), members)| ActivityBucket {
            label,
            count,
            members: members.into_iter().map(ToString::to_string).collect(),
        })
        .collect()
}

/// Seven buckets, Sunday through Saturday, in the given local offset
pub fn daily_buckets(events: &[MemberActivityLog], offset: FixedOffset) -> Vec<ActivityBucket> {
    let labels = DAY_LABELS.iter().map(ToString::to_string).collect();
    bucketize(events, labels, |event| {
        event
            .timestamp
            .with_timezone(&offset)
            .weekday()
            .num_days_from_sunday() as usize
    })
}

/// Twenty-four buckets, hours `00` through `23` in UTC
pub fn hourly_buckets(events: &[MemberActivityLog]) -> Vec<ActivityBucket> {
    let labels = (0..24).map(|hour| format!("{hour:02}")).collect();
    bucketize(events, labels, |event| event.timestamp.hour() as usize)
}
