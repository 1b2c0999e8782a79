//! Pure aggregations over domain data

mod abilities;
mod activity;

pub use abilities::{group_abilities, AbilityGroups, SpellSlot, SpellSlots};
pub use activity::{daily_buckets, hourly_buckets, ActivityBucket, DAY_LABELS};
