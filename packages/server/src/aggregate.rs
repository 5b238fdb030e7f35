use serde::Serialize;

use crate::entity::achievement;

/// Occurrence counts per event type, in order of first appearance.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct EventCounts(Vec<EventCount>);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct EventCount {
    #[schema(example = "Workshop")]
    pub event_type: String,
    #[schema(example = 2)]
    pub count: u64,
}

impl EventCounts {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EventCount> {
        self.0.iter()
    }

    fn bump(&mut self, event_type: &str) {
        match self.0.iter_mut().find(|e| e.event_type == event_type) {
            Some(entry) => entry.count += 1,
            None => self.0.push(EventCount {
                event_type: event_type.to_string(),
                count: 1,
            }),
        }
    }
}

impl<'a> IntoIterator for &'a EventCounts {
    type Item = &'a EventCount;
    type IntoIter = std::slice::Iter<'a, EventCount>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Count how often each event type occurs.
pub fn count_by_event<'a, I>(event_types: I) -> EventCounts
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts = EventCounts::default();
    for event_type in event_types {
        counts.bump(event_type);
    }
    counts
}

pub fn total<T>(records: &[T]) -> u64 {
    records.len() as u64
}

/// Total plus per-event counts for one result set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct Tally {
    #[schema(example = 3)]
    pub total: u64,
    pub counts: EventCounts,
}

impl Tally {
    pub fn of(records: &[achievement::Model]) -> Self {
        Self {
            total: total(records),
            counts: count_by_event(records.iter().map(|r| r.event_type.as_str())),
        }
    }
}
