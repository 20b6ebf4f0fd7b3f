//! Timeline construction
//!
//! Orders events chronologically and assigns stable sequence numbers.

use crate::{Event, Timeline};

/// Builder stage: stable-sorts events by `time` ascending and assigns
/// 1-based `step_num` values.
///
/// The sort must be stable so that events with identical time strings keep
/// their original parse order; `slice::sort_by` guarantees this. The sort
/// key ignores `step_num`, so re-running the builder renumbers consistently.
pub struct TimelineBuilder;

impl TimelineBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, mut events: Vec<Event>) -> Timeline {
        events.sort_by(|a, b| a.time.cmp(&b.time));
        for (index, event) in events.iter_mut().enumerate() {
            event.step_num = Some(index as u32 + 1);
        }
        Timeline { events }
    }
}

impl Default for TimelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
