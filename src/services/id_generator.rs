use chrono::Utc;
use parking_lot::Mutex;

/// Timestamp-derived item ids, unique within the process.
///
/// Ids are Unix milliseconds; when two ids are requested within the same
/// millisecond the later one is bumped past the previous value.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: Mutex<i64>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> String {
        self.next_from(Utc::now().timestamp_millis()).to_string()
    }

    fn next_from(&self, now_millis: i64) -> i64 {
        let mut last = self.last.lock();
        let id = if now_millis > *last { now_millis } else { *last + 1 };
        *last = id;
        id
    }
}
