use std::collections::HashSet;
use std::sync::Mutex;

/// At most one money-request submission per user at a time.
///
/// A second submission while the first is still being uploaded or persisted
/// is refused outright; nothing is queued.
#[derive(Debug, Default)]
pub struct SubmissionGuard {
    in_flight: Mutex<HashSet<i32>>,
}

/// Holds the user's slot; released on drop, whatever the outcome.
#[derive(Debug)]
pub struct InFlight<'a> {
    guard: &'a SubmissionGuard,
    user_id: i32,
}

impl SubmissionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_begin(&self, user_id: i32) -> Option<InFlight<'_>> {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        if !in_flight.insert(user_id) {
            return None;
        }
        Some(InFlight {
            guard: self,
            user_id,
        })
    }

    pub fn is_pending(&self, user_id: i32) -> bool {
        self.in_flight
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(&user_id)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.guard
            .in_flight
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&self.user_id);
    }
}
