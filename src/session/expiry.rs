/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/

//! Session expiry notification.
//!
//! The server announces when the current session ends through the
//! `startdeliver-expires-at` response header. Once a callback is registered,
//! every successful response carrying that header reschedules a single
//! timer so that the callback runs 15 minutes before the declared expiry.

use crate::constants::{EXPIRES_AT_HEADER, EXPIRY_MARGIN_MINUTES};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use reqwest::header::HeaderMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

const JS_DATE_FORMAT: &str = "%a %b %d %Y %H:%M:%S GMT%z";
const NAIVE_DATE_TIME_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Callback invoked shortly before the session expires
pub type ExpireFn = Arc<dyn Fn() + Send + Sync>;

/// Owner of the expiry callback and of the single pending timer
///
/// Scheduling a new timer always aborts the previous one first, so at most
/// one timer is pending at any time. Dropping the notifier aborts it too.
#[derive(Default)]
pub struct ExpiryNotifier {
    callback: Mutex<Option<ExpireFn>>,
    timer: Mutex<Option<JoinHandle<()>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ExpiryNotifier {
    /// Creates a notifier with no callback
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the callback used by [`observe`](Self::observe)
    pub fn set_callback(&self, callback: ExpireFn) {
        *lock(&self.callback) = Some(callback);
    }

    /// Whether a callback has been registered
    #[must_use]
    pub fn has_callback(&self) -> bool {
        lock(&self.callback).is_some()
    }

    /// Schedules `callback` to run after `delay`, replacing any pending timer
    ///
    /// A zero or negative delay runs the callback as soon as the runtime
    /// polls the timer task. Outside a tokio runtime nothing is scheduled.
    pub fn schedule(&self, callback: ExpireFn, delay: Duration) {
        let Ok(runtime) = Handle::try_current() else {
            warn!("No tokio runtime available, expiry callback not scheduled");
            return;
        };
        let wait = delay.to_std().unwrap_or_default();
        let mut timer = lock(&self.timer);
        if let Some(previous) = timer.take() {
            previous.abort();
        }
        debug!("Expiry callback scheduled in {} ms", wait.as_millis());
        *timer = Some(runtime.spawn(async move {
            tokio::time::sleep(wait).await;
            callback();
        }));
    }

    /// Reschedules the registered callback from the response headers
    ///
    /// # Returns
    /// The delay that was scheduled, or `None` when no callback is registered
    /// or the header is missing. A value that cannot be read as a date
    /// schedules the callback with no delay.
    pub fn observe(&self, headers: &HeaderMap, now: DateTime<Utc>) -> Option<Duration> {
        let value = headers.get(EXPIRES_AT_HEADER)?;
        let callback = lock(&self.callback).clone()?;
        let raw = String::from_utf8_lossy(value.as_bytes());
        let delay = match parse_expires_at(&raw) {
            Some(expires_at) => notice_delay(expires_at, now),
            None => {
                warn!("Unreadable {} header: {}, notifying now", EXPIRES_AT_HEADER, raw);
                Duration::zero()
            }
        };
        self.schedule(callback, delay);
        Some(delay)
    }

    /// Aborts the pending timer, if any
    pub fn cancel(&self) {
        if let Some(timer) = lock(&self.timer).take() {
            timer.abort();
        }
    }

    /// Whether a timer is scheduled and has not fired yet
    #[must_use]
    pub fn is_pending(&self) -> bool {
        lock(&self.timer)
            .as_ref()
            .is_some_and(|timer| !timer.is_finished())
    }
}

impl Drop for ExpiryNotifier {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Delay from `now` until the notice point, 15 minutes before `expires_at`
#[must_use]
pub fn notice_delay(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    expires_at - now - Duration::minutes(EXPIRY_MARGIN_MINUTES)
}

/// Parses the `startdeliver-expires-at` header
///
/// Accepts RFC 3339, RFC 2822, the JavaScript `Date.prototype.toString()`
/// form (`Wed Oct 14 2026 12:00:00 GMT+0000 (Coordinated Universal Time)`),
/// ISO dates and date-times without a zone (read as UTC, `T` or space
/// separated) and a plain epoch timestamp in milliseconds.
#[must_use]
pub fn parse_expires_at(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    let without_zone_name = raw.split(" (").next().unwrap_or(raw).trim_end();
    if let Ok(parsed) = DateTime::parse_from_str(without_zone_name, JS_DATE_FORMAT) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|midnight| midnight.and_utc());
    }

    raw.parse::<i64>()
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
}
