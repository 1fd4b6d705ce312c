//! Per-date mutual exclusion for chapter generation.

use std::{
  collections::HashMap,
  sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use chrono::NaiveDate;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type Table = HashMap<NaiveDate, Arc<AsyncMutex<()>>>;

/// A table of async mutexes keyed by date. Entries exist only while some
/// request holds or waits on them.
#[derive(Debug, Clone, Default)]
pub struct DateLocks {
  table: Arc<Mutex<Table>>,
}

impl DateLocks {
  pub fn new() -> Self {
    Self::default()
  }

  fn table(&self) -> MutexGuard<'_, Table> {
    self.table.lock().unwrap_or_else(PoisonError::into_inner)
  }

  fn slot(&self, date: NaiveDate) -> Arc<AsyncMutex<()>> {
    Arc::clone(self.table().entry(date).or_default())
  }

  /// Wait until `date` is free, then hold it until the guard drops.
  pub async fn lock(&self, date: NaiveDate) -> DateGuard {
    // Declared before the wait so it drops after the pending acquisition
    // when the caller gives up.
    let _waiting = Waiting { date, locks: self };
    let guard = self.slot(date).lock_owned().await;
    DateGuard { date, guard: Some(guard), locks: self.clone() }
  }

  /// Take `date` only if nobody holds it.
  pub fn try_lock(&self, date: NaiveDate) -> Option<DateGuard> {
    let guard = self.slot(date).try_lock_owned().ok();
    match guard {
      Some(guard) => Some(DateGuard { date, guard: Some(guard), locks: self.clone() }),
      None => {
        self.prune(date);
        None
      }
    }
  }

  /// Number of dates currently tracked.
  pub fn len(&self) -> usize {
    self.table().len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Drop the entry for `date` once only the table refers to it.
  fn prune(&self, date: NaiveDate) {
    let mut table = self.table();
    if table.get(&date).is_some_and(|slot| Arc::strong_count(slot) == 1) {
      table.remove(&date);
    }
  }
}

/// Prunes on the way out of [`DateLocks::lock`]. A granted guard still
/// refers to the slot, so this only removes entries a cancelled wait left.
struct Waiting<'a> {
  date:  NaiveDate,
  locks: &'a DateLocks,
}

impl Drop for Waiting<'_> {
  fn drop(&mut self) {
    self.locks.prune(self.date);
  }
}

/// Exclusive hold on one date.
#[derive(Debug)]
pub struct DateGuard {
  date:  NaiveDate,
  guard: Option<OwnedMutexGuard<()>>,
  locks: DateLocks,
}

impl DateGuard {
  pub fn date(&self) -> NaiveDate {
    self.date
  }
}

impl Drop for DateGuard {
  fn drop(&mut self) {
    // Release first so the slot's count reflects only waiters.
    drop(self.guard.take());
    self.locks.prune(self.date);
  }
}

#[cfg(test)]
mod tests {
  use std::time::Duration;

  use super::*;

  fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
  }

  #[tokio::test]
  async fn same_date_is_exclusive() {
    let locks = DateLocks::new();
    let held = locks.lock(day(1)).await;
    assert!(locks.try_lock(day(1)).is_none());
    assert!(locks.try_lock(day(2)).is_some());
    drop(held);
    assert!(locks.try_lock(day(1)).is_some());
  }

  #[tokio::test]
  async fn entries_are_pruned_when_released() {
    let locks = DateLocks::new();
    {
      let _a = locks.lock(day(1)).await;
      let _b = locks.lock(day(2)).await;
      assert_eq!(locks.len(), 2);
    }
    assert!(locks.is_empty());

    let _held = locks.lock(day(3)).await;
    assert!(locks.try_lock(day(3)).is_none());
    assert_eq!(locks.len(), 1);
  }

  #[tokio::test]
  async fn waiter_proceeds_after_release() {
    let locks = DateLocks::new();
    let held = locks.lock(day(1)).await;

    let waiter = {
      let locks = locks.clone();
      tokio::spawn(async move { locks.lock(day(1)).await.date() })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(!waiter.is_finished());

    drop(held);
    assert_eq!(waiter.await.unwrap(), day(1));
    assert!(locks.is_empty());
  }

  #[tokio::test]
  async fn abandoned_waiter_leaves_no_entry() {
    let locks = DateLocks::new();
    let held = locks.lock(day(1)).await;

    let waiter = {
      let locks = locks.clone();
      tokio::spawn(async move { locks.lock(day(1)).await.date() })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;

    // The release hands the lock to the queued waiter, which is then
    // cancelled before it ever runs again.
    drop(held);
    waiter.abort();
    assert!(waiter.await.unwrap_err().is_cancelled());
    assert!(locks.is_empty());
  }
}
