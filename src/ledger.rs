use crate::{
    day::{Clock, DayKey},
    ledger_store::LedgerStore,
    roster::{self, Partition, Roster},
};
use anyhow::Result;
use serenity::all::UserId;
use std::{
    collections::{BTreeMap, BTreeSet},
    sync::Arc,
};
use tokio::sync::Mutex;

/// Who submitted on which day
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ledger(BTreeMap<DayKey, BTreeSet<UserId>>);

impl Ledger {
    /// Returns true if `id` was not already recorded for `day`
    pub fn insert(&mut self, day: DayKey, id: UserId) -> bool {
        self.0.entry(day).or_default().insert(id)
    }

    /// Submitters for `day`.  Reading never creates an entry.
    pub fn get(&self, day: &DayKey) -> BTreeSet<UserId> {
        self.0.get(day).cloned().unwrap_or_default()
    }

    #[cfg(test)]
    pub fn contains_day(&self, day: &DayKey) -> bool {
        self.0.contains_key(day)
    }

    /// Returns true if an empty entry had to be created
    pub fn ensure(&mut self, day: DayKey) -> bool {
        use std::collections::btree_map::Entry::*;
        match self.0.entry(day) {
            Occupied(_) => false,
            Vacant(vacant) => {
                vacant.insert(BTreeSet::new());
                true
            }
        }
    }

    pub fn replace(&mut self, day: DayKey, ids: BTreeSet<UserId>) {
        self.0.insert(day, ids);
    }

    pub fn clear(&mut self, day: DayKey) {
        self.replace(day, BTreeSet::new());
    }

    pub fn day_count(&self) -> usize {
        self.0.len()
    }

    pub fn days(&self) -> impl Iterator<Item = (&DayKey, &BTreeSet<UserId>)> {
        self.0.iter()
    }
}

/// The attendance ledger together with its storage and clock.
///
/// Every mutation and the save that follows it happen under one lock, so the heartbeat and the
/// message handlers never observe or persist a half-applied change.
pub struct Attendance {
    ledger: Mutex<Ledger>,
    store: LedgerStore,
    clock: Arc<dyn Clock>,
}

impl Attendance {
    /// Load the ledger from `store` and make sure today has an entry
    pub async fn open(store: LedgerStore, clock: Arc<dyn Clock>) -> Self {
        let ledger = store.load().await;
        let attendance = Self {
            ledger: Mutex::new(ledger),
            store,
            clock,
        };
        attendance.ensure_today().await;
        attendance
    }

    /// Final flush before the process goes away
    pub async fn close(&self) -> Result<()> {
        self.flush().await
    }

    pub fn today(&self) -> DayKey {
        self.clock.today()
    }

    /// Record a submission.  Returns false if `id` had already submitted on `day`, in which case
    /// nothing changed and nothing is saved.
    pub async fn record(&self, day: DayKey, id: UserId) -> bool {
        let mut ledger = self.ledger.lock().await;
        let added = ledger.insert(day, id);
        if added {
            self.store.save(&ledger).await;
        }
        added
    }

    pub async fn get(&self, day: &DayKey) -> BTreeSet<UserId> {
        self.ledger.lock().await.get(day)
    }

    pub async fn ensure_today(&self) -> DayKey {
        let today = self.today();
        let mut ledger = self.ledger.lock().await;
        if ledger.ensure(today) {
            self.store.save(&ledger).await;
        }
        today
    }

    /// Begin tracking `day`, saving unconditionally.  Used on rollover.
    pub async fn start_day(&self, day: DayKey) -> Result<()> {
        let mut ledger = self.ledger.lock().await;
        ledger.ensure(day);
        self.store.try_save(&ledger).await
    }

    pub async fn clear(&self, day: DayKey) {
        let mut ledger = self.ledger.lock().await;
        ledger.clear(day);
        self.store.save(&ledger).await;
    }

    pub async fn flush(&self) -> Result<()> {
        let ledger = self.ledger.lock().await;
        self.store.try_save(&ledger).await
    }

    pub async fn partition(&self, day: &DayKey, roster: &Roster) -> Partition {
        let ledger = self.ledger.lock().await;
        roster::partition(&ledger, day, roster)
    }

    #[cfg(test)]
    pub async fn snapshot(&self) -> Ledger {
        self.ledger.lock().await.clone()
    }
}
