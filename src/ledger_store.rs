use crate::{day::DayKey, ledger::Ledger, log_error, log_internal};
use anyhow::{anyhow, Result};
use serenity::all::UserId;
use std::{
    collections::{BTreeMap, BTreeSet},
    io::ErrorKind,
    path::{Path, PathBuf},
};

/// On-disk shape: day key to ascending user ids
type Durable = BTreeMap<String, Vec<u64>>;

/// Durable home of the attendance ledger, a single JSON file rewritten on every save
pub struct LedgerStore {
    path: PathBuf,
}

impl LedgerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the ledger.  Never fails: a missing file is an empty ledger, and an unreadable one is
    /// logged and replaced by an empty ledger.
    pub async fn load(&self) -> Ledger {
        match self.try_load().await {
            Ok(Some(ledger)) => {
                log_internal!(
                    "Loaded submission history for {} day(s) from `{}`",
                    ledger.day_count(),
                    self.path.to_string_lossy(),
                );
                ledger
            }
            Ok(None) => Ledger::default(),
            Err(e) => {
                log_error!("{}", e);
                Ledger::default()
            }
        }
    }

    /// Write the ledger.  Failures are logged rather than returned; the next mutation retries.
    pub async fn save(&self, ledger: &Ledger) {
        if let Err(e) = self.try_save(ledger).await {
            log_error!("Submission data was not saved: {}", e);
        }
    }

    pub async fn try_load(&self) -> Result<Option<Ledger>> {
        let data = match tokio::fs::read(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(anyhow!(
                    "Could not read submission data at `{}`: {}",
                    self.path.to_string_lossy(),
                    e
                ))
            }
        };

        let durable: Durable = serde_json::from_slice(&data).map_err(|e| {
            anyhow!(
                "Could not parse submission data at `{}`: {}",
                self.path.to_string_lossy(),
                e
            )
        })?;

        decode(durable).map(Some).map_err(|e| {
            anyhow!(
                "Malformed submission data at `{}`: {}",
                self.path.to_string_lossy(),
                e
            )
        })
    }

    pub async fn try_save(&self, ledger: &Ledger) -> Result<()> {
        let serialized = serde_json::to_string_pretty(&encode(ledger))
            .map_err(|e| anyhow!("Could not serialize submission data: {}", e))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                anyhow!(
                    "Could not create directory `{}`: {}",
                    parent.to_string_lossy(),
                    e
                )
            })?;
        }

        // Write next to the target, then atomically rename over it.
        let tmp_path = self.path.with_extension("json.new");

        tokio::fs::write(&tmp_path, serialized).await.map_err(|e| {
            anyhow!(
                "Could not write submission data to temporary file `{}`: {}",
                tmp_path.to_string_lossy(),
                e
            )
        })?;

        tokio::fs::rename(&tmp_path, &self.path).await.map_err(|e| {
            anyhow!(
                "Could not rename temporary file `{}` to `{}`: {}",
                tmp_path.to_string_lossy(),
                self.path.to_string_lossy(),
                e
            )
        })?;

        Ok(())
    }
}

fn encode(ledger: &Ledger) -> Durable {
    ledger
        .days()
        .map(|(day, ids)| (day.to_string(), ids.iter().map(|id| id.get()).collect()))
        .collect()
}

fn decode(durable: Durable) -> Result<Ledger> {
    let mut ledger = Ledger::default();
    for (day, ids) in durable {
        let day: DayKey = day.parse()?;
        let ids = ids
            .into_iter()
            .map(|id| match id {
                0 => Err(anyhow!("user id 0 recorded on {}", day)),
                id => Ok(UserId::new(id)),
            })
            .collect::<Result<BTreeSet<UserId>>>()?;
        ledger.replace(day, ids);
    }
    Ok(ledger)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> DayKey {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = LedgerStore::new(dir.path().join("submissions_data.json"));
        assert!(store.try_load().await.unwrap().is_none());
        assert_eq!(store.load().await.day_count(), 0);
    }

    #[tokio::test]
    async fn malformed_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("submissions_data.json");
        tokio::fs::write(&path, "{ not json").await.unwrap();
        let store = LedgerStore::new(&path);
        assert!(store.try_load().await.is_err());
        assert_eq!(store.load().await.day_count(), 0);
    }

    #[tokio::test]
    async fn bad_day_key_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("submissions_data.json");
        tokio::fs::write(&path, r#"{ "tuesday": [1] }"#).await.unwrap();
        assert!(LedgerStore::new(&path).try_load().await.is_err());
    }

    #[tokio::test]
    async fn two_spellings_of_one_day_are_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("submissions_data.json");
        tokio::fs::write(&path, r#"{ "2024-01-05": [1], "2024-1-5": [2] }"#)
            .await
            .unwrap();
        let store = LedgerStore::new(&path);

        let err = store.try_load().await.unwrap_err();
        assert!(format!("{:#}", err).contains("2024-1-5"));
        // Left on disk untouched for an operator to repair
        assert!(tokio::fs::read_to_string(&path).await.unwrap().contains("2024-1-5"));
    }

    #[tokio::test]
    async fn saves_sorted_pretty_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("submissions_data.json");
        let store = LedgerStore::new(&path);

        let mut ledger = Ledger::default();
        ledger.insert(day("2024-01-02"), UserId::new(30));
        ledger.insert(day("2024-01-02"), UserId::new(4));
        ledger.ensure(day("2024-01-03"));
        store.try_save(&ledger).await.unwrap();

        let written = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(
            written,
            "{\n  \"2024-01-02\": [\n    4,\n    30\n  ],\n  \"2024-01-03\": []\n}"
        );
        assert!(!path.with_extension("json.new").exists());
    }

    #[tokio::test]
    async fn sorted_file_survives_load_then_save_byte_for_byte() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("submissions_data.json");
        let original = "{\n  \"2024-01-01\": [\n    1,\n    2\n  ],\n  \"2024-01-02\": [\n    7\n  ]\n}";
        tokio::fs::write(&path, original).await.unwrap();

        let store = LedgerStore::new(&path);
        let ledger = store.load().await;
        store.save(&ledger).await;

        assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), original);
    }
}
