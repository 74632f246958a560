//! Persistent content store using RocksDB.
//!
//! Key layout:
//!
//! - `profile` - the singleton profile
//! - `publication:{digest}` - one key per publication
//! - `news:{date}:{digest}` - one key per news item
//! - `contact:{timestamp}:{seq}:{digest}` - append-only contact messages

use crate::error::Result;
use folio_model::{
    sort_news_for_display, sort_publications_for_display, ContactMessage, News, Profile,
    Publication,
};
use rocksdb::{Options, WriteBatch, DB};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

const PROFILE_KEY: &[u8] = b"profile";
const PUBLICATION_PREFIX: &[u8] = b"publication:";
const NEWS_PREFIX: &[u8] = b"news:";
const CONTACT_PREFIX: &[u8] = b"contact:";

/// Content loaded in one go by the admin `seed` command.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedBundle {
    #[serde(default)]
    pub profile: Option<Profile>,
    #[serde(default)]
    pub publications: Vec<Publication>,
    #[serde(default)]
    pub news: Vec<News>,
}

/// Storage backend for portfolio content.
pub struct Storage {
    db: DB,
    /// Next contact sequence number; keeps keys unique within one timestamp.
    contact_seq: AtomicU64,
}

impl Storage {
    /// Open or create storage at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        let db = DB::open(&opts, path)?;
        let stored = count_prefix(&db, CONTACT_PREFIX)?;
        Ok(Self {
            db,
            contact_seq: AtomicU64::new(stored as u64),
        })
    }

    // --- Profile ---

    /// Get the profile, if one has been seeded.
    pub fn get_profile(&self) -> Result<Option<Profile>> {
        match self.db.get(PROFILE_KEY)? {
            Some(data) => Ok(Some(serde_json::from_slice(&data)?)),
            None => Ok(None),
        }
    }

    /// Store the profile, replacing any previous one.
    pub fn put_profile(&self, profile: &Profile) -> Result<()> {
        profile.validate()?;
        self.db.put(PROFILE_KEY, serde_json::to_vec(profile)?)?;
        tracing::info!("Stored profile for {}", profile.name);
        Ok(())
    }

    // --- Publications ---

    /// Store a publication. Re-storing identical title/authors/year overwrites.
    pub fn put_publication(&self, publication: &Publication) -> Result<()> {
        publication.validate()?;
        let key = publication_key(publication);
        self.db.put(key, serde_json::to_vec(publication)?)?;
        tracing::info!("Stored publication: {} ({})", publication.title, publication.year);
        Ok(())
    }

    /// List all publications, newest first.
    pub fn list_publications(&self) -> Result<Vec<Publication>> {
        let mut publications = self.scan(PUBLICATION_PREFIX)?;
        sort_publications_for_display(&mut publications);
        Ok(publications)
    }

    // --- News ---

    /// Store a news item.
    pub fn put_news(&self, news: &News) -> Result<()> {
        news.validate()?;
        self.db.put(news_key(news), serde_json::to_vec(news)?)?;
        tracing::info!("Stored news item: {} ({})", news.title, news.date);
        Ok(())
    }

    /// List all news items, newest first.
    pub fn list_news(&self) -> Result<Vec<News>> {
        let mut news = self.scan(NEWS_PREFIX)?;
        sort_news_for_display(&mut news);
        Ok(news)
    }

    // --- Contact messages ---

    /// Append a contact message. A single put, so the record lands whole or not at all.
    pub fn put_contact_message(&self, message: &ContactMessage) -> Result<()> {
        let seq = self.contact_seq.fetch_add(1, Ordering::Relaxed);
        let key = format!("contact:{}:{:016x}:{}", message.timestamp, seq, message.id);
        self.db.put(key.as_bytes(), serde_json::to_vec(message)?)?;
        Ok(())
    }

    /// Number of stored contact messages.
    pub fn count_contact_messages(&self) -> Result<usize> {
        count_prefix(&self.db, CONTACT_PREFIX)
    }

    // --- Seeding ---

    /// Load a bundle in one atomic batch. Every record is validated before anything is written.
    pub fn seed(&self, bundle: &SeedBundle) -> Result<()> {
        let mut batch = WriteBatch::default();

        if let Some(profile) = &bundle.profile {
            profile.validate()?;
            batch.put(PROFILE_KEY, serde_json::to_vec(profile)?);
        }
        for publication in &bundle.publications {
            publication.validate()?;
            batch.put(publication_key(publication), serde_json::to_vec(publication)?);
        }
        for news in &bundle.news {
            news.validate()?;
            batch.put(news_key(news), serde_json::to_vec(news)?);
        }

        self.db.write(batch)?;
        tracing::info!(
            profile = bundle.profile.is_some(),
            publications = bundle.publications.len(),
            news = bundle.news.len(),
            "Seeded content"
        );
        Ok(())
    }

    /// Decode every value under `prefix`. The iterator reads from one implicit snapshot.
    fn scan<T: DeserializeOwned>(&self, prefix: &[u8]) -> Result<Vec<T>> {
        let mut records = Vec::new();
        for item in self.db.prefix_iterator(prefix) {
            let (key, value) = item?;
            if !key.starts_with(prefix) {
                break;
            }
            records.push(serde_json::from_slice(&value)?);
        }
        Ok(records)
    }
}

fn count_prefix(db: &DB, prefix: &[u8]) -> Result<usize> {
    let mut count = 0;
    for item in db.prefix_iterator(prefix) {
        let (key, _) = item?;
        if !key.starts_with(prefix) {
            break;
        }
        count += 1;
    }
    Ok(count)
}

fn publication_key(publication: &Publication) -> Vec<u8> {
    format!("publication:{}", publication.record_id()).into_bytes()
}

fn news_key(news: &News) -> Vec<u8> {
    format!("news:{}", news.record_id()).into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use chrono::{TimeZone, Utc};
    use folio_model::{ContactSubmission, PublicationType, ValidationError};
    use tempfile::tempdir;

    fn sample_profile() -> Profile {
        Profile {
            name: "Dr. A. Singh".into(),
            title: Some("Research Associate".into()),
            affiliation: "Department of Engineering".into(),
            bio: "Turbulent reacting flows.".into(),
            email: "a.singh@example.org".into(),
            phone: "+44 1223 000000".into(),
            address: "Cambridge, UK".into(),
            research_interests: vec!["Spray Combustion".into(), "Heat Transfer".into()],
        }
    }

    #[test]
    fn profile_absent_until_seeded() {
        let dir = tempdir().unwrap();
        let storage = Storage::open(dir.path()).unwrap();
        assert!(storage.get_profile().unwrap().is_none());

        storage.put_profile(&sample_profile()).unwrap();
        assert_eq!(storage.get_profile().unwrap(), Some(sample_profile()));
    }

    #[test]
    fn profile_read_returns_latest_write() {
        let dir = tempdir().unwrap();
        let storage = Storage::open(dir.path()).unwrap();
        storage.put_profile(&sample_profile()).unwrap();

        let mut updated = sample_profile();
        updated.bio = "Updated bio.".into();
        storage.put_profile(&updated).unwrap();
        assert_eq!(storage.get_profile().unwrap().unwrap().bio, "Updated bio.");
    }

    #[test]
    fn publications_listed_newest_first() {
        let dir = tempdir().unwrap();
        let storage = Storage::open(dir.path()).unwrap();
        assert!(storage.list_publications().unwrap().is_empty());

        storage
            .put_publication(&Publication::new(
                "Turbulence Models",
                "B. Rao",
                2019,
                PublicationType::Conference,
            ))
            .unwrap();
        storage
            .put_publication(&Publication::new(
                "Flame Dynamics",
                "A. Singh",
                2022,
                PublicationType::Journal,
            ))
            .unwrap();

        let years: Vec<_> = storage
            .list_publications()
            .unwrap()
            .iter()
            .map(|p| p.year)
            .collect();
        assert_eq!(years, [2022, 2019]);
    }

    #[test]
    fn republishing_overwrites() {
        let dir = tempdir().unwrap();
        let storage = Storage::open(dir.path()).unwrap();
        let publication =
            Publication::new("Flame Dynamics", "A. Singh", 2022, PublicationType::Submitted);
        storage.put_publication(&publication).unwrap();
        storage
            .put_publication(&publication.clone().with_journal("Combust. Flame"))
            .unwrap();

        let stored = storage.list_publications().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].journal.as_deref(), Some("Combust. Flame"));
    }

    #[test]
    fn invalid_publication_rejected() {
        let dir = tempdir().unwrap();
        let storage = Storage::open(dir.path()).unwrap();
        let result =
            storage.put_publication(&Publication::new("T", "A", 22, PublicationType::Journal));
        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::InvalidYear(22)))
        ));
        assert!(storage.list_publications().unwrap().is_empty());
    }

    #[test]
    fn news_listed_newest_first() {
        let dir = tempdir().unwrap();
        let storage = Storage::open(dir.path()).unwrap();
        storage.put_news(&News::new("Old", "c", "2020-01-01")).unwrap();
        storage.put_news(&News::new("New", "c", "2024-06-30")).unwrap();

        let titles: Vec<_> = storage.list_news().unwrap().into_iter().map(|n| n.title).collect();
        assert_eq!(titles, ["New", "Old"]);
    }

    #[test]
    fn contact_messages_append() {
        let dir = tempdir().unwrap();
        let storage = Storage::open(dir.path()).unwrap();
        assert_eq!(storage.count_contact_messages().unwrap(), 0);

        for subject in ["One", "Two"] {
            let message = ContactSubmission::new("Ada", "ada@example.org", subject, "Hi")
                .accept(Utc::now())
                .unwrap();
            storage.put_contact_message(&message).unwrap();
        }
        assert_eq!(storage.count_contact_messages().unwrap(), 2);
        // Contact records never leak into content listings
        assert!(storage.list_news().unwrap().is_empty());
    }

    #[test]
    fn identical_contact_messages_both_kept() {
        let dir = tempdir().unwrap();
        let storage = Storage::open(dir.path()).unwrap();
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let submission = ContactSubmission::new("Ada", "ada@example.org", "Hello", "Hi");

        let first = submission.clone().accept(at).unwrap();
        let second = submission.accept(at).unwrap();
        assert_eq!(first, second);

        storage.put_contact_message(&first).unwrap();
        storage.put_contact_message(&second).unwrap();
        assert_eq!(storage.count_contact_messages().unwrap(), 2);
    }

    #[test]
    fn contact_sequence_survives_reopen() {
        let dir = tempdir().unwrap();
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let message = ContactSubmission::new("Ada", "ada@example.org", "Hello", "Hi")
            .accept(at)
            .unwrap();
        {
            let storage = Storage::open(dir.path()).unwrap();
            storage.put_contact_message(&message).unwrap();
        }
        let storage = Storage::open(dir.path()).unwrap();
        storage.put_contact_message(&message).unwrap();
        assert_eq!(storage.count_contact_messages().unwrap(), 2);
    }

    #[test]
    fn seed_is_all_or_nothing() {
        let dir = tempdir().unwrap();
        let storage = Storage::open(dir.path()).unwrap();

        let bad = SeedBundle {
            profile: Some(sample_profile()),
            publications: vec![Publication::new("Ok", "A", 2020, PublicationType::Journal)],
            news: vec![News::new("Bad date", "c", "last week")],
        };
        assert!(storage.seed(&bad).is_err());
        assert!(storage.get_profile().unwrap().is_none());
        assert!(storage.list_publications().unwrap().is_empty());

        let good = SeedBundle {
            news: vec![News::new("Good date", "c", "2023-03-03")],
            ..bad
        };
        storage.seed(&good).unwrap();
        assert!(storage.get_profile().unwrap().is_some());
        assert_eq!(storage.list_publications().unwrap().len(), 1);
        assert_eq!(storage.list_news().unwrap().len(), 1);
    }

    #[test]
    fn reopen_keeps_content() {
        let dir = tempdir().unwrap();
        {
            let storage = Storage::open(dir.path()).unwrap();
            storage.put_profile(&sample_profile()).unwrap();
        }
        let storage = Storage::open(dir.path()).unwrap();
        assert!(storage.get_profile().unwrap().is_some());
    }
}
