use std::fs;
use std::mem;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{info, warn};

use super::RuleTables;
use crate::error::{Result, RuleSourceError};

/// Where rule tables are loaded from.
pub trait RuleSource: Send + Sync {
    fn load(&self) -> Result<RuleTables, RuleSourceError>;
}

/// Traditional tables shipped with the crate: the twelve zodiac hours,
/// golden-hour patterns for every day branch and hoàng-đạo days by lunar
/// month.
#[derive(Debug, Copy, Clone, Default)]
pub struct BundledSource;

const BUNDLED_RULES: &str = include_str!("../../data/rules.json");

impl RuleSource for BundledSource {
    fn load(&self) -> Result<RuleTables, RuleSourceError> {
        RuleTables::from_json(BUNDLED_RULES)
    }
}

/// Tables read from a JSON file, in the format of
/// [`RuleTables::from_json`].
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_owned(),
        }
    }
}

impl RuleSource for JsonFileSource {
    fn load(&self) -> Result<RuleTables, RuleSourceError> {
        let json = fs::read_to_string(&self.path)?;
        RuleTables::from_json(&json)
    }
}

impl RuleSource for RuleTables {
    fn load(&self) -> Result<RuleTables, RuleSourceError> {
        Ok(self.clone())
    }
}

/// Rule tables kept in memory as an immutable snapshot.
///
/// Readers take the current snapshot and keep using it even if the cache
/// is invalidated meanwhile; [`invalidate`](Self::invalidate) swaps in a
/// freshly loaded one.
///
/// # Example
///
/// ```
/// use amlich::rules::{resolve_golden_hours, BundledSource, RuleCache};
///
/// let cache = RuleCache::new(BundledSource)?;
/// let rules = cache.snapshot();
/// assert_eq!(6, resolve_golden_hours(&rules, "Giáp Tý")?.len());
/// # Ok::<(), amlich::Error>(())
/// ```
pub struct RuleCache<S> {
    source: S,
    current: RwLock<Arc<RuleTables>>,
}

impl<S: RuleSource> RuleCache<S> {
    /// Loads the first snapshot from `source`.
    pub fn new(source: S) -> Result<Self> {
        let tables = load_logged(&source)?;
        Ok(Self {
            source,
            current: RwLock::new(Arc::new(tables)),
        })
    }

    pub fn snapshot(&self) -> Arc<RuleTables> {
        Arc::clone(&self.current.read())
    }

    /// Reloads the tables from the source and replaces the snapshot.
    ///
    /// On failure the previous snapshot stays in place and the error is
    /// returned.
    pub fn invalidate(&self) -> Result<()> {
        warn!("rule cache invalidated");
        let tables = load_logged(&self.source).inspect_err(|e| {
            warn!(error = %e, "reloading rule tables failed, keeping previous snapshot");
        })?;
        // last owner of the old snapshot frees it here, outside the lock
        drop(self.replace(tables));
        Ok(())
    }

    /// Installs `tables` and hands back the previous snapshot, the write
    /// guard already released.
    fn replace(&self, tables: RuleTables) -> Arc<RuleTables> {
        let mut current = self.current.write();
        mem::replace(&mut *current, Arc::new(tables))
    }
}

fn load_logged(source: &impl RuleSource) -> Result<RuleTables> {
    let tables = source.load()?;
    info!(
        good_days = tables.good_day_count(),
        golden_hour_patterns = tables.pattern_count(),
        zodiac_hours = tables.zodiac_hour_count(),
        "rule tables loaded"
    );
    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::rules::{FortuneType, RuleProvider, resolve_golden_hours};

    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn bundled() {
        let tables = BundledSource.load().unwrap();
        assert_eq!(12, tables.zodiac_hour_count());
        assert_eq!(12, tables.pattern_count());
        assert_eq!(48, tables.good_day_count());
        assert_eq!(Some(FortuneType::HoangDao), tables.good_day(1, "ti"));
        assert_eq!(None, tables.good_day(1, "dan"));

        for (day, first) in [("Tý", "ti"), ("Ngọ", "ti"), ("Sửu", "dan"), ("Hợi", "suu")] {
            let blocks = resolve_golden_hours(&tables, day).unwrap();
            assert_eq!(6, blocks.len(), "{day}");
            assert_eq!(first, blocks[0].branch, "{day}");
        }
    }

    #[test]
    fn json_file() {
        let path = std::env::temp_dir().join(format!("amlich-rules-{}.json", std::process::id()));
        fs::write(
            &path,
            r#"{"zodiac_hours": [{"branch_code": "ngo", "start_hour": 11, "end_hour": 13}]}"#,
        )
        .unwrap();
        let tables = JsonFileSource::new(&path).load().unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(1, tables.zodiac_hour_count());

        assert!(matches!(
            JsonFileSource::new(&path).load(),
            Err(RuleSourceError::Io(_))
        ));
    }

    /// Serves a different table on each load, failing on the third.
    struct Counting(AtomicUsize);

    impl RuleSource for Counting {
        fn load(&self) -> Result<RuleTables, RuleSourceError> {
            let n = self.0.fetch_add(1, Ordering::SeqCst);
            if n == 2 {
                return RuleTables::from_json("[");
            }
            Ok(RuleTables::default().with_zodiac_hour("ti", 23, n as u32))
        }
    }

    #[test]
    fn invalidate_swaps_snapshot() {
        let cache = RuleCache::new(Counting(AtomicUsize::new(0))).unwrap();
        let old = cache.snapshot();
        assert_eq!(0, old.zodiac_hour("ti").unwrap().end_hour);

        cache.invalidate().unwrap();
        assert_eq!(1, cache.snapshot().zodiac_hour("ti").unwrap().end_hour);
        // readers holding the old snapshot are unaffected
        assert_eq!(0, old.zodiac_hour("ti").unwrap().end_hour);

        assert!(matches!(cache.invalidate(), Err(Error::RuleSource(_))));
        assert_eq!(1, cache.snapshot().zodiac_hour("ti").unwrap().end_hour);
    }

    #[test]
    fn replaced_snapshot_outlives_write_lock() {
        let cache = RuleCache::new(Counting(AtomicUsize::new(0))).unwrap();
        let old = cache.replace(RuleTables::default().with_zodiac_hour("ti", 23, 7));
        // readers are not locked out while the old snapshot is still alive
        assert!(cache.current.try_read().is_some());
        assert_eq!(1, Arc::strong_count(&old));
        assert_eq!(0, old.zodiac_hour("ti").unwrap().end_hour);
        assert_eq!(7, cache.snapshot().zodiac_hour("ti").unwrap().end_hour);
    }

    #[test]
    fn static_tables_as_source() {
        let cache = RuleCache::new(RuleTables::default().with_pattern("ti", "ti")).unwrap();
        assert_eq!(1, cache.snapshot().pattern_count());
        cache.invalidate().unwrap();
        assert_eq!(1, cache.snapshot().pattern_count());
    }
}
