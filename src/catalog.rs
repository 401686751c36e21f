use std::collections::HashMap;

use async_trait::async_trait;
use ulid::Ulid;

use crate::engine::EngineError;
use crate::model::Court;

/// Read-only lookup into the court catalog. The engine never creates or
/// mutates courts; it only asks whether one exists and which courts belong
/// to a sport class.
///
/// An implementation whose courts can be deleted concurrently must not
/// report a court as existing if a subsequent reservation insert for it
/// could land after the deletion.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn court_exists(&self, court_id: Ulid) -> Result<bool, EngineError>;

    /// Court ids in a class, in catalog order. Empty for unknown classes.
    async fn courts_in_class(&self, class: &str) -> Result<Vec<Ulid>, EngineError>;
}

/// Immutable in-memory [`Catalog`], built once from an already-seeded court
/// set. Because it never changes, an existence check can never go stale
/// against a later insert.
pub struct StaticCatalog {
    courts: HashMap<Ulid, Court>,
    by_class: HashMap<String, Vec<Ulid>>,
}

impl StaticCatalog {
    pub fn new(courts: Vec<Court>) -> Self {
        let mut by_class: HashMap<String, Vec<(u32, Ulid)>> = HashMap::new();
        for court in &courts {
            by_class
                .entry(court.class.clone())
                .or_default()
                .push((court.number, court.id));
        }
        let by_class = by_class
            .into_iter()
            .map(|(class, mut ids)| {
                ids.sort();
                (class, ids.into_iter().map(|(_, id)| id).collect())
            })
            .collect();
        Self {
            courts: courts.into_iter().map(|c| (c.id, c)).collect(),
            by_class,
        }
    }

    pub fn get(&self, court_id: Ulid) -> Option<&Court> {
        self.courts.get(&court_id)
    }

    /// Distinct sport classes, sorted.
    pub fn classes(&self) -> Vec<String> {
        let mut classes: Vec<String> = self.by_class.keys().cloned().collect();
        classes.sort();
        classes
    }
}

#[async_trait]
impl Catalog for StaticCatalog {
    async fn court_exists(&self, court_id: Ulid) -> Result<bool, EngineError> {
        Ok(self.courts.contains_key(&court_id))
    }

    async fn courts_in_class(&self, class: &str) -> Result<Vec<Ulid>, EngineError> {
        Ok(self.by_class.get(class).cloned().unwrap_or_default())
    }
}
