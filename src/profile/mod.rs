//! Dog and owner profiles.
//!
//! Profiles are persisted as one versioned [`ProfileBook`] snapshot. Earlier
//! releases stored separate single-dog, single-owner, and multi-owner shapes
//! under their own keys; those are migrated into the book once at load time
//! and the old keys are deleted.

mod context;

pub use context::format_profile_context;

use crate::error::Result;
use crate::storage::KeyValueStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use tracing::{info, warn};
use uuid::Uuid;

/// Storage key for the profile book snapshot.
pub const PROFILES_KEY: &str = "profiles";

/// Current profile schema version.
pub const PROFILE_SCHEMA_VERSION: u32 = 2;

// Keys used by earlier schema generations.
const LEGACY_DOG_KEY: &str = "dogProfile";
const LEGACY_MULTI_DOG_KEY: &str = "multiDogProfile";
const LEGACY_OWNER_KEY: &str = "ownerProfile";
const LEGACY_MULTI_OWNER_KEY: &str = "multiOwnerProfile";

/// One entry in a dog's medical history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MedicalRecord {
    pub date: DateTime<Utc>,
    pub diagnosis: String,
    pub treatment: String,
    #[serde(default)]
    pub veterinarian: String,
    #[serde(default)]
    pub notes: String,
}

/// An active medication.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Medication {
    pub name: String,
    #[serde(default)]
    pub dosage: String,
    #[serde(default)]
    pub frequency: String,
    #[serde(default)]
    pub notes: String,
}

/// A dog's profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DogProfile {
    pub id: Uuid,
    pub name: String,
    pub breed: String,
    pub age_years: Option<u32>,
    pub weight_kg: Option<f64>,
    pub allergies: Vec<String>,
    pub medications: Vec<Medication>,
    pub medical_history: Vec<MedicalRecord>,
    pub special_needs: String,
    pub notes: String,
}

// Every freshly built profile gets its own id; selection by id relies on
// ids being unique across the book.
impl Default for DogProfile {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            breed: String::new(),
            age_years: None,
            weight_kg: None,
            allergies: Vec::new(),
            medications: Vec::new(),
            medical_history: Vec::new(),
            special_needs: String::new(),
            notes: String::new(),
        }
    }
}

/// An owner's profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OwnerProfile {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub preferred_veterinarian: String,
    pub preferred_clinic: String,
    pub notes: String,
}

impl Default for OwnerProfile {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            preferred_veterinarian: String::new(),
            preferred_clinic: String::new(),
            notes: String::new(),
        }
    }
}

impl OwnerProfile {
    /// Full name, or empty when neither part is set.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// The versioned profile snapshot: all dogs and all owners.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProfileBook {
    pub version: u32,
    pub dogs: Vec<DogProfile>,
    pub owners: Vec<OwnerProfile>,
}

impl Default for ProfileBook {
    fn default() -> Self {
        Self {
            version: PROFILE_SCHEMA_VERSION,
            dogs: Vec::new(),
            owners: Vec::new(),
        }
    }
}

impl ProfileBook {
    pub fn is_empty(&self) -> bool {
        self.dogs.is_empty() && self.owners.is_empty()
    }
}

// ============================================================================
// Legacy shapes (schema version 1 and earlier)
// ============================================================================

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct LegacyDogProfile {
    id: Option<Uuid>,
    name: String,
    breed: String,
    age: u32,
    weight: f64,
    allergies: Vec<String>,
    medications: Vec<Medication>,
    #[serde(rename = "medicalHistory")]
    medical_history: Vec<MedicalRecord>,
    #[serde(rename = "specialNeeds")]
    special_needs: String,
    notes: String,
}

impl LegacyDogProfile {
    fn upgrade(self) -> DogProfile {
        DogProfile {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            name: self.name,
            breed: self.breed,
            age_years: (self.age > 0).then_some(self.age),
            weight_kg: (self.weight > 0.0).then_some(self.weight),
            allergies: self.allergies,
            medications: self.medications,
            medical_history: self.medical_history,
            special_needs: self.special_needs,
            notes: self.notes,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct LegacyMultiDogProfile {
    dogs: Vec<LegacyDogProfile>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct LegacyOwnerProfile {
    id: Option<Uuid>,
    #[serde(rename = "firstName")]
    first_name: String,
    #[serde(rename = "lastName")]
    last_name: String,
    email: String,
    phone: String,
    #[serde(rename = "preferredVeterinarian")]
    preferred_veterinarian: String,
    #[serde(rename = "preferredClinic")]
    preferred_clinic: String,
    notes: String,
}

impl LegacyOwnerProfile {
    fn upgrade(self) -> OwnerProfile {
        OwnerProfile {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            preferred_veterinarian: self.preferred_veterinarian,
            preferred_clinic: self.preferred_clinic,
            notes: self.notes,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct LegacyMultiOwnerProfile {
    owners: Vec<LegacyOwnerProfile>,
}

/// Persistent store for the profile book.
pub struct ProfileStore {
    book: RwLock<ProfileBook>,
    storage: Arc<dyn KeyValueStore>,
}

impl ProfileStore {
    /// Load the profile book, migrating legacy shapes if present.
    ///
    /// Migration runs once: old keys are converted, the new snapshot is
    /// persisted, and the old keys are deleted. A corrupt snapshot starts
    /// from an empty book.
    pub fn load_with_migration(storage: Arc<dyn KeyValueStore>) -> Result<Self> {
        if let Some(snapshot) = storage.get(PROFILES_KEY)? {
            let book = match serde_json::from_str(&snapshot) {
                Ok(book) => book,
                Err(e) => {
                    warn!("Corrupt profile snapshot, starting empty: {}", e);
                    ProfileBook::default()
                }
            };
            return Ok(Self {
                book: RwLock::new(book),
                storage,
            });
        }

        let book = Self::migrate_legacy(&*storage)?;
        let store = Self {
            book: RwLock::new(book),
            storage,
        };
        {
            let book = store.book.read().unwrap();
            if !book.is_empty() {
                store.persist(&book)?;
            }
        }
        for key in [
            LEGACY_DOG_KEY,
            LEGACY_MULTI_DOG_KEY,
            LEGACY_OWNER_KEY,
            LEGACY_MULTI_OWNER_KEY,
        ] {
            store.storage.delete(key)?;
        }
        Ok(store)
    }

    fn migrate_legacy(storage: &dyn KeyValueStore) -> Result<ProfileBook> {
        let mut book = ProfileBook::default();

        // Multi-dog shape wins over the older single-dog shape.
        if let Some(raw) = storage.get(LEGACY_MULTI_DOG_KEY)? {
            if let Ok(multi) = serde_json::from_str::<LegacyMultiDogProfile>(&raw) {
                book.dogs = multi.dogs.into_iter().map(LegacyDogProfile::upgrade).collect();
            }
        } else if let Some(raw) = storage.get(LEGACY_DOG_KEY)? {
            if let Ok(dog) = serde_json::from_str::<LegacyDogProfile>(&raw) {
                if !dog.name.is_empty() {
                    book.dogs.push(dog.upgrade());
                }
            }
        }

        if let Some(raw) = storage.get(LEGACY_MULTI_OWNER_KEY)? {
            if let Ok(multi) = serde_json::from_str::<LegacyMultiOwnerProfile>(&raw) {
                book.owners = multi
                    .owners
                    .into_iter()
                    .map(LegacyOwnerProfile::upgrade)
                    .collect();
            }
        } else if let Some(raw) = storage.get(LEGACY_OWNER_KEY)? {
            if let Ok(owner) = serde_json::from_str::<LegacyOwnerProfile>(&raw) {
                if !owner.first_name.is_empty() || !owner.last_name.is_empty() {
                    book.owners.push(owner.upgrade());
                }
            }
        }

        if !book.is_empty() {
            info!(
                "Migrated legacy profiles: {} dog(s), {} owner(s)",
                book.dogs.len(),
                book.owners.len()
            );
        }

        Ok(book)
    }

    fn persist(&self, book: &ProfileBook) -> Result<()> {
        let snapshot = serde_json::to_string(book)?;
        self.storage.set(PROFILES_KEY, &snapshot)
    }

    /// A copy of the current book.
    pub fn book(&self) -> ProfileBook {
        self.book.read().unwrap().clone()
    }

    /// Replace the book and persist it.
    pub fn save(&self, book: ProfileBook) -> Result<()> {
        let mut current = self.book.write().unwrap();
        *current = book;
        self.persist(&current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_fresh_profiles_get_distinct_ids() {
        let a = DogProfile::default();
        let b = DogProfile::default();
        assert!(!a.id.is_nil());
        assert_ne!(a.id, b.id);

        let a = OwnerProfile::default();
        let b = OwnerProfile::default();
        assert!(!a.id.is_nil());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_empty_store_yields_default_book() {
        let store = ProfileStore::load_with_migration(Arc::new(MemoryStore::new())).unwrap();
        let book = store.book();
        assert!(book.is_empty());
        assert_eq!(book.version, PROFILE_SCHEMA_VERSION);
    }

    #[test]
    fn test_save_and_reload() {
        let storage = Arc::new(MemoryStore::new());
        let store = ProfileStore::load_with_migration(storage.clone()).unwrap();

        let mut book = store.book();
        book.dogs.push(DogProfile {
            name: "Momo".to_string(),
            breed: "Shiba Inu".to_string(),
            age_years: Some(4),
            ..Default::default()
        });
        store.save(book.clone()).unwrap();

        let reloaded = ProfileStore::load_with_migration(storage).unwrap();
        assert_eq!(reloaded.book(), book);
    }

    #[test]
    fn test_migrates_legacy_single_profiles() {
        let storage = Arc::new(MemoryStore::new());
        storage
            .set(
                LEGACY_DOG_KEY,
                r#"{"name":"Hachi","breed":"Akita","age":3,"weight":22.5}"#,
            )
            .unwrap();
        storage
            .set(
                LEGACY_OWNER_KEY,
                r#"{"firstName":"Reo","lastName":"Kosaka","phone":"555-1234"}"#,
            )
            .unwrap();

        let store = ProfileStore::load_with_migration(storage.clone()).unwrap();
        let book = store.book();
        assert_eq!(book.dogs.len(), 1);
        assert_eq!(book.dogs[0].name, "Hachi");
        assert_eq!(book.dogs[0].age_years, Some(3));
        assert_eq!(book.owners.len(), 1);
        assert_eq!(book.owners[0].full_name(), "Reo Kosaka");

        // New snapshot written, old keys gone.
        assert!(storage.get(PROFILES_KEY).unwrap().is_some());
        assert!(storage.get(LEGACY_DOG_KEY).unwrap().is_none());
        assert!(storage.get(LEGACY_OWNER_KEY).unwrap().is_none());

        // Reload uses the new key only.
        let reloaded = ProfileStore::load_with_migration(storage).unwrap();
        assert_eq!(reloaded.book(), book);
    }

    #[test]
    fn test_multi_owner_shape_preferred_over_single() {
        let storage = Arc::new(MemoryStore::new());
        storage
            .set(
                LEGACY_MULTI_OWNER_KEY,
                r#"{"owners":[{"firstName":"A"},{"firstName":"B"}]}"#,
            )
            .unwrap();
        storage
            .set(LEGACY_OWNER_KEY, r#"{"firstName":"Old"}"#)
            .unwrap();

        let store = ProfileStore::load_with_migration(storage).unwrap();
        let book = store.book();
        assert_eq!(book.owners.len(), 2);
        assert_eq!(book.owners[0].first_name, "A");
    }

    #[test]
    fn test_age_zero_becomes_unspecified() {
        let storage = Arc::new(MemoryStore::new());
        storage
            .set(LEGACY_DOG_KEY, r#"{"name":"Pup","age":0,"weight":0.0}"#)
            .unwrap();

        let store = ProfileStore::load_with_migration(storage).unwrap();
        let dog = &store.book().dogs[0];
        assert_eq!(dog.age_years, None);
        assert_eq!(dog.weight_kg, None);
    }
}
