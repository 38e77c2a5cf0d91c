//! Profile command implementation.

use super::open_storage;
use crate::cli::{Output, ProfileAction};
use crate::config::Settings;
use crate::profile::{DogProfile, OwnerProfile, ProfileStore};
use anyhow::Result;

/// Run the profile command.
pub fn run_profile(action: &ProfileAction, settings: Settings) -> Result<()> {
    let store = ProfileStore::load_with_migration(open_storage(&settings)?)?;

    match action {
        ProfileAction::Show => {
            let book = store.book();
            if book.is_empty() {
                Output::info("No profiles yet. Add one with 'kiku profile add-dog <name>'.");
                return Ok(());
            }

            if !book.dogs.is_empty() {
                Output::header(&format!("Dogs ({})", book.dogs.len()));
                for dog in &book.dogs {
                    let mut details = Vec::new();
                    if !dog.breed.is_empty() {
                        details.push(dog.breed.clone());
                    }
                    if let Some(age) = dog.age_years {
                        details.push(format!("{} years", age));
                    }
                    if let Some(weight) = dog.weight_kg {
                        details.push(format!("{} kg", weight));
                    }
                    let suffix = if details.is_empty() {
                        String::new()
                    } else {
                        format!(" ({})", details.join(", "))
                    };
                    Output::list_item(&format!("{}{}", dog.name, suffix));
                    Output::kv("id", &dog.id.to_string());
                }
            }

            if !book.owners.is_empty() {
                Output::header(&format!("Owners ({})", book.owners.len()));
                for owner in &book.owners {
                    Output::list_item(&owner.full_name());
                    Output::kv("id", &owner.id.to_string());
                }
            }
        }

        ProfileAction::AddDog {
            name,
            breed,
            age,
            weight,
        } => {
            let mut book = store.book();
            let dog = DogProfile {
                name: name.clone(),
                breed: breed.clone().unwrap_or_default(),
                age_years: *age,
                weight_kg: *weight,
                ..Default::default()
            };
            let id = dog.id;
            book.dogs.push(dog);
            store.save(book)?;

            Output::success(&format!("Added dog profile for {}.", name));
            Output::kv("id", &id.to_string());
        }

        ProfileAction::AddOwner {
            first_name,
            last_name,
            email,
            phone,
        } => {
            let mut book = store.book();
            let owner = OwnerProfile {
                first_name: first_name.clone(),
                last_name: last_name.clone(),
                email: email.clone().unwrap_or_default(),
                phone: phone.clone().unwrap_or_default(),
                ..Default::default()
            };
            let id = owner.id;
            let name = owner.full_name();
            book.owners.push(owner);
            store.save(book)?;

            Output::success(&format!("Added owner profile for {}.", name));
            Output::kv("id", &id.to_string());
        }
    }

    Ok(())
}
