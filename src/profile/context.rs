//! Formatting of profile data into prompt context text.
//!
//! The output is a plain-text block the summarization prompt treats as
//! opaque background information.

use super::{DogProfile, OwnerProfile, ProfileBook};
use std::collections::HashSet;
use uuid::Uuid;

/// Rendered in place of an absent scalar field.
const NOT_SPECIFIED: &str = "Not specified";

/// How many medical history entries to include per dog.
const MAX_HISTORY_ENTRIES: usize = 3;

fn or_not_specified(value: &str) -> &str {
    if value.trim().is_empty() {
        NOT_SPECIFIED
    } else {
        value
    }
}

fn format_dog(out: &mut String, dog: &DogProfile) {
    out.push_str(&format!("Dog: {}\n", or_not_specified(&dog.name)));
    out.push_str(&format!("  Breed: {}\n", or_not_specified(&dog.breed)));
    match dog.age_years {
        Some(age) => out.push_str(&format!("  Age: {} years\n", age)),
        None => out.push_str(&format!("  Age: {}\n", NOT_SPECIFIED)),
    }
    match dog.weight_kg {
        Some(weight) => out.push_str(&format!("  Weight: {} kg\n", weight)),
        None => out.push_str(&format!("  Weight: {}\n", NOT_SPECIFIED)),
    }

    if !dog.allergies.is_empty() {
        out.push_str(&format!("  Allergies: {}\n", dog.allergies.join(", ")));
    }
    if !dog.special_needs.trim().is_empty() {
        out.push_str(&format!("  Special needs: {}\n", dog.special_needs));
    }

    if !dog.medications.is_empty() {
        out.push_str("  Active medications:\n");
        for med in &dog.medications {
            let mut line = format!("    - {}", med.name);
            let details: Vec<&str> = [med.dosage.as_str(), med.frequency.as_str()]
                .into_iter()
                .filter(|s| !s.trim().is_empty())
                .collect();
            if !details.is_empty() {
                line.push_str(&format!(" ({})", details.join(", ")));
            }
            line.push('\n');
            out.push_str(&line);
        }
    }

    if !dog.medical_history.is_empty() {
        // Newest first, capped at the most recent entries.
        let mut history: Vec<_> = dog.medical_history.iter().collect();
        history.sort_by(|a, b| b.date.cmp(&a.date));
        history.truncate(MAX_HISTORY_ENTRIES);

        out.push_str("  Recent medical history:\n");
        for entry in history {
            let mut line = format!(
                "    - {}: {}",
                entry.date.format("%Y-%m-%d"),
                or_not_specified(&entry.diagnosis)
            );
            if !entry.treatment.trim().is_empty() {
                line.push_str(&format!(", treated with {}", entry.treatment));
            }
            if !entry.veterinarian.trim().is_empty() {
                line.push_str(&format!(" ({})", entry.veterinarian));
            }
            line.push('\n');
            out.push_str(&line);
        }
    }
}

fn format_owner(out: &mut String, owner: &OwnerProfile) {
    out.push_str(&format!("Owner: {}\n", or_not_specified(&owner.full_name())));
    out.push_str(&format!("  Phone: {}\n", or_not_specified(&owner.phone)));
    out.push_str(&format!("  Email: {}\n", or_not_specified(&owner.email)));
    out.push_str(&format!(
        "  Preferred veterinarian: {}\n",
        or_not_specified(&owner.preferred_veterinarian)
    ));
    out.push_str(&format!(
        "  Preferred clinic: {}\n",
        or_not_specified(&owner.preferred_clinic)
    ));
}

/// Serialize profiles into the prompt context block.
///
/// When a dog selection is given, only the selected dogs appear. The visit
/// purpose line is omitted entirely when the purpose is blank. An empty book
/// with no purpose yields an empty string, which callers treat as "no
/// profile section".
pub fn format_profile_context(
    book: &ProfileBook,
    selected_dogs: Option<&HashSet<Uuid>>,
    visit_purpose: Option<&str>,
) -> String {
    let mut out = String::new();

    for dog in &book.dogs {
        if let Some(selection) = selected_dogs {
            if !selection.contains(&dog.id) {
                continue;
            }
        }
        format_dog(&mut out, dog);
    }

    for owner in &book.owners {
        format_owner(&mut out, owner);
    }

    if let Some(purpose) = visit_purpose {
        if !purpose.trim().is_empty() {
            out.push_str(&format!("Visit purpose: {}\n", purpose.trim()));
        }
    }

    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{MedicalRecord, Medication};
    use chrono::{Duration, Utc};

    fn dog(name: &str) -> DogProfile {
        DogProfile {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_absent_fields_render_not_specified() {
        let book = ProfileBook {
            dogs: vec![dog("Momo")],
            ..Default::default()
        };
        let text = format_profile_context(&book, None, None);
        assert!(text.contains("Dog: Momo"));
        assert!(text.contains("Breed: Not specified"));
        assert!(text.contains("Age: Not specified"));
        // Empty lists are omitted, not "Not specified".
        assert!(!text.contains("Allergies"));
        assert!(!text.contains("medical history"));
    }

    #[test]
    fn test_selection_filters_dogs() {
        let a = dog("A");
        let b = dog("B");
        let selection: HashSet<Uuid> = [a.id].into_iter().collect();
        let book = ProfileBook {
            dogs: vec![a, b],
            ..Default::default()
        };

        let text = format_profile_context(&book, Some(&selection), None);
        assert!(text.contains("Dog: A"));
        assert!(!text.contains("Dog: B"));
    }

    #[test]
    fn test_two_selected_dogs_empty_purpose() {
        let a = dog("A");
        let b = dog("B");
        let selection: HashSet<Uuid> = [a.id, b.id].into_iter().collect();
        let book = ProfileBook {
            dogs: vec![a, b],
            ..Default::default()
        };

        let text = format_profile_context(&book, Some(&selection), Some("   "));
        assert!(text.contains("Dog: A"));
        assert!(text.contains("Dog: B"));
        // A blank purpose produces no purpose line at all.
        assert!(!text.contains("Visit purpose"));
        assert!(!text.contains("purpose: Not specified"));
    }

    #[test]
    fn test_history_limited_to_three_newest_first() {
        let now = Utc::now();
        let mut d = dog("Momo");
        for i in 0..5 {
            d.medical_history.push(MedicalRecord {
                date: now - Duration::days(i),
                diagnosis: format!("diagnosis-{}", i),
                treatment: String::new(),
                veterinarian: String::new(),
                notes: String::new(),
            });
        }
        let book = ProfileBook {
            dogs: vec![d],
            ..Default::default()
        };

        let text = format_profile_context(&book, None, None);
        assert!(text.contains("diagnosis-0"));
        assert!(text.contains("diagnosis-1"));
        assert!(text.contains("diagnosis-2"));
        assert!(!text.contains("diagnosis-3"));

        let pos0 = text.find("diagnosis-0").unwrap();
        let pos2 = text.find("diagnosis-2").unwrap();
        assert!(pos0 < pos2, "newest entry should come first");
    }

    #[test]
    fn test_medication_details() {
        let mut d = dog("Momo");
        d.medications.push(Medication {
            name: "Apoquel".to_string(),
            dosage: "16mg".to_string(),
            frequency: "twice daily".to_string(),
            notes: String::new(),
        });
        let book = ProfileBook {
            dogs: vec![d],
            ..Default::default()
        };

        let text = format_profile_context(&book, None, None);
        assert!(text.contains("- Apoquel (16mg, twice daily)"));
    }

    #[test]
    fn test_empty_book_yields_empty_string() {
        let book = ProfileBook::default();
        assert_eq!(format_profile_context(&book, None, None), "");
        assert_eq!(format_profile_context(&book, None, Some("  ")), "");
    }

    #[test]
    fn test_purpose_line_when_present() {
        let book = ProfileBook::default();
        let text = format_profile_context(&book, None, Some("Annual checkup"));
        assert_eq!(text, "Visit purpose: Annual checkup");
    }

    #[test]
    fn test_owner_block() {
        let book = ProfileBook {
            owners: vec![OwnerProfile {
                first_name: "Reo".to_string(),
                last_name: "Kosaka".to_string(),
                phone: "555-1234".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let text = format_profile_context(&book, None, None);
        assert!(text.contains("Owner: Reo Kosaka"));
        assert!(text.contains("Phone: 555-1234"));
        assert!(text.contains("Email: Not specified"));
    }
}
