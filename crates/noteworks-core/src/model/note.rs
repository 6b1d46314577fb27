use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user-authored note. Owned exclusively by the store; tags and
/// reminders reference it by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// UUID v4 identifier.
    pub id: String,
    pub title: String,
    pub body: String,
    /// Set once at creation, never mutated.
    pub created_at: DateTime<Utc>,
    /// Bumped on every mutation.
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Title shortened for listings, matching terminal width limits.
    pub fn short_title(&self, max_len: usize) -> String {
        let title = self.title.trim();
        if title.chars().count() > max_len {
            let truncated: String = title.chars().take(max_len).collect();
            format!("{truncated}...")
        } else {
            title.to_string()
        }
    }
}

/// Input for note creation. The store assigns id and timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNote {
    pub title: String,
    pub body: String,
}

/// Partial update. `None` fields are left untouched; `updated_at` is
/// bumped whenever any field changes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoteUpdate {
    pub title: Option<String>,
    pub body: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn note(title: &str) -> Note {
        Note {
            id: "n-1".to_string(),
            title: title.to_string(),
            body: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn short_title_passes_through_short_titles() {
        assert_eq!(note("Groceries").short_title(60), "Groceries");
    }

    #[test]
    fn short_title_truncates_long_titles() {
        let n = note("a very long title that should definitely be cut");
        assert_eq!(n.short_title(10), "a very lon...");
    }

    #[test]
    fn short_title_trims_whitespace() {
        assert_eq!(note("  padded  ").short_title(60), "padded");
    }
}
