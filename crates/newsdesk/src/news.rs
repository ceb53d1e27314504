use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use clubhouse_core::{DomainError, DomainResult, NewsId, UserId};

/// A news item. Unpublished items are visible to authenticated members only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct News {
    pub id: NewsId,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub author_id: Option<UserId>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewsDraft {
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    #[serde(default)]
    pub published: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub image: Option<String>,
    pub published: Option<bool>,
}

impl News {
    pub fn create(draft: NewsDraft, author_id: UserId, now: DateTime<Utc>) -> DomainResult<Self> {
        Ok(Self {
            id: NewsId::new(),
            title: non_empty(&draft.title, "title")?,
            content: non_empty(&draft.content, "content")?,
            image: draft.image,
            author_id: Some(author_id),
            published: draft.published,
            created_at: now,
        })
    }

    pub fn apply(&mut self, patch: NewsPatch) -> DomainResult<()> {
        if let Some(title) = patch.title {
            self.title = non_empty(&title, "title")?;
        }
        if let Some(content) = patch.content {
            self.content = non_empty(&content, "content")?;
        }
        if let Some(image) = patch.image {
            self.image = Some(image);
        }
        if let Some(published) = patch.published {
            self.published = published;
        }
        Ok(())
    }
}

fn non_empty(value: &str, what: &str) -> DomainResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{what} cannot be empty")));
    }
    Ok(trimmed.to_string())
}
