//! Parse-and-normalize boundary for upstream article records.
//!
//! Every fallback rule lives here; nothing past [`normalize`] sees a partially
//! shaped record.

use super::catalog::PLACEHOLDER_IMAGE;
use crate::types::{Author, BlogPost};
use serde::Deserialize;
use serde_json::Value;

pub const DEFAULT_READ_TIME: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArticleParseError {
    #[error("article record is not a JSON object")]
    NotAnObject,

    #[error("article record is missing field '{0}'")]
    MissingField(&'static str),

    #[error("article record is malformed: {0}")]
    Malformed(String),
}

#[derive(Deserialize)]
struct RawArticle {
    id: Option<Value>,
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    cover_image: Option<String>,
    published_at: Option<String>,
    reading_time_minutes: Option<u32>,
    #[serde(default)]
    tag_list: Option<TagList>,
    user: Option<RawUser>,
    public_reactions_count: Option<u64>,
}

#[derive(Deserialize)]
struct RawUser {
    name: Option<String>,
    username: Option<String>,
    profile_image: Option<String>,
}

/// Listing endpoints send an array; single-article payloads send "a, b, c".
#[derive(Deserialize)]
#[serde(untagged)]
enum TagList {
    List(Vec<String>),
    Joined(String),
}

impl TagList {
    fn into_vec(self) -> Vec<String> {
        match self {
            TagList::List(tags) => tags,
            TagList::Joined(joined) => joined
                .split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn article_id(value: Option<Value>) -> Result<String, ArticleParseError> {
    match value {
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::String(s)) if !s.is_empty() => Ok(s),
        Some(other) => Err(ArticleParseError::Malformed(format!(
            "unexpected id {other}"
        ))),
        None => Err(ArticleParseError::MissingField("id")),
    }
}

/// Converts one upstream record into a fully populated [`BlogPost`].
pub fn normalize(record: Value) -> Result<BlogPost, ArticleParseError> {
    if !record.is_object() {
        return Err(ArticleParseError::NotAnObject);
    }
    let raw: RawArticle =
        serde_json::from_value(record).map_err(|e| ArticleParseError::Malformed(e.to_string()))?;

    let id = article_id(raw.id)?;
    let title = non_empty(raw.title).ok_or(ArticleParseError::MissingField("title"))?;
    let url = raw.url.ok_or(ArticleParseError::MissingField("url"))?;
    let published_at = raw
        .published_at
        .ok_or(ArticleParseError::MissingField("published_at"))?;
    let user = raw.user.ok_or(ArticleParseError::MissingField("user"))?;

    let username = user.username.unwrap_or_default();
    let author = Author {
        name: non_empty(user.name).unwrap_or_else(|| username.clone()),
        avatar: user.profile_image.unwrap_or_default(),
        username,
    };

    Ok(BlogPost {
        id,
        excerpt: non_empty(raw.description).unwrap_or_else(|| title.clone()),
        title,
        content: String::new(),
        image: non_empty(raw.cover_image).unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
        tags: raw.tag_list.map(TagList::into_vec).unwrap_or_default(),
        published_at,
        read_time: raw
            .reading_time_minutes
            .filter(|minutes| *minutes > 0)
            .unwrap_or(DEFAULT_READ_TIME),
        author,
        url,
        reactions: raw.public_reactions_count.unwrap_or(0),
    })
}

/// Normalizes a listing body. Records that fail normalization are dropped
/// and logged; a body that is not an array is an error.
pub fn normalize_listing(body: Value) -> Result<Vec<BlogPost>, ArticleParseError> {
    let Value::Array(records) = body else {
        return Err(ArticleParseError::Malformed(
            "listing body is not an array".to_string(),
        ));
    };

    let mut posts = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        match normalize(record) {
            Ok(post) => posts.push(post),
            Err(err) => tracing::warn!(index, error = %err, "skipping malformed article"),
        }
    }
    Ok(posts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_record() -> Value {
        json!({
            "id": 1842,
            "title": "Ownership in practice",
            "description": "Borrowing without tears",
            "url": "https://dev.to/ana/ownership",
            "cover_image": "https://cdn.example/cover.png",
            "published_at": "2024-03-02T10:00:00Z",
            "reading_time_minutes": 7,
            "tag_list": ["rust", "beginners", "rust"],
            "user": {
                "name": "Ana",
                "username": "ana",
                "profile_image": "https://cdn.example/ana.png"
            },
            "public_reactions_count": 31
        })
    }

    #[test]
    fn maps_complete_record() {
        let post = normalize(full_record()).unwrap();
        assert_eq!(post.id, "1842");
        assert_eq!(post.excerpt, "Borrowing without tears");
        assert_eq!(post.content, "");
        assert_eq!(post.image, "https://cdn.example/cover.png");
        assert_eq!(post.tags, vec!["rust", "beginners", "rust"]);
        assert_eq!(post.read_time, 7);
        assert_eq!(post.author.avatar, "https://cdn.example/ana.png");
        assert_eq!(post.reactions, 31);
    }

    #[test]
    fn applies_fallbacks() {
        let mut record = full_record();
        record["cover_image"] = Value::Null;
        record["description"] = json!("");
        record["reading_time_minutes"] = json!(0);
        record.as_object_mut().unwrap().remove("public_reactions_count");

        let post = normalize(record).unwrap();
        assert_eq!(post.image, PLACEHOLDER_IMAGE);
        assert_eq!(post.excerpt, post.title);
        assert_eq!(post.read_time, DEFAULT_READ_TIME);
        assert_eq!(post.reactions, 0);
    }

    #[test]
    fn accepts_joined_tag_string() {
        let mut record = full_record();
        record["tag_list"] = json!("rust, webdev ,wasm");
        assert_eq!(normalize(record).unwrap().tags, vec!["rust", "webdev", "wasm"]);
    }

    #[test]
    fn rejects_missing_required_fields() {
        let mut record = full_record();
        record.as_object_mut().unwrap().remove("url");
        assert_eq!(normalize(record), Err(ArticleParseError::MissingField("url")));

        assert_eq!(normalize(json!("nope")), Err(ArticleParseError::NotAnObject));
    }

    #[test]
    fn listing_skips_bad_records_and_keeps_order() {
        let mut second = full_record();
        second["id"] = json!(2);
        let body = json!([full_record(), {"id": 9}, second]);

        let posts = normalize_listing(body).unwrap();
        let ids: Vec<_> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1842", "2"]);
    }

    #[test]
    fn listing_must_be_array() {
        assert!(normalize_listing(json!({"error": "rate limited"})).is_err());
    }
}
