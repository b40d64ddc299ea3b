use crate::types::BlogPost;

/// Number of posts shown at once.
pub const DISPLAY_LIMIT: usize = 6;

fn matches_term(post: &BlogPost, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    term.is_empty()
        || post.title.to_lowercase().contains(&term)
        || post.excerpt.to_lowercase().contains(&term)
}

fn matches_tag(post: &BlogPost, tag: Option<&str>) -> bool {
    match tag {
        None => true,
        Some(tag) => {
            let tag = tag.to_lowercase();
            post.tags.iter().any(|t| t.to_lowercase() == tag)
        }
    }
}

/// Client-side filter over a fetched listing. Term and tag are ANDed.
pub fn filter_posts<'a>(posts: &'a [BlogPost], term: &str, tag: Option<&str>) -> Vec<&'a BlogPost> {
    posts
        .iter()
        .filter(|post| matches_term(post, term) && matches_tag(post, tag))
        .collect()
}

/// Posts to display. Server-searched results skip the client-side pass.
pub fn visible_posts<'a>(
    posts: &'a [BlogPost],
    search_term: &str,
    tag: Option<&str>,
) -> Vec<&'a BlogPost> {
    let mut visible = if search_term.trim().is_empty() {
        filter_posts(posts, search_term, tag)
    } else {
        posts.iter().collect()
    };
    visible.truncate(DISPLAY_LIMIT);
    visible
}
