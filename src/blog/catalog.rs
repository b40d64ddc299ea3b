//! Compiled-in content: popular tags and the offline sample posts.

use crate::types::{Author, BlogPost};

pub const PLACEHOLDER_IMAGE: &str =
    "https://images.pexels.com/photos/11035380/pexels-photo-11035380.jpeg?auto=compress&cs=tinysrgb&w=800";

const POPULAR_TAGS: &[&str] = &[
    "javascript",
    "react",
    "typescript",
    "nodejs",
    "python",
    "webdev",
    "programming",
    "tutorial",
    "beginners",
    "css",
    "html",
    "vue",
    "angular",
    "nextjs",
    "docker",
    "aws",
    "devops",
    "api",
    "database",
    "frontend",
];

/// Topic tags offered as filters, in display order.
pub fn popular_tags() -> Vec<String> {
    POPULAR_TAGS.iter().map(|tag| tag.to_string()).collect()
}

struct Sample {
    id: &'static str,
    title: &'static str,
    excerpt: &'static str,
    image: &'static str,
    tags: &'static [&'static str],
    published_at: &'static str,
    read_time: u32,
    author: (&'static str, &'static str, &'static str),
    reactions: u64,
}

const SAMPLES: [Sample; 3] = [
    Sample {
        id: "1",
        title: "Building Scalable React Applications",
        excerpt: "Learn best practices for structuring and scaling React applications for enterprise-level projects.",
        image: PLACEHOLDER_IMAGE,
        tags: &["React", "JavaScript", "Architecture"],
        published_at: "2024-01-15",
        read_time: 8,
        author: (
            "John Developer",
            "https://images.pexels.com/photos/774909/pexels-photo-774909.jpeg?auto=compress&cs=tinysrgb&w=150",
            "johndev",
        ),
        reactions: 42,
    },
    Sample {
        id: "2",
        title: "The Future of Web Development",
        excerpt: "Exploring emerging trends and technologies that will shape the future of web development.",
        image: "https://images.pexels.com/photos/1181677/pexels-photo-1181677.jpeg?auto=compress&cs=tinysrgb&w=800",
        tags: &["Web Development", "Technology", "Trends"],
        published_at: "2024-01-10",
        read_time: 6,
        author: (
            "Jane Tech",
            "https://images.pexels.com/photos/1239291/pexels-photo-1239291.jpeg?auto=compress&cs=tinysrgb&w=150",
            "janetech",
        ),
        reactions: 38,
    },
    Sample {
        id: "3",
        title: "Mastering TypeScript",
        excerpt: "A comprehensive guide to advanced TypeScript features and best practices for better code quality.",
        image: "https://images.pexels.com/photos/4164418/pexels-photo-4164418.jpeg?auto=compress&cs=tinysrgb&w=800",
        tags: &["TypeScript", "JavaScript", "Programming"],
        published_at: "2024-01-05",
        read_time: 10,
        author: (
            "Mike Coder",
            "https://images.pexels.com/photos/1222271/pexels-photo-1222271.jpeg?auto=compress&cs=tinysrgb&w=150",
            "mikecoder",
        ),
        reactions: 55,
    },
];

/// Hand-authored posts shown when the listing endpoint is unreachable.
pub fn sample_posts() -> Vec<BlogPost> {
    SAMPLES
        .iter()
        .map(|sample| BlogPost {
            id: sample.id.to_string(),
            title: sample.title.to_string(),
            excerpt: sample.excerpt.to_string(),
            content: "Full blog content here...".to_string(),
            image: sample.image.to_string(),
            tags: sample.tags.iter().map(|t| t.to_string()).collect(),
            published_at: sample.published_at.to_string(),
            read_time: sample.read_time,
            author: Author {
                name: sample.author.0.to_string(),
                avatar: sample.author.1.to_string(),
                username: sample.author.2.to_string(),
            },
            url: "#".to_string(),
            reactions: sample.reactions,
        })
        .collect()
}
