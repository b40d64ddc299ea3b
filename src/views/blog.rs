use crate::app::AppServices;
use crate::blog::{FeedSnapshot, display_date, popular_tags};
use crate::types::BlogPost;
use dioxus::prelude::*;

#[component]
pub fn BlogView() -> Element {
    let services = use_context::<AppServices>();
    let snapshot = use_signal(|| services.feed.snapshot());

    use_feed_subscription(services.clone(), snapshot);

    let snap = snapshot();
    let banner = snap.error.as_ref().map(|err| err.user_message());
    let posts: Vec<BlogPost> = snap.visible_posts().into_iter().cloned().collect();
    let selected = snap.selected_tag.clone();
    let search_feed = services.feed.clone();

    rsx! {
        section { class: "blog",
            h2 { "Latest ", span { class: "gradient-text", "Articles" } }
            div { class: "blog-controls",
                input {
                    class: "search-input",
                    r#type: "search",
                    placeholder: "Search articles...",
                    value: "{snap.search_term}",
                    oninput: move |evt: FormEvent| {
                        let feed = search_feed.clone();
                        let text = evt.value();
                        spawn(async move {
                            feed.set_search_term(&text).await;
                        });
                    },
                }
                div { class: "tag-list",
                    for tag in popular_tags() {
                        TagChip {
                            key: "{tag}",
                            active: selected.as_deref() == Some(tag.as_str()),
                            tag: tag.clone(),
                        }
                    }
                }
            }
            {banner.map(|message| rsx! { ErrorBanner { message } })}
            if snap.is_loading() {
                div { class: "loading", "Loading articles..." }
            } else if posts.is_empty() {
                p { class: "text-muted", "No articles found." }
            } else {
                div { class: "post-grid",
                    for post in posts {
                        PostCard { key: "{post.id}", post }
                    }
                }
            }
        }
    }
}

/// Loads the first page and mirrors controller state into `snapshot`.
fn use_feed_subscription(services: AppServices, snapshot: Signal<FeedSnapshot>) {
    use_hook(move || {
        let feed = services.feed.clone();
        let mut receiver = feed.subscribe();
        let mut snapshot = snapshot;
        spawn(async move {
            while receiver.changed().await.is_ok() {
                let next = receiver.borrow_and_update().clone();
                snapshot.set(next);
            }
        });
        spawn(async move {
            feed.load().await;
        });
    });
}

#[component]
fn TagChip(tag: String, active: bool) -> Element {
    let services = use_context::<AppServices>();
    let class = if active { "tag-chip active" } else { "tag-chip" };
    let label = tag.clone();
    rsx! {
        button {
            class: class,
            r#type: "button",
            onclick: move |_| {
                let feed = services.feed.clone();
                let tag = tag.clone();
                spawn(async move {
                    feed.toggle_tag(&tag).await;
                });
            },
            "#{label}"
        }
    }
}

#[component]
fn ErrorBanner(message: &'static str) -> Element {
    let services = use_context::<AppServices>();
    let retry_feed = services.feed.clone();
    let dismiss_feed = services.feed.clone();
    rsx! {
        div { class: "error-banner", role: "alert",
            span { "{message}" }
            button {
                class: "btn",
                r#type: "button",
                onclick: move |_| {
                    let feed = retry_feed.clone();
                    spawn(async move {
                        feed.retry().await;
                    });
                },
                "Retry"
            }
            button {
                class: "btn btn-ghost",
                r#type: "button",
                onclick: move |_| dismiss_feed.dismiss_error(),
                "Dismiss"
            }
        }
    }
}

#[component]
fn PostCard(post: BlogPost) -> Element {
    let published = display_date(&post.published_at);
    rsx! {
        article { class: "post-card",
            div { class: "post-cover",
                img { src: "{post.image}", alt: "{post.title}" }
                span { class: "badge read-time", "{post.read_time} min read" }
                div { class: "badge author",
                    img { class: "avatar", src: "{post.author.avatar}", alt: "{post.author.name}" }
                    span { "{post.author.name}" }
                }
            }
            div { class: "post-body",
                div { class: "post-meta",
                    span { "{published}" }
                    span { "♥ {post.reactions}" }
                }
                h3 { "{post.title}" }
                p { class: "excerpt", "{post.excerpt}" }
                div { class: "post-tags",
                    for tag in post.tags.iter() {
                        span { class: "tag-chip", "#{tag}" }
                    }
                }
                a {
                    class: "read-more",
                    href: "{post.url}",
                    target: "_blank",
                    rel: "noopener noreferrer",
                    "Read on dev.to"
                }
            }
        }
    }
}
