// src/views.rs
//
// Minimal HTML presenter. Pages are plain strings; every piece of user
// data goes through `html::escape`.

use crate::{
    models::post::Post,
    utils::{flash::Flash, html::escape, session::CurrentUser},
};

/// Informational pages that need no data.
pub struct StaticPage {
    pub path: &'static str,
    pub title: &'static str,
    pub body: &'static str,
}

pub const STATIC_PAGES: &[StaticPage] = &[
    StaticPage {
        path: "/nutrition",
        title: "Nutrition",
        body: "Balanced meals, enough water and fewer processed foods.",
    },
    StaticPage {
        path: "/climate",
        title: "Climate",
        body: "How the environment around us shapes our health.",
    },
    StaticPage {
        path: "/quiz",
        title: "Quiz",
        body: "Test what you know about healthy habits.",
    },
    StaticPage {
        path: "/exercises",
        title: "Exercises",
        body: "Simple routines you can do at home every day.",
    },
    StaticPage {
        path: "/eco_tips",
        title: "Eco tips",
        body: "Small everyday changes that are good for you and the planet.",
    },
    StaticPage {
        path: "/terms",
        title: "Terms of use",
        body: "Content on this site is informational and is not medical advice.",
    },
];

pub fn static_page(path: &str) -> Option<&'static StaticPage> {
    STATIC_PAGES.iter().find(|page| page.path == path)
}

/// Wraps page content with navigation and the pending flash message.
pub fn layout(
    title: &str,
    user: Option<&CurrentUser>,
    flash: Option<&Flash>,
    content: &str,
) -> String {
    let account = match user {
        Some(user) => format!(
            r#"<span>Signed in as {}</span> <a href="/add_post">New post</a> <a href="/logout">Log out</a>"#,
            escape(&user.username)
        ),
        None => r#"<a href="/login">Log in</a> <a href="/register">Register</a>"#.to_string(),
    };

    let flash = flash
        .map(|f| {
            format!(
                r#"<p class="flash {}">{}</p>"#,
                f.kind.as_str(),
                escape(&f.message)
            )
        })
        .unwrap_or_default();

    let links: String = STATIC_PAGES
        .iter()
        .map(|page| format!(r#"<a href="{}">{}</a>"#, page.path, page.title))
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<link rel="stylesheet" href="/static/style.css">
</head>
<body>
<nav><a href="/">Home</a> <a href="/articles">Articles</a> {links} {account}</nav>
{flash}
<main>
<h1>{title}</h1>
{content}
</main>
</body>
</html>"#,
        title = escape(title),
    )
}

pub fn home() -> String {
    "<p>Track your daily progress and read articles about a healthier life.</p>".to_string()
}

pub fn articles(posts: &[Post]) -> String {
    if posts.is_empty() {
        return "<p>No articles yet.</p>".to_string();
    }
    posts
        .iter()
        .map(|post| {
            format!(
                "<article><h2>{}</h2><time>{}</time><p>{}</p></article>",
                escape(&post.title),
                post.created_at.format("%Y-%m-%d %H:%M"),
                escape(&post.content)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn register_form() -> String {
    r#"<form method="post" action="/register">
<label>Username <input name="username" maxlength="20" required></label>
<label>Email <input name="email" type="email" maxlength="120" required></label>
<label>Password <input name="password" type="password" required></label>
<button type="submit">Register</button>
</form>"#
        .to_string()
}

pub fn login_form(next: Option<&str>) -> String {
    let next = next
        .map(|n| format!(r#"<input type="hidden" name="next" value="{}">"#, escape(n)))
        .unwrap_or_default();
    format!(
        r#"<form method="post" action="/login">
{next}
<label>Username <input name="username" required></label>
<label>Password <input name="password" type="password" required></label>
<button type="submit">Log in</button>
</form>"#
    )
}

pub fn add_post_form(error: Option<&str>) -> String {
    let error = error
        .map(|e| format!(r#"<p class="flash error">{}</p>"#, escape(e)))
        .unwrap_or_default();
    format!(
        r#"{error}
<form method="post" action="/add_post">
<label>Title <input name="title" maxlength="100"></label>
<label>Content <textarea name="content"></textarea></label>
<button type="submit">Publish</button>
</form>"#
    )
}
