use axum::{
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};

use crate::{handlers::page::PageContext, views};

pub async fn index(page: PageContext) -> Response {
    page.render("Site Health", &views::home())
}

/// Serves any entry of `views::STATIC_PAGES` by request path.
pub async fn static_page(page: PageContext, uri: Uri) -> Response {
    match views::static_page(uri.path()) {
        Some(static_page) => page.render(static_page.title, &format!("<p>{}</p>", static_page.body)),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
