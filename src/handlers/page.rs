// src/handlers/page.rs

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
    response::{AppendHeaders, Html, IntoResponse, Redirect, Response},
};

use crate::{
    state::AppState,
    utils::{
        cookies::{self, FLASH_COOKIE},
        flash::{self, Flash},
        session::CurrentUser,
    },
    views,
};

/// Everything a rendered page needs from the request: who is logged in
/// and which flash message is waiting to be shown.
#[derive(Debug, Clone)]
pub struct PageContext {
    pub user: Option<CurrentUser>,
    pub flash: Option<Flash>,
    flash_cookie_present: bool,
}

impl FromRequestParts<AppState> for PageContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self {
            user: parts.extensions.get::<CurrentUser>().cloned(),
            flash: flash::peek(&parts.headers, &state.config.secret_key),
            flash_cookie_present: cookies::get(&parts.headers, FLASH_COOKIE).is_some(),
        })
    }
}

impl PageContext {
    /// Replaces the pending flash with a message produced by this request.
    pub fn with_flash(mut self, flash: Flash) -> Self {
        self.flash = Some(flash);
        self
    }

    /// Renders the page and consumes the flash cookie.
    pub fn render(self, title: &str, content: &str) -> Response {
        let body = views::layout(title, self.user.as_ref(), self.flash.as_ref(), content);
        if self.flash_cookie_present {
            (
                AppendHeaders([(header::SET_COOKIE, cookies::clear(FLASH_COOKIE))]),
                Html(body),
            )
                .into_response()
        } else {
            Html(body).into_response()
        }
    }
}

/// 303 redirect carrying a flash message for the next page.
pub fn redirect_with_flash(to: &str, flash: Flash, secret: &str) -> Response {
    match flash::set_cookie(flash, secret) {
        Ok(cookie) => (AppendHeaders([(header::SET_COOKIE, cookie)]), Redirect::to(to)).into_response(),
        Err(e) => {
            tracing::error!("Failed to sign flash: {}", e);
            Redirect::to(to).into_response()
        }
    }
}
