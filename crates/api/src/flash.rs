//! Carries a [`Flash`] across the post/redirect/get hop in a one-shot cookie.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use rowset_core::flash::Flash;

pub const FLASH_COOKIE: &str = "rowset_flash";

/// Queue `flash` for the next page load.
pub fn set_flash(jar: CookieJar, flash: &Flash, secure: bool) -> CookieJar {
    jar.add(
        Cookie::build((FLASH_COOKIE, flash.encode()))
            .path("/")
            .http_only(true)
            .secure(secure)
            .same_site(SameSite::Lax),
    )
}

/// Read the pending flash, if any, and expire its cookie.
pub fn take_flash(jar: CookieJar) -> (CookieJar, Option<Flash>) {
    let Some(raw) = jar.get(FLASH_COOKIE).map(|c| c.value().to_string()) else {
        return (jar, None);
    };
    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/"));
    (jar, Flash::decode(&raw))
}
