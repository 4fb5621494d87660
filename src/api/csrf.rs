//! Anti-forgery cookie access

use percent_encoding::percent_decode_str;
use wasm_bindgen::JsCast;

/// Value of the anti-forgery cookie visible to the page, if any.
pub fn read_csrf_token(cookie_name: &str) -> Option<String> {
    let document = web_sys::window()?
        .document()?
        .dyn_into::<web_sys::HtmlDocument>()
        .ok()?;
    let cookies = document.cookie().ok()?;
    cookie_value(&cookies, cookie_name)
}

/// Find `name` in a `document.cookie` string and percent-decode its value.
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(name)?.strip_prefix('='))
        .map(|raw| percent_decode_str(raw).decode_utf8_lossy().into_owned())
}
