use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE, COOKIE, REFERER, USER_AGENT,
};

/// Referer expected by the game gateway for in-game navigation
pub const GAME_REFERER: &str = "https://dld.qzapp.z.qq.com/qpet/cgi-bin/phonepk?cmd=index";

/// Build browser-like headers for game requests
///
/// The gateway serves the mobile site only to clients that look like a phone
/// browser and carry the account's session cookie.
pub fn build_game_headers(cookie: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();

    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(
            "Mozilla/5.0 (Linux; Android 13; Pixel 7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Mobile Safari/537.36",
        ),
    );
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static("zh-CN,zh;q=0.9,en-US;q=0.8,en;q=0.7"),
    );
    headers.insert(
        ACCEPT_ENCODING,
        HeaderValue::from_static("gzip, deflate, br"),
    );
    headers.insert(REFERER, HeaderValue::from_static(GAME_REFERER));

    // A cookie with non-ASCII bytes cannot become a header value; the
    // request then goes out unauthenticated and the relogin marker in the
    // payload surfaces the problem at the check probe.
    if let Ok(value) = HeaderValue::from_str(cookie) {
        headers.insert(COOKIE, value);
    }

    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_carry_cookie() {
        let headers = build_game_headers("uin=o10001; skey=abc123");

        assert_eq!(
            headers.get(COOKIE).unwrap().to_str().unwrap(),
            "uin=o10001; skey=abc123"
        );
        assert!(headers.contains_key(USER_AGENT));
        assert!(headers.contains_key(ACCEPT));
        assert_eq!(
            headers.get(REFERER).unwrap().to_str().unwrap(),
            GAME_REFERER
        );
    }

    #[test]
    fn test_invalid_cookie_is_dropped() {
        let headers = build_game_headers("bad\nvalue");
        assert!(!headers.contains_key(COOKIE));
    }
}
