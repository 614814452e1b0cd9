// src/auth/oauth.rs — Google OAuth handoff helpers
//
// The backend owns the whole OAuth dance. The client only sends the user to
// the backend's entry point and later reads the session token out of the
// URL the backend redirected the browser to.

use anyhow::{bail, Result};
use url::Url;

/// Path of the backend-hosted OAuth entry point.
pub const GOOGLE_LOGIN_PATH: &str = "/api/v1/auth/google/login";

/// Full URL of the OAuth entry point for a given API origin.
pub fn google_login_url(api_base: &str) -> String {
    format!("{}{}", api_base.trim_end_matches('/'), GOOGLE_LOGIN_PATH)
}

/// Something that can send the user to a URL. Navigation is one-way: there
/// is no response to wait for.
pub trait Navigator: Send + Sync {
    fn navigate(&self, url: &str);
}

/// Opens URLs in the system browser. Prints a hint if that fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl Navigator for SystemBrowser {
    fn navigate(&self, url: &str) {
        open_browser(url);
    }
}

/// Open a URL in the user's browser. Prints a warning if the browser can't be opened.
pub fn open_browser(url: &str) {
    let result;
    #[cfg(target_os = "macos")]
    {
        result = std::process::Command::new("open").arg(url).spawn();
    }
    #[cfg(target_os = "linux")]
    {
        result = std::process::Command::new("xdg-open").arg(url).spawn();
    }
    #[cfg(target_os = "windows")]
    {
        result = std::process::Command::new("cmd")
            .args(["/C", "start", url])
            .spawn();
    }
    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        result = Err(std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "unsupported platform",
        ));
    }

    if let Err(e) = result {
        eprintln!("  Could not open browser automatically: {e}");
        eprintln!("  Please open this URL manually: {url}");
    }
}

/// Extract the session token from what the user pasted after the redirect.
///
/// Accepts the full redirect URL (`http://host/#/?token=...`, or a plain
/// `?token=...` query) or the bare token itself.
pub fn token_from_redirect(input: &str) -> Result<String> {
    let input = input.trim();
    if input.is_empty() {
        bail!("Nothing pasted");
    }

    let Ok(url) = Url::parse(input) else {
        if input.contains(char::is_whitespace) || input.contains('?') {
            bail!("Not a redirect URL or token: {input}");
        }
        return Ok(input.to_string());
    };

    if let Some(token) = query_token(url.query()) {
        return Ok(token);
    }

    // Hash routing puts the query inside the fragment: "#/?token=..."
    if let Some(fragment) = url.fragment() {
        let query = fragment.split_once('?').map(|(_, q)| q);
        if let Some(token) = query_token(query) {
            return Ok(token);
        }
    }

    bail!("Redirect URL has no token parameter")
}

fn query_token(query: Option<&str>) -> Option<String> {
    url::form_urlencoded::parse(query?.as_bytes())
        .find(|(k, _)| k == "token")
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_google_login_url() {
        assert_eq!(
            google_login_url("http://localhost:9000/"),
            "http://localhost:9000/api/v1/auth/google/login"
        );
    }

    #[test]
    fn test_token_from_hash_route_redirect() {
        let token = token_from_redirect("http://localhost:3000/#/?token=eyJ.abc.def").unwrap();
        assert_eq!(token, "eyJ.abc.def");
    }

    #[test]
    fn test_token_from_query_redirect() {
        let token = token_from_redirect("https://heyme.example/?token=T%2B1&x=2").unwrap();
        assert_eq!(token, "T+1");
    }

    #[test]
    fn test_bare_token() {
        assert_eq!(token_from_redirect("  eyJ.abc.def \n").unwrap(), "eyJ.abc.def");
    }

    #[test]
    fn test_rejects_missing_token() {
        assert!(token_from_redirect("").is_err());
        assert!(token_from_redirect("http://localhost:3000/#/dashboard").is_err());
        assert!(token_from_redirect("http://localhost:3000/?token=").is_err());
        assert!(token_from_redirect("two words").is_err());
    }
}
