use url::Url;

pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:8080";

/// Gateway base URL, from the `GATEWAY_URL` env var (loaded from `.env` at
/// startup) with a localhost fallback.
pub fn gateway_url() -> Url {
    let raw = std::env::var("GATEWAY_URL").unwrap_or_else(|_| DEFAULT_GATEWAY_URL.to_string());
    match Url::parse(&raw) {
        Ok(url) => url,
        Err(_) => {
            tracing::warn!(
                "Invalid GATEWAY_URL {:?}, falling back to {}",
                raw,
                DEFAULT_GATEWAY_URL
            );
            Url::parse(DEFAULT_GATEWAY_URL).unwrap()
        }
    }
}

/// Derive the live-feed endpoint from the gateway origin: scheme upgraded to
/// its websocket equivalent, path `/ws`.
pub fn feed_url(base: &Url) -> Result<Url, String> {
    let mut ws = base.clone();
    let scheme = match base.scheme() {
        "https" | "wss" => "wss",
        _ => "ws",
    };
    ws.set_scheme(scheme)
        .map_err(|_| format!("Cannot derive websocket scheme from {}", base))?;
    ws.set_path("/ws");
    ws.set_query(None);
    Ok(ws)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_url_upgrades_http_to_ws() {
        let base = Url::parse("http://localhost:8080").unwrap();
        let ws = feed_url(&base).unwrap();
        assert_eq!(ws.as_str(), "ws://localhost:8080/ws");
    }

    #[test]
    fn feed_url_upgrades_https_to_wss() {
        let base = Url::parse("https://broker.example.com").unwrap();
        let ws = feed_url(&base).unwrap();
        assert_eq!(ws.as_str(), "wss://broker.example.com/ws");
    }

    #[test]
    fn feed_url_replaces_existing_path() {
        let base = Url::parse("http://broker.example.com:9090/dashboard?tab=live").unwrap();
        let ws = feed_url(&base).unwrap();
        assert_eq!(ws.as_str(), "ws://broker.example.com:9090/ws");
    }

    #[test]
    fn gateway_url_falls_back_on_invalid_value() {
        // Only test touching GATEWAY_URL.
        std::env::set_var("GATEWAY_URL", "not a url");
        let url = gateway_url();
        std::env::remove_var("GATEWAY_URL");
        assert_eq!(url.as_str(), "http://localhost:8080/");
    }
}
