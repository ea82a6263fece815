//! OAuth 1.0a (HMAC-SHA1) request signing for user-context X API calls.

use base64::Engine;
use hmac::{Hmac, Mac};
use rand::distributions::Alphanumeric;
use rand::Rng;
use sha1::Sha1;

use crate::config::XCredentials;

type HmacSha1 = Hmac<Sha1>;

/// Per-request values that must be unique; split out so signing is testable.
#[derive(Debug, Clone)]
pub struct Nonce {
    pub nonce: String,
    pub timestamp: i64,
}

impl Nonce {
    #[must_use]
    pub fn generate() -> Self {
        Self {
            nonce: rand::thread_rng()
                .sample_iter(&Alphanumeric)
                .take(32)
                .map(char::from)
                .collect(),
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

fn encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

fn oauth_params(creds: &XCredentials, nonce: &Nonce) -> Vec<(String, String)> {
    vec![
        ("oauth_consumer_key".to_string(), creds.api_key.clone()),
        ("oauth_nonce".to_string(), nonce.nonce.clone()),
        (
            "oauth_signature_method".to_string(),
            "HMAC-SHA1".to_string(),
        ),
        ("oauth_timestamp".to_string(), nonce.timestamp.to_string()),
        ("oauth_token".to_string(), creds.access_token.clone()),
        ("oauth_version".to_string(), "1.0".to_string()),
    ]
}

/// Compute the request signature.
///
/// `params` are the query (or form) parameters of the request; JSON bodies
/// are not part of the signature.
#[must_use]
pub fn signature(
    creds: &XCredentials,
    method: &str,
    url: &str,
    params: &[(&str, &str)],
    nonce: &Nonce,
) -> String {
    let mut pairs: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (encode(k), encode(v)))
        .chain(
            oauth_params(creds, nonce)
                .into_iter()
                .map(|(k, v)| (encode(&k), encode(&v))),
        )
        .collect();
    pairs.sort();
    let param_string = pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    let base = format!(
        "{}&{}&{}",
        method.to_uppercase(),
        encode(url),
        encode(&param_string)
    );
    let key = format!(
        "{}&{}",
        encode(&creds.api_secret),
        encode(&creds.access_token_secret)
    );

    let mut mac =
        HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC can take key of any size");
    mac.update(base.as_bytes());
    base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes())
}

/// Build the `Authorization` header value for a request.
#[must_use]
pub fn authorization_header(
    creds: &XCredentials,
    method: &str,
    url: &str,
    params: &[(&str, &str)],
    nonce: &Nonce,
) -> String {
    let sig = signature(creds, method, url, params, nonce);
    let mut header_params = oauth_params(creds, nonce);
    header_params.push(("oauth_signature".to_string(), sig));
    header_params.sort();

    let fields = header_params
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", encode(k), encode(v)))
        .collect::<Vec<_>>()
        .join(", ");
    format!("OAuth {fields}")
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Worked example from the X developer documentation.
    fn doc_credentials() -> XCredentials {
        XCredentials {
            api_key: "xvz1evFS4wEEPTGEFPHBog".to_string(),
            api_secret: "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw".to_string(),
            access_token: "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb".to_string(),
            access_token_secret: "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE".to_string(),
            bearer_token: None,
        }
    }

    fn doc_nonce() -> Nonce {
        Nonce {
            nonce: "kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg".to_string(),
            timestamp: 1_318_622_958,
        }
    }

    #[test]
    fn test_signature_matches_documented_example() {
        let sig = signature(
            &doc_credentials(),
            "post",
            "https://api.twitter.com/1.1/statuses/update.json",
            &[
                ("status", "Hello Ladies + Gentlemen, a signed OAuth request!"),
                ("include_entities", "true"),
            ],
            &doc_nonce(),
        );
        assert_eq!(sig, "hCtSmYh+iHYCEqBWrE7C7hYmtUk=");
    }

    #[test]
    fn test_authorization_header_shape() {
        let header = authorization_header(
            &doc_credentials(),
            "POST",
            "https://api.twitter.com/2/tweets",
            &[],
            &doc_nonce(),
        );
        assert!(header.starts_with("OAuth oauth_consumer_key=\"xvz1evFS4wEEPTGEFPHBog\""));
        assert!(header.contains("oauth_signature=\""));
        assert!(header.contains("oauth_signature_method=\"HMAC-SHA1\""));
        assert!(header.contains("oauth_timestamp=\"1318622958\""));
    }

    #[test]
    fn test_generated_nonces_differ() {
        let a = Nonce::generate();
        let b = Nonce::generate();
        assert_eq!(a.nonce.len(), 32);
        assert_ne!(a.nonce, b.nonce);
    }
}
