use std::collections::HashMap;

use async_trait::async_trait;

use super::TrendSource;
use crate::constants::MAX_TOPICS;
use crate::error::ApiError;
use crate::x::XClient;

/// Derives "trends" from the most frequent words in recent posts about a niche.
pub struct KeywordTrends {
    x: XClient,
}

impl KeywordTrends {
    #[must_use]
    pub fn new(x: XClient) -> Self {
        Self { x }
    }
}

#[async_trait]
impl TrendSource for KeywordTrends {
    fn name(&self) -> &'static str {
        "keywords"
    }

    async fn topics(&self, niche: &str) -> Result<Vec<String>, ApiError> {
        let query = format!("{niche} -is:retweet lang:en");
        let posts = self.x.search_recent(&query, 50).await?;
        if posts.is_empty() {
            return Err(ApiError::EmptyResult { service: "x" });
        }
        Ok(extract_keywords(posts.iter().map(|p| p.text.as_str()), MAX_TOPICS))
    }
}

/// The `limit` most common words across `texts`.
///
/// Only purely alphabetic words longer than four characters count, compared
/// case-insensitively. Ties keep the order in which words first appeared.
pub fn extract_keywords<'a>(texts: impl IntoIterator<Item = &'a str>, limit: usize) -> Vec<String> {
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    let mut next_index = 0usize;

    for text in texts {
        for word in text.split_whitespace() {
            if word.chars().count() <= 4 || !word.chars().all(char::is_alphabetic) {
                continue;
            }
            let entry = counts.entry(word.to_lowercase()).or_insert_with(|| {
                next_index += 1;
                (0, next_index)
            });
            entry.0 += 1;
        }
    }

    let mut ranked: Vec<(String, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|(_, (ca, ia)), (_, (cb, ib))| cb.cmp(ca).then(ia.cmp(ib)));
    ranked.into_iter().take(limit).map(|(w, _)| w).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_orders() {
        let texts = [
            "Rust async runtime tokio rocks",
            "async rust: learning tokio today",
            "tokio tokio everywhere",
        ];
        let words = extract_keywords(texts, 5);
        assert_eq!(words[0], "tokio");
        assert!(words.contains(&"async".to_string()));
        assert!(!words.contains(&"rust".to_string()));
    }

    #[test]
    fn test_skips_non_alphabetic_and_short_words() {
        let texts = ["https://t.co/x #hashtag @someone hello12 world"];
        assert!(extract_keywords(texts, 5).is_empty());
    }

    #[test]
    fn test_ties_keep_first_appearance() {
        let texts = ["zebra apple mango", "mango apple zebra"];
        assert_eq!(extract_keywords(texts, 2), vec!["zebra", "apple"]);
    }

    #[test]
    fn test_case_insensitive() {
        let texts = ["Python PYTHON python", "golang"];
        assert_eq!(extract_keywords(texts, 5), vec!["python", "golang"]);
    }
}
