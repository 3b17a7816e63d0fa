//! Web search and scraping facades. These send flat params, no action.

use serde::Serialize;

use crate::Facade;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Search {
    pub query: String,
}

impl Facade for Search {
    const METHOD: &'static str = "brave_search";
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scrape {
    pub url: String,
}

impl Facade for Scrape {
    const METHOD: &'static str = "scrape_url";
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn search_request() {
        let req = Search {
            query: "tokio child process".to_string(),
        }
        .into_request().unwrap();
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"method": "brave_search", "params": {"query": "tokio child process"}})
        );
    }

    #[test]
    fn scrape_request() {
        let req = Scrape {
            url: "https://example.com".to_string(),
        }
        .into_request().unwrap();
        assert_eq!(req.method, "scrape_url");
        assert_eq!(req.params["url"], json!("https://example.com"));
    }
}
