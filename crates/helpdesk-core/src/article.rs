//! Knowledge-base articles and their index
//!
//! Static reference data: articles are created once (normally by
//! seeding) and read-only afterwards. Search is plain case-insensitive
//! substring containment, no tokenization, no ranking.

use crate::Category;
use serde::{Deserialize, Serialize};

/// Knowledge article
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    /// Index-assigned identifier
    pub id: u32,

    /// Article title
    pub title: String,

    /// Body text
    pub content: String,

    /// Category the article belongs to
    pub category: Category,

    /// Keywords matched by search, in addition to title and content
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

impl Article {
    fn matches(&self, term: &str) -> bool {
        self.title.to_lowercase().contains(term)
            || self.content.to_lowercase().contains(term)
            || self.keywords.iter().any(|k| k.to_lowercase().contains(term))
    }
}

/// Fields the caller supplies when adding an article
#[derive(Debug, Clone)]
pub struct ArticleDraft {
    pub title: String,
    pub content: String,
    pub category: Category,
    pub keywords: Vec<String>,
}

/// In-memory article index
pub struct ArticleIndex {
    articles: Vec<Article>,
    next_id: u32,
}

impl Default for ArticleIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl ArticleIndex {
    pub fn new() -> Self {
        Self {
            articles: Vec::new(),
            next_id: 1,
        }
    }

    /// All articles, insertion order.
    pub fn list(&self) -> Vec<Article> {
        self.articles.clone()
    }

    /// Case-insensitive substring search over title, content and
    /// keywords. A blank term returns everything.
    pub fn search(&self, term: &str) -> Vec<Article> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return self.list();
        }
        self.articles
            .iter()
            .filter(|a| a.matches(&term))
            .cloned()
            .collect()
    }

    /// Add an article, assigning the next sequential id.
    pub fn create(&mut self, draft: ArticleDraft) -> Article {
        let article = Article {
            id: self.next_id,
            title: draft.title,
            content: draft.content,
            category: draft.category,
            keywords: draft.keywords,
        };
        self.next_id += 1;
        self.articles.push(article.clone());
        article
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_with_samples() -> ArticleIndex {
        let mut index = ArticleIndex::new();
        index.create(ArticleDraft {
            title: "Fixing printer jams".to_string(),
            content: "Open the tray and remove stuck paper".to_string(),
            category: Category::Printer,
            keywords: vec!["printer".to_string(), "paper".to_string()],
        });
        index.create(ArticleDraft {
            title: "VPN setup".to_string(),
            content: "Install the client and sign in".to_string(),
            category: Category::Network,
            keywords: vec!["vpn".to_string(), "remote".to_string()],
        });
        index.create(ArticleDraft {
            title: "Spooler restarts".to_string(),
            content: "Restart the print spooler service from an elevated shell".to_string(),
            category: Category::Printer,
            keywords: vec!["spooler".to_string()],
        });
        index
    }

    #[test]
    fn create_assigns_sequential_ids() {
        let index = index_with_samples();
        let ids: Vec<u32> = index.list().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let index = index_with_samples();

        // "PrInTeR" matches the first article by title/keyword and the
        // third by content ("print spooler").
        let hits = index.search("PrInTeR");
        let ids: Vec<u32> = hits.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 3]);

        let vpn = index.search("vpn");
        assert_eq!(vpn.len(), 1);
        assert_eq!(vpn[0].title, "VPN setup");
    }

    #[test]
    fn blank_search_returns_everything() {
        let index = index_with_samples();
        assert_eq!(index.search("").len(), 3);
        assert_eq!(index.search("   ").len(), 3);
    }

    #[test]
    fn unmatched_search_is_empty() {
        let index = index_with_samples();
        assert!(index.search("quantum").is_empty());
    }
}
