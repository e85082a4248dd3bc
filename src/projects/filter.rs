// Query filters for the full repository listing.

use serde::Serialize;

use crate::github::Repository;

use super::featured::FeaturedSet;

/// Optional narrowing of `all` results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectFilter {
    /// Exact match against the primary language or any topic.
    pub category: Option<String>,
    /// Keep only allow-listed repositories.
    pub featured_only: bool,
    /// Maximum number of results, applied after sorting.
    pub limit: Option<usize>,
}

impl ProjectFilter {
    pub fn matches(&self, repo: &Repository, featured: &FeaturedSet) -> bool {
        if self.featured_only && !featured.contains(&repo.name) {
            return false;
        }

        match &self.category {
            Some(category) => {
                repo.language.as_deref() == Some(category.as_str())
                    || repo.topics.iter().any(|topic| topic == category)
            }
            None => true,
        }
    }

    /// Truncate to `limit`; never grows the list.
    pub fn truncate<T>(&self, items: &mut Vec<T>) {
        if let Some(limit) = self.limit {
            items.truncate(limit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn repo(name: &str, language: Option<&str>, topics: &[&str]) -> Repository {
        Repository {
            id: 1,
            name: name.to_string(),
            full_name: format!("someone/{}", name),
            description: None,
            html_url: String::new(),
            homepage: None,
            language: language.map(str::to_string),
            stargazers_count: 0,
            forks_count: 0,
            topics: topics.iter().map(|t| t.to_string()).collect(),
            fork: false,
            archived: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            pushed_at: None,
        }
    }

    #[test]
    fn test_default_matches_everything() {
        let filter = ProjectFilter::default();
        assert!(filter.matches(&repo("a", None, &[]), &FeaturedSet::default()));
    }

    #[test]
    fn test_category_is_exact() {
        let filter = ProjectFilter {
            category: Some("Python".to_string()),
            ..Default::default()
        };
        let featured = FeaturedSet::default();

        assert!(filter.matches(&repo("a", Some("Python"), &[]), &featured));
        assert!(!filter.matches(&repo("b", Some("python"), &[]), &featured));
        assert!(filter.matches(&repo("c", Some("Rust"), &["Python"]), &featured));
        assert!(!filter.matches(&repo("d", None, &["ml"]), &featured));
    }

    #[test]
    fn test_featured_only() {
        let filter = ProjectFilter {
            featured_only: true,
            ..Default::default()
        };
        let featured = FeaturedSet::new(["keep"]);

        assert!(filter.matches(&repo("keep", None, &[]), &featured));
        assert!(!filter.matches(&repo("drop", None, &[]), &featured));
    }

    #[test]
    fn test_truncate_never_grows() {
        let filter = ProjectFilter {
            limit: Some(5),
            ..Default::default()
        };
        let mut items = vec![1, 2, 3];
        filter.truncate(&mut items);
        assert_eq!(items, vec![1, 2, 3]);

        let filter = ProjectFilter {
            limit: Some(2),
            ..Default::default()
        };
        filter.truncate(&mut items);
        assert_eq!(items, vec![1, 2]);
    }
}
