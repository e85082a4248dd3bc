// Account-level statistics for the portfolio's GitHub summary.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::github::{Profile, Repository};

/// Languages reported in the summary.
const TOP_LANGUAGES: usize = 10;
/// Recently pushed repositories reported in the summary.
const RECENT_REPOS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountStats {
    pub profile: ProfileSummary,
    pub repositories: RepositoryCounts,
    pub activity: Activity,
    pub languages: Vec<LanguageCount>,
    pub recent_activity: Vec<RecentRepository>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub name: Option<String>,
    pub username: String,
    pub avatar_url: Option<String>,
    pub followers: u64,
    pub following: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryCounts {
    pub total: u64,
    pub own: u64,
    pub forked: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub total_stars: u64,
    pub total_forks: u64,
}

/// Number of own repositories whose primary language is `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageCount {
    pub name: String,
    pub repositories: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentRepository {
    pub name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub pushed_at: DateTime<Utc>,
    pub stars: u64,
}

/// Summarize the owner's non-fork repositories.
pub fn compute_stats(profile: &Profile, repos: &[Repository]) -> AccountStats {
    let own: Vec<&Repository> = repos.iter().filter(|r| !r.fork).collect();
    let own_count = own.len() as u64;
    let total = profile.public_repos.max(own_count);

    let mut language_counts: HashMap<&str, u64> = HashMap::new();
    for repo in &own {
        if let Some(language) = repo.language.as_deref() {
            *language_counts.entry(language).or_default() += 1;
        }
    }
    let mut languages: Vec<LanguageCount> = language_counts
        .into_iter()
        .map(|(name, repositories)| LanguageCount {
            name: name.to_string(),
            repositories,
        })
        .collect();
    languages.sort_by(|a, b| {
        b.repositories
            .cmp(&a.repositories)
            .then_with(|| a.name.cmp(&b.name))
    });
    languages.truncate(TOP_LANGUAGES);

    let mut recent: Vec<RecentRepository> = own
        .iter()
        .map(|repo| RecentRepository {
            name: repo.name.clone(),
            description: repo.description.clone(),
            language: repo.language.clone(),
            pushed_at: repo.pushed_at.unwrap_or(repo.updated_at),
            stars: repo.stargazers_count,
        })
        .collect();
    recent.sort_by(|a, b| b.pushed_at.cmp(&a.pushed_at).then_with(|| a.name.cmp(&b.name)));
    recent.truncate(RECENT_REPOS);

    AccountStats {
        profile: ProfileSummary {
            name: profile.name.clone(),
            username: profile.login.clone(),
            avatar_url: profile.avatar_url.clone(),
            followers: profile.followers,
            following: profile.following,
        },
        repositories: RepositoryCounts {
            total,
            own: own_count,
            forked: total - own_count,
        },
        activity: Activity {
            total_stars: own.iter().map(|r| r.stargazers_count).sum(),
            total_forks: own.iter().map(|r| r.forks_count).sum(),
        },
        languages,
        recent_activity: recent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn profile(public_repos: u64) -> Profile {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "login": "someone",
            "name": "Some One",
            "followers": 10,
            "following": 3,
            "public_repos": public_repos,
        }))
        .unwrap()
    }

    fn repo(name: &str, language: Option<&str>, stars: u64, fork: bool, day: u32) -> Repository {
        let at = Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap();
        Repository {
            id: day as u64,
            name: name.to_string(),
            full_name: format!("someone/{}", name),
            description: None,
            html_url: String::new(),
            homepage: None,
            language: language.map(str::to_string),
            stargazers_count: stars,
            forks_count: 1,
            topics: Vec::new(),
            fork,
            archived: false,
            created_at: at,
            updated_at: at,
            pushed_at: Some(at),
        }
    }

    #[test]
    fn test_counts_exclude_forks() {
        let repos = vec![
            repo("a", Some("Python"), 5, false, 1),
            repo("b", Some("Python"), 2, false, 2),
            repo("c", Some("Rust"), 1, false, 3),
            repo("forked", Some("Go"), 100, true, 4),
        ];

        let stats = compute_stats(&profile(4), &repos);

        assert_eq!(
            stats.repositories,
            RepositoryCounts {
                total: 4,
                own: 3,
                forked: 1
            }
        );
        assert_eq!(stats.activity.total_stars, 8);
        assert_eq!(stats.activity.total_forks, 3);
        assert_eq!(stats.languages[0].name, "Python");
        assert_eq!(stats.languages[0].repositories, 2);
        assert!(stats.languages.iter().all(|l| l.name != "Go"));
        assert_eq!(stats.profile.username, "someone");
    }

    #[test]
    fn test_recent_activity_is_newest_first_and_capped() {
        let repos: Vec<Repository> = (1..=7)
            .map(|day| repo(&format!("r{}", day), None, 0, false, day))
            .collect();

        let stats = compute_stats(&profile(7), &repos);

        let names: Vec<_> = stats.recent_activity.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["r7", "r6", "r5", "r4", "r3"]);
    }

    #[test]
    fn test_total_never_below_own_count() {
        let repos = vec![repo("a", None, 0, false, 1), repo("b", None, 0, false, 2)];
        let stats = compute_stats(&profile(0), &repos);
        assert_eq!(stats.repositories.total, 2);
        assert_eq!(stats.repositories.forked, 0);
    }
}
