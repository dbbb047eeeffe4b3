use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// The number of items per page requested by listings that know their size upfront.
pub const MAX_ITEMS_PER_PAGE: u32 = 100;

/// Metadata of a GitHub repository.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Repository {
    /// The repository identifier.
    #[serde(default)]
    pub id: u64,

    /// The name of the repository.
    #[serde(default)]
    pub name: String,

    /// The name of the repository, prefixed by its owner.
    #[serde(default)]
    pub full_name: String,

    /// Whether the repository is private.
    #[serde(default)]
    pub private: bool,

    /// Whether the repository is a fork.
    #[serde(default)]
    pub fork: bool,

    /// The repository description.
    #[serde(default)]
    pub description: Option<String>,

    /// The web URL of the repository.
    #[serde(default)]
    pub html_url: String,
}

impl Repository {
    /// Creates a new `Repository` instance.
    pub fn new(id: u64, full_name: &str) -> Self {
        let name = full_name
            .rsplit_once('/')
            .map(|(_, name)| name)
            .unwrap_or(full_name);
        Self {
            id,
            name: name.to_string(),
            full_name: full_name.to_string(),
            html_url: format!("https://github.com/{full_name}"),
            ..Default::default()
        }
    }
}

impl Display for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Repository: {}, Id: {}", self.full_name, self.id)
    }
}

/// Summary of a user or organization, as returned by `/users/{name}` or `/orgs/{name}`.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnerSummary {
    /// The number of public repositories.
    #[serde(default)]
    pub public_repos: u64,

    /// The number of private repositories, only visible to authorized users.
    #[serde(default)]
    pub total_private_repos: u64,
}

impl OwnerSummary {
    /// The total number of repositories.
    pub fn total_repos(&self) -> u64 {
        self.public_repos + self.total_private_repos
    }

    /// The number of pages needed to list every repository.
    pub fn page_count(&self, per_page: u32) -> u32 {
        self.total_repos().div_ceil(per_page.max(1) as u64) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_ignores_unknown_fields() {
        let repository: Repository = serde_json::from_str(
            r#"{"id": 142667576, "name": "repository-1", "full_name": "org-1/repository-1", "stargazers_count": 10}"#,
        )
        .unwrap();

        assert_eq!(142667576, repository.id);
        assert_eq!("org-1/repository-1", repository.full_name);
        assert!(!repository.private);
    }

    #[test]
    fn repository_new_splits_full_name() {
        let repository = Repository::new(1, "org-1/repository-1");

        assert_eq!("repository-1", repository.name);
        assert_eq!("https://github.com/org-1/repository-1", repository.html_url);
    }

    #[test]
    fn owner_summary_page_count() {
        let summary = OwnerSummary {
            public_repos: 150,
            total_private_repos: 51,
        };
        assert_eq!(201, summary.total_repos());
        assert_eq!(3, summary.page_count(MAX_ITEMS_PER_PAGE));

        assert_eq!(0, OwnerSummary::default().page_count(MAX_ITEMS_PER_PAGE));
        assert_eq!(
            1,
            OwnerSummary {
                public_repos: 100,
                total_private_repos: 0
            }
            .page_count(MAX_ITEMS_PER_PAGE)
        );
    }

    #[test]
    fn owner_summary_without_private_count() {
        let summary: OwnerSummary =
            serde_json::from_str(r#"{"login": "user-1", "public_repos": 12}"#).unwrap();

        assert_eq!(12, summary.total_repos());
    }
}
