//! Routes between the repository list and repository detail screens

use std::fmt;
use std::str::FromStr;

use crate::service::search::SearchViewModel;
use crate::types::Repository;

const LIST_PATH: &str = "repositoryList";
const DETAIL_PREFIX: &str = "repositoryDetail/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    RepositoryList,
    RepositoryDetail(i64),
}

impl Route {
    pub fn detail(repository: &Repository) -> Self {
        Route::RepositoryDetail(repository.id)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::RepositoryList => write!(f, "{}", LIST_PATH),
            Route::RepositoryDetail(id) => write!(f, "{}{}", DETAIL_PREFIX, id),
        }
    }
}

impl FromStr for Route {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == LIST_PATH {
            return Ok(Route::RepositoryList);
        }

        s.strip_prefix(DETAIL_PREFIX)
            .and_then(|id| id.parse::<i64>().ok())
            .map(Route::RepositoryDetail)
            .ok_or_else(|| format!("Unknown route: '{}'", s))
    }
}

/// Repository to show for a route
///
/// `None` for the list route and for ids missing from the current result set;
/// the detail view is then simply not shown.
pub fn resolve_detail(view_model: &SearchViewModel, route: Route) -> Option<Repository> {
    match route {
        Route::RepositoryList => None,
        Route::RepositoryDetail(id) => {
            let repository = view_model.get_repository_by_id(id);
            if repository.is_none() {
                tracing::debug!(id, "No repository for detail route");
            }
            repository
        }
    }
}

/// Parse a route path and resolve it; unparsable paths resolve to `None`
pub fn resolve_path(view_model: &SearchViewModel, path: &str) -> Option<Repository> {
    path.parse::<Route>()
        .ok()
        .and_then(|route| resolve_detail(view_model, route))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_round_trip() {
        assert_eq!(Route::RepositoryList.to_string(), "repositoryList");
        assert_eq!(Route::RepositoryDetail(42).to_string(), "repositoryDetail/42");
        assert_eq!("repositoryDetail/42".parse::<Route>(), Ok(Route::RepositoryDetail(42)));
        assert_eq!("repositoryList".parse::<Route>(), Ok(Route::RepositoryList));
    }

    #[test]
    fn test_route_parse_errors() {
        assert!("repositoryDetail/abc".parse::<Route>().is_err());
        assert!("repositoryDetail/".parse::<Route>().is_err());
        assert!("settings".parse::<Route>().is_err());
    }
}
