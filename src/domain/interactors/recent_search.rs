use crate::data::repo::RecentSearchRepository;
use crate::domain::DomainError;

/// Record a keyword in the recent-search list.
pub struct AddRecentSearch {
    recent: RecentSearchRepository,
}

impl AddRecentSearch {
    pub fn new(recent: RecentSearchRepository) -> Self {
        Self { recent }
    }

    pub async fn execute(&self, keyword: &str) -> Result<(), DomainError> {
        if keyword.trim().is_empty() {
            return Err(DomainError::validation("Enter a search keyword"));
        }
        self.recent.add(keyword);
        Ok(())
    }
}

/// Drop a keyword from the recent-search list.
pub struct RemoveRecentSearch {
    recent: RecentSearchRepository,
}

impl RemoveRecentSearch {
    pub fn new(recent: RecentSearchRepository) -> Self {
        Self { recent }
    }

    pub async fn execute(&self, keyword: &str) -> Result<(), DomainError> {
        self.recent.remove(keyword);
        Ok(())
    }
}
