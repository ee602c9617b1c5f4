//! Query string filters for list endpoints

use club_core::{CaseType, ComandaStatus, MemberQuery};
use serde::Deserialize;

use super::Pagination;

/// `GET /members` filters
#[derive(Debug, Default, Deserialize)]
pub struct MemberFilter {
    pub case_type: Option<CaseType>,
    #[serde(default)]
    pub include_inactive: bool,
}

impl MemberFilter {
    /// Combine with the page window into a repository query
    pub fn into_query(self, page: Pagination) -> MemberQuery {
        MemberQuery {
            case_type: self.case_type,
            active_only: !self.include_inactive,
            offset: page.offset,
            limit: page.limit,
        }
    }
}

/// `GET /comandas` filters
#[derive(Debug, Default, Deserialize)]
pub struct ComandaFilter {
    pub status: Option<ComandaStatus>,
}

/// `GET /dashboard` parameters
#[derive(Debug, Default, Deserialize)]
pub struct DashboardParams {
    /// Revenue window in days; falls back to the configured default
    pub revenue_days: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_filter_defaults_to_active_only() {
        let query = MemberFilter::default().into_query(Pagination::default());
        assert!(query.active_only);
        assert_eq!(query.case_type, None);
        assert_eq!(query.limit, 50);
    }

    #[test]
    fn test_member_filter_include_inactive() {
        let filter = MemberFilter {
            case_type: Some(CaseType::Prospect),
            include_inactive: true,
        };
        let query = filter.into_query(Pagination { offset: 20, limit: 10 });
        assert!(!query.active_only);
        assert_eq!(query.case_type, Some(CaseType::Prospect));
        assert_eq!(query.offset, 20);
    }
}
