use std::fmt;

use crate::campaigns::types::{AdvertisementId, CampaignId};

pub const CAMPAIGN_LIST: &str = "/";
pub const NEW_CAMPAIGN: &str = "/campaigns/new";
pub const CAMPAIGN_DETAIL: &str = "/campaigns/:id";
pub const EDIT_CAMPAIGN: &str = "/campaigns/:id/edit";
pub const ADVERTISEMENTS: &str = "/campaigns/:campaignId/advertisements";
pub const NEW_ADVERTISEMENT: &str = "/campaigns/:campaignId/advertisements/new";
pub const EDIT_ADVERTISEMENT: &str = "/advertisements/:id/edit";

/// Every navigable screen of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppRoute {
    CampaignList,
    NewCampaign,
    CampaignDetail(CampaignId),
    EditCampaign(CampaignId),
    Advertisements(CampaignId),
    NewAdvertisement(CampaignId),
    EditAdvertisement(AdvertisementId),
}

impl AppRoute {
    /// Router pattern this route is registered under.
    pub fn pattern(self) -> &'static str {
        match self {
            AppRoute::CampaignList => CAMPAIGN_LIST,
            AppRoute::NewCampaign => NEW_CAMPAIGN,
            AppRoute::CampaignDetail(_) => CAMPAIGN_DETAIL,
            AppRoute::EditCampaign(_) => EDIT_CAMPAIGN,
            AppRoute::Advertisements(_) => ADVERTISEMENTS,
            AppRoute::NewAdvertisement(_) => NEW_ADVERTISEMENT,
            AppRoute::EditAdvertisement(_) => EDIT_ADVERTISEMENT,
        }
    }

    pub fn path(self) -> String {
        match self {
            AppRoute::CampaignList => CAMPAIGN_LIST.to_string(),
            AppRoute::NewCampaign => NEW_CAMPAIGN.to_string(),
            AppRoute::CampaignDetail(id) => format!("/campaigns/{id}"),
            AppRoute::EditCampaign(id) => format!("/campaigns/{id}/edit"),
            AppRoute::Advertisements(id) => format!("/campaigns/{id}/advertisements"),
            AppRoute::NewAdvertisement(id) => format!("/campaigns/{id}/advertisements/new"),
            AppRoute::EditAdvertisement(id) => format!("/advertisements/{id}/edit"),
        }
    }

    /// Resolve a location path; `/campaigns/new` wins over `/campaigns/:id`.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Some(AppRoute::CampaignList),
            ["campaigns", "new"] => Some(AppRoute::NewCampaign),
            ["campaigns", id] => id.parse().ok().map(AppRoute::CampaignDetail),
            ["campaigns", id, "edit"] => id.parse().ok().map(AppRoute::EditCampaign),
            ["campaigns", id, "advertisements"] => id.parse().ok().map(AppRoute::Advertisements),
            ["campaigns", id, "advertisements", "new"] => {
                id.parse().ok().map(AppRoute::NewAdvertisement)
            }
            ["advertisements", id, "edit"] => id.parse().ok().map(AppRoute::EditAdvertisement),
            _ => None,
        }
    }
}

impl fmt::Display for AppRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_match_navigable_routes() {
        assert_eq!(AppRoute::CampaignList.path(), "/");
        assert_eq!(AppRoute::CampaignDetail(CampaignId(5)).path(), "/campaigns/5");
        assert_eq!(
            AppRoute::NewAdvertisement(CampaignId(5)).path(),
            "/campaigns/5/advertisements/new"
        );
        assert_eq!(
            AppRoute::EditAdvertisement(AdvertisementId(9)).to_string(),
            "/advertisements/9/edit"
        );
    }

    #[test]
    fn new_campaign_takes_precedence_over_detail() {
        assert_eq!(AppRoute::parse("/campaigns/new"), Some(AppRoute::NewCampaign));
        assert_eq!(
            AppRoute::parse("/campaigns/12"),
            Some(AppRoute::CampaignDetail(CampaignId(12)))
        );
    }

    #[test]
    fn every_route_parses_back_from_its_path() {
        let routes = [
            AppRoute::CampaignList,
            AppRoute::NewCampaign,
            AppRoute::CampaignDetail(CampaignId(3)),
            AppRoute::EditCampaign(CampaignId(3)),
            AppRoute::Advertisements(CampaignId(3)),
            AppRoute::NewAdvertisement(CampaignId(3)),
            AppRoute::EditAdvertisement(AdvertisementId(4)),
        ];
        for route in routes {
            assert_eq!(AppRoute::parse(&route.path()), Some(route), "{route}");
        }
    }

    #[test]
    fn unknown_and_malformed_paths_do_not_match() {
        assert_eq!(AppRoute::parse("/campaigns/abc"), None);
        assert_eq!(AppRoute::parse("/advertisements/4"), None);
        assert_eq!(AppRoute::parse("/reports"), None);
        assert_eq!(
            AppRoute::parse("/campaigns/3/edit?tab=1"),
            Some(AppRoute::EditCampaign(CampaignId(3)))
        );
    }
}
