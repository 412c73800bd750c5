//! Client domain types
//!
//! Firm customers and the directory filter used to browse them.

use serde::{Deserialize, Serialize};

use super::catalog::{Branch, ClientStatus};

/// Client entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub name: String,
    pub pan: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gstin: Option<String>,
    pub branch: Branch,
    pub contact_person: String,
    pub phone: String,
    pub email: String,
    pub status: ClientStatus,
}

/// Directory filter: free-text search over name and PAN, plus branch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientFilter {
    pub search: Option<String>,
    pub branch: Option<Branch>,
}

impl ClientFilter {
    pub fn matches(&self, client: &Client) -> bool {
        let matches_search = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                client.name.to_lowercase().contains(&term)
                    || client.pan.to_lowercase().contains(&term)
            }
        };
        let matches_branch = self.branch.map_or(true, |b| client.branch == b);

        matches_search && matches_branch
    }
}
