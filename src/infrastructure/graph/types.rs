//! Wire types for the directory API

use serde::Deserialize;

/// Token endpoint response (client-credentials grant)
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// One page of a user query
#[derive(Debug, Deserialize)]
pub struct UserPage {
    pub value: Vec<UserObject>,
}

#[derive(Debug, Deserialize)]
pub struct UserObject {
    pub id: String,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    #[serde(rename = "userPrincipalName")]
    pub user_principal_name: String,
}

/// One page of the polymorphic memberOf relation. Entries carry an
/// `@odata.type` discriminator; only group objects are of interest.
#[derive(Debug, Deserialize)]
pub struct MemberOfPage {
    #[serde(rename = "@odata.nextLink")]
    pub next_link: Option<String>,
    pub value: Vec<DirectoryObject>,
}

#[derive(Debug, Deserialize)]
pub struct DirectoryObject {
    #[serde(rename = "@odata.type")]
    pub odata_type: Option<String>,
    pub id: String,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
}

impl DirectoryObject {
    pub const GROUP_TYPE: &'static str = "#microsoft.graph.group";

    pub fn is_group(&self) -> bool {
        self.odata_type.as_deref() == Some(Self::GROUP_TYPE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_of_page_distinguishes_groups() {
        let json = serde_json::json!({
            "value": [
                {
                    "@odata.type": "#microsoft.graph.group",
                    "id": "g-1",
                    "displayName": "Engineering"
                },
                {
                    "@odata.type": "#microsoft.graph.directoryRole",
                    "id": "r-1",
                    "displayName": "Global Reader"
                }
            ]
        });

        let page: MemberOfPage = serde_json::from_value(json).unwrap();
        assert_eq!(page.value.len(), 2);
        assert!(page.value[0].is_group());
        assert!(!page.value[1].is_group());
        assert!(page.next_link.is_none());
    }

    #[test]
    fn test_token_response_parses() {
        let json = serde_json::json!({
            "token_type": "Bearer",
            "expires_in": 3599,
            "access_token": "eyJ0eXAi..."
        });

        let token: TokenResponse = serde_json::from_value(json).unwrap();
        assert_eq!(token.token_type, "Bearer");
        assert_eq!(token.expires_in, 3599);
    }
}
