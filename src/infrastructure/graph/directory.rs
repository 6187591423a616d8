use async_trait::async_trait;
use tracing::debug;

use super::auth::Session;
use super::types::{MemberOfPage, UserPage};
use super::GraphEndpoints;
use crate::domain::directory::{
    Directory, GroupId, Membership, Principal, PrincipalName, RemovalStatus, UserId,
};
use crate::domain::DirectoryError;
use crate::infrastructure::http_client::{DeleteOutcome, HttpClientTrait};

/// Directory provider backed by the Graph REST API
#[derive(Debug)]
pub struct GraphDirectory<C: HttpClientTrait> {
    client: C,
    session: Session,
    base_url: String,
}

impl<C: HttpClientTrait> GraphDirectory<C> {
    pub fn new(client: C, endpoints: &GraphEndpoints, session: Session) -> Self {
        Self {
            client,
            session,
            base_url: endpoints.graph_base_url.trim_end_matches('/').to_string(),
        }
    }

    fn user_query_url(&self, principal: &PrincipalName) -> String {
        // OData string literals escape single quotes by doubling them
        let literal = principal.as_str().replace('\'', "''");
        format!(
            "{}/v1.0/users?$filter=userPrincipalName%20eq%20'{}'&$select=id,displayName,userPrincipalName",
            self.base_url, literal
        )
    }

    fn member_of_url(&self, user: &UserId) -> String {
        format!(
            "{}/v1.0/users/{}/memberOf?$select=id,displayName",
            self.base_url, user
        )
    }

    fn remove_ref_url(&self, group: &GroupId, user: &UserId) -> String {
        format!(
            "{}/v1.0/groups/{}/members/{}/$ref",
            self.base_url, group, user
        )
    }

    fn token(&self) -> &str {
        self.session.access_token()
    }
}

#[async_trait]
impl<C: HttpClientTrait> Directory for GraphDirectory<C> {
    async fn resolve_user(&self, principal: &PrincipalName) -> Result<Principal, DirectoryError> {
        let url = self.user_query_url(principal);
        let response = self.client.get_json(&url, self.token()).await?;

        let page: UserPage = serde_json::from_value(response).map_err(|e| {
            DirectoryError::api(200, format!("Malformed user query response: {}", e))
        })?;

        let mut users = page.value;
        match users.len() {
            0 => Err(DirectoryError::user_not_found(principal.as_str())),
            1 => {
                let user = users.remove(0);
                let display_name = user
                    .display_name
                    .unwrap_or_else(|| user.user_principal_name.clone());
                Ok(Principal::new(
                    UserId::new(user.id),
                    display_name,
                    principal.clone(),
                ))
            }
            // Principal names are unique per tenant; more than one match means
            // the directory answered something we cannot act on safely.
            n => Err(DirectoryError::ambiguous_principal(principal.as_str(), n)),
        }
    }

    async fn list_group_memberships(
        &self,
        user: &UserId,
    ) -> Result<Vec<Membership>, DirectoryError> {
        let mut memberships = Vec::new();
        let mut url = self.member_of_url(user);

        loop {
            let response = self.client.get_json(&url, self.token()).await?;
            let page: MemberOfPage = serde_json::from_value(response).map_err(|e| {
                DirectoryError::api(200, format!("Malformed memberOf response: {}", e))
            })?;

            for object in page.value {
                if !object.is_group() {
                    debug!(
                        "Skipping non-group membership {} ({:?})",
                        object.id, object.odata_type
                    );
                    continue;
                }

                let name = object.display_name.unwrap_or_else(|| object.id.clone());
                memberships.push(Membership::new(GroupId::new(object.id), name));
            }

            match page.next_link {
                Some(next) => url = next,
                None => break,
            }
        }

        Ok(memberships)
    }

    async fn remove_member(
        &self,
        group: &GroupId,
        user: &UserId,
    ) -> Result<RemovalStatus, DirectoryError> {
        let url = self.remove_ref_url(group, user);

        match self.client.delete(&url, self.token()).await? {
            DeleteOutcome::Deleted => Ok(RemovalStatus::Removed),
            DeleteOutcome::NotFound => Ok(RemovalStatus::AlreadyRemoved),
        }
    }

    async fn close(&self) -> Result<(), DirectoryError> {
        // App-only tokens cannot be revoked client-side; teardown is dropping
        // the handle and never reusing it.
        debug!("Directory session discarded");
        Ok(())
    }
}
