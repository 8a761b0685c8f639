//! Local user and group membership calls

use crate::{
    Error, Result,
    session::PapiTransport,
    types::{ApiRequest, JsonObject, OnefsId, User},
    wrapper::conn::{ClusterConnection, zone_or_default},
};
use serde::Serialize;

/// Error code returned when the user already belongs to the group
pub const CONFLICT_CODE: &str = "AEC_CONFLICT";

#[derive(Debug, Serialize)]
struct NewUser<'a> {
    name: &'a str,
    enabled: bool,
    home_directory: &'a str,
    primary_group: OnefsId,
}

impl<T: PapiTransport> ClusterConnection<T> {
    /// Creates a user with a home directory and primary group.
    ///
    /// An empty `zone` means the `System` zone.
    pub async fn create_user(
        &mut self,
        name: &str,
        home_dir: &str,
        primary_group: &str,
        zone: &str,
    ) -> Result<Option<JsonObject>> {
        let body = NewUser {
            name,
            enabled: true,
            home_directory: home_dir,
            primary_group: OnefsId::group(primary_group),
        };
        let request = ApiRequest::post(self.platform("auth/users"))
            .with_query("force", "True")
            .with_query("zone", zone_or_default(zone))
            .with_json(&body)?;
        self.papi.send(&request).await
    }

    /// Lists the local users of an access zone
    pub async fn get_user_list(&mut self, zone: &str) -> Result<Vec<User>> {
        let request = ApiRequest::get(self.platform("auth/users")).with_query("zone", zone);
        self.send_field(&request, "users").await
    }

    /// Fetches one user, including group membership
    pub async fn get_user(&mut self, name: &str, zone: &str) -> Result<User> {
        let request = ApiRequest::get(self.platform(&format!("auth/users/{}", name)))
            .with_query("query_member_of", "True")
            .with_query("zone", zone);
        let users: Vec<User> = self.send_field(&request, "users").await?;
        users
            .into_iter()
            .next()
            .ok_or_else(|| Error::decode("User list was empty. Expected at least 1 user"))
    }

    /// Adds a user to a group.
    ///
    /// A user that is already a member is not an error: the cluster's
    /// `AEC_CONFLICT` answer is treated as success and yields `None`.
    pub async fn add_user_to_group(
        &mut self,
        name: &str,
        group: &str,
        zone: &str,
    ) -> Result<Option<JsonObject>> {
        let request = ApiRequest::post(self.platform(&format!("auth/groups/{}/members", group)))
            .with_query("zone", zone)
            .with_json(&OnefsId::user(name))?;

        match self.papi.send(&request).await {
            Ok(body) => Ok(body),
            Err(e) if e.api_error_codes().iter().any(|c| c == CONFLICT_CODE) => {
                tracing::debug!("User {} is already a member of {}", name, group);
                Ok(None)
            }
            Err(e) => {
                tracing::warn!("Unable to add user {} to group {}: {}", name, group, e);
                Err(e)
            }
        }
    }

    /// Adds a user to each group in turn.
    ///
    /// Every group is attempted; failures are counted and reported together.
    pub async fn set_user_supplemental_groups(
        &mut self,
        name: &str,
        groups: &[String],
        zone: &str,
    ) -> Result<()> {
        let mut failed = Vec::new();
        for group in groups {
            if self.add_user_to_group(name, group, zone).await.is_err() {
                tracing::warn!(
                    "Unable to add user {} to group {} in access zone {}",
                    name,
                    group,
                    zone
                );
                failed.push(group.as_str());
            }
        }

        if failed.is_empty() {
            Ok(())
        } else {
            Err(Error::internal(format!(
                "{} error(s) encountered adding user to groups: {}",
                failed.len(),
                failed.join(", ")
            )))
        }
    }

    /// Deletes a user
    pub async fn delete_user(&mut self, name: &str, zone: &str) -> Result<Option<JsonObject>> {
        let request = ApiRequest::delete(self.platform(&format!("auth/users/{}", name)))
            .with_query("zone", zone);
        self.papi.send(&request).await.inspect_err(|e| {
            tracing::warn!("Unable to delete user {}: {}", name, e);
        })
    }
}
