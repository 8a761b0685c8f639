//! Cluster resource models
//!
//! Structures decoded from (or encoded into) PAPI payloads by the wrapper layer.
//! Every field tolerates being absent since the API omits unset values.

use serde::{Deserialize, Serialize};

/// Generic persona reference (user, group, well-known id)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OnefsId {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub kind: String,
}

impl OnefsId {
    /// Reference a group by name, as used for a user's primary group
    pub fn group(name: &str) -> Self {
        Self {
            id: format!("GROUP:{}", name),
            ..Self::default()
        }
    }

    /// Reference a user by name, as used for group membership
    pub fn user(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: "user".to_string(),
            ..Self::default()
        }
    }
}

/// Local user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_directory: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub member_of: Vec<OnefsId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_group: Option<OnefsId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell: Option<String>,
}

/// Access zone
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessZone {
    pub alternate_system_provider: String,
    pub auth_providers: Vec<String>,
    pub cache_entry_expiry: i64,
    pub groupnet: String,
    pub home_directory_umask: i64,
    pub id: String,
    pub ifs_restricted: Vec<OnefsId>,
    pub map_untrusted: String,
    pub name: String,
    pub negative_cache_entry_expiry: i64,
    pub netbios_name: String,
    pub path: String,
    pub skeleton_directory: String,
    pub system: bool,
    pub system_provider: String,
    pub user_mapping_rules: Vec<String>,
    pub zone_id: i64,
}

/// S3 access key pair returned by a key create call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct S3Key {
    pub access_id: String,
    pub old_key_expiry: i64,
    pub old_key_timestamp: i64,
    pub secret_key: String,
    pub secret_key_timestamp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_group_reference() {
        let id = OnefsId::group("wheel");
        assert_eq!(serde_json::to_value(&id).unwrap(), json!({"id": "GROUP:wheel"}));
    }

    #[test]
    fn test_user_reference() {
        let id = OnefsId::user("bob");
        assert_eq!(
            serde_json::to_value(&id).unwrap(),
            json!({"name": "bob", "type": "user"})
        );
    }

    #[test]
    fn test_user_decoding_partial() {
        let user: User = serde_json::from_value(json!({
            "name": "alice",
            "enabled": true,
            "member_of": [{"id": "GROUP:staff", "name": "staff", "type": "group"}],
            "uid": {"id": "UID:2001"}
        }))
        .unwrap();

        assert_eq!(user.name, "alice");
        assert_eq!(user.enabled, Some(true));
        assert_eq!(user.member_of.len(), 1);
        assert_eq!(user.member_of[0].kind, "group");
        assert!(user.home_directory.is_none());
    }

    #[test]
    fn test_access_zone_decoding() {
        let zone: AccessZone = serde_json::from_value(json!({
            "name": "System",
            "path": "/ifs",
            "system": true,
            "zone_id": 1,
            "auth_providers": ["lsa-local-provider:System"]
        }))
        .unwrap();

        assert_eq!(zone.name, "System");
        assert!(zone.system);
        assert_eq!(zone.zone_id, 1);
        assert_eq!(zone.auth_providers, vec!["lsa-local-provider:System"]);
    }

    #[test]
    fn test_s3_key_decoding() {
        let key: S3Key = serde_json::from_value(json!({
            "access_id": "1_bob_accid",
            "secret_key": "s3cr3t",
            "secret_key_timestamp": 1700000000
        }))
        .unwrap();

        assert_eq!(key.access_id, "1_bob_accid");
        assert_eq!(key.secret_key_timestamp, 1700000000);
        assert_eq!(key.old_key_expiry, 0);
    }
}
