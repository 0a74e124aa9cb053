use super::UserConfiguration;
use serde::{Deserialize, Deserializer, Serialize};

/// A named, saved preset: a plugin reference plus concrete field values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunConfiguration {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub plugin_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub user_config: UserConfiguration,
    #[serde(default)]
    pub created_at: u64,
}

impl RunConfiguration {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        plugin_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            plugin_id: plugin_id.into(),
            url: None,
            output_dir: None,
            user_config: UserConfiguration::default(),
            created_at: 0,
        }
    }

    pub fn with_user_config(mut self, user_config: UserConfiguration) -> Self {
        self.user_config = user_config;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<String>) -> Self {
        self.output_dir = Some(output_dir.into());
        self
    }
}

// Older records store a `null` user config.
fn null_as_empty<'de, D>(deserializer: D) -> Result<UserConfiguration, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<UserConfiguration>::deserialize(deserializer)?.unwrap_or_default())
}
