//! Configuration sets and app resolution.
//!
//! A configuration set is the dashboard's list of registered apps. The
//! adapter only reads it: [`ConfigSet::resolve`] turns an app id into the
//! [`ConnectionDescriptor`] used for a single request.

use std::fmt;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A named collection of registered apps.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConfigSet {
    #[serde(default)]
    pub apps: Vec<AppConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub id: String,

    pub name: String,

    pub url: String,

    #[serde(default)]
    pub integration: Option<IntegrationConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IntegrationConfig {
    #[serde(rename = "type")]
    pub kind: Option<IntegrationKind>,

    #[serde(default)]
    pub properties: Vec<serde_json::Value>,
}

/// Integration types a dashboard app can be configured with.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum IntegrationKind {
    Readarr,
    Radarr,
    Sonarr,
    Lidarr,
    Sabnzbd,
    NzbGet,
    Deluge,
    QBittorrent,
    Transmission,
    Jellyseerr,
    Overseerr,
    Plex,
    Jellyfin,
    Pihole,
    AdGuardHome,
    Proxmox,
    Tdarr,
    #[serde(other)]
    Unknown,
}

impl IntegrationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Readarr => "readarr",
            Self::Radarr => "radarr",
            Self::Sonarr => "sonarr",
            Self::Lidarr => "lidarr",
            Self::Sabnzbd => "sabnzbd",
            Self::NzbGet => "nzbGet",
            Self::Deluge => "deluge",
            Self::QBittorrent => "qBittorrent",
            Self::Transmission => "transmission",
            Self::Jellyseerr => "jellyseerr",
            Self::Overseerr => "overseerr",
            Self::Plex => "plex",
            Self::Jellyfin => "jellyfin",
            Self::Pihole => "pihole",
            Self::AdGuardHome => "adGuardHome",
            Self::Proxmox => "proxmox",
            Self::Tdarr => "tdarr",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for IntegrationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connection details for one app, resolved per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionDescriptor {
    pub app_id: String,
    pub name: String,
    /// Base URL with any trailing `/` removed.
    pub base_url: String,
    pub kind: IntegrationKind,
}

impl AppConfig {
    pub fn kind(&self) -> Option<&IntegrationKind> {
        self.integration.as_ref().and_then(|i| i.kind.as_ref())
    }
}

impl ConfigSet {
    /// Resolve `app_id` into a connection descriptor for an app of `kind`.
    pub fn resolve(&self, app_id: &str, kind: IntegrationKind) -> Result<ConnectionDescriptor> {
        let app = self
            .apps
            .iter()
            .find(|app| app.id == app_id)
            .ok_or_else(|| Error::not_found("app", app_id))?;

        if app.kind() != Some(&kind) {
            return Err(Error::wrong_integration(app_id, app.kind()));
        }

        let url = Url::parse(&app.url).map_err(|e| {
            Error::Config(format!("app {} has an invalid url {:?}: {e}", app.id, app.url))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "app {} url must be http or https, got {}",
                app.id,
                url.scheme()
            )));
        }

        Ok(ConnectionDescriptor {
            app_id: app.id.clone(),
            name: app.name.clone(),
            base_url: app.url.trim_end_matches('/').to_string(),
            kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn config_set() -> ConfigSet {
        serde_json::from_value(serde_json::json!({
            "apps": [
                {
                    "id": "tdarr-1",
                    "name": "Tdarr",
                    "url": "http://tdarr.local:8265/",
                    "integration": { "type": "tdarr", "properties": [] }
                },
                {
                    "id": "sonarr-1",
                    "name": "Sonarr",
                    "url": "http://sonarr.local:8989",
                    "integration": { "type": "sonarr", "properties": [] }
                },
                {
                    "id": "plain",
                    "name": "Just a link",
                    "url": "https://example.com"
                },
                {
                    "id": "broken",
                    "name": "Broken",
                    "url": "not a url",
                    "integration": { "type": "tdarr" }
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn resolves_tdarr_app() {
        let descriptor = config_set().resolve("tdarr-1", IntegrationKind::Tdarr).unwrap();
        assert_eq!(descriptor.app_id, "tdarr-1");
        assert_eq!(descriptor.name, "Tdarr");
        assert_eq!(descriptor.base_url, "http://tdarr.local:8265");
        assert_eq!(descriptor.kind, IntegrationKind::Tdarr);
    }

    #[test]
    fn unknown_app_is_not_found() {
        let err = config_set().resolve("missing", IntegrationKind::Tdarr).unwrap_err();
        assert_matches!(err, Error::NotFound { ref entity, ref id } if entity == "app" && id == "missing");
    }

    #[test]
    fn other_integration_is_rejected() {
        let err = config_set().resolve("sonarr-1", IntegrationKind::Tdarr).unwrap_err();
        assert_matches!(err, Error::WrongIntegration { ref kind, .. } if kind == "sonarr");
    }

    #[test]
    fn app_without_integration_is_rejected() {
        let err = config_set().resolve("plain", IntegrationKind::Tdarr).unwrap_err();
        assert_matches!(err, Error::WrongIntegration { ref kind, .. } if kind == "none");
    }

    #[test]
    fn invalid_url_is_config_error() {
        let err = config_set().resolve("broken", IntegrationKind::Tdarr).unwrap_err();
        assert_matches!(err, Error::Config(_));
    }

    #[test]
    fn unrecognised_integration_type_deserializes() {
        let app: AppConfig = serde_json::from_value(serde_json::json!({
            "id": "x",
            "name": "X",
            "url": "http://x",
            "integration": { "type": "somethingNew" }
        }))
        .unwrap();
        assert_eq!(app.kind(), Some(&IntegrationKind::Unknown));
    }

    #[test]
    fn camel_case_kinds_round_trip_names() {
        let kind: IntegrationKind = serde_json::from_str("\"qBittorrent\"").unwrap();
        assert_eq!(kind, IntegrationKind::QBittorrent);
        assert_eq!(kind.to_string(), "qBittorrent");
    }
}
