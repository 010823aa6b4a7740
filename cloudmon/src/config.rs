//! Configuration: named profiles persisted as JSON plus resolution of the
//! effective base URL and timings from CLI, profile and environment.
//! Stored under XDG config dir: $XDG_CONFIG_HOME/cloudmon/profiles.json (fallback ~/.config/cloudmon/profiles.json)

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, path::PathBuf, time::Duration};
use thiserror::Error;

/// Environment variable holding the base URL when neither CLI nor profile provide one.
pub const API_URL_ENV: &str = "CLOUDMON_API_URL";
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no metrics service URL configured (pass a URL, use --profile, or set CLOUDMON_API_URL)")]
    MissingBaseUrl,

    #[error("invalid metrics service URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The HTTP client (TLS backend) could not be initialised.
    #[error("cannot initialise HTTP client: {0}")]
    HttpClient(String),

    #[error("invalid {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ProfileEntry {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProfilesFile {
    #[serde(default)]
    pub profiles: BTreeMap<String, ProfileEntry>,
    #[serde(default)]
    pub version: u32,
}

pub fn config_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("cloudmon")
    } else {
        dirs_next::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cloudmon")
    }
}

pub fn profiles_path() -> PathBuf {
    config_dir().join("profiles.json")
}

pub fn load_profiles() -> ProfilesFile {
    match fs::read_to_string(profiles_path()) {
        Ok(s) => serde_json::from_str(&s).unwrap_or_default(),
        Err(_) => ProfilesFile::default(),
    }
}

pub fn save_profiles(p: &ProfilesFile) -> std::io::Result<()> {
    let path = profiles_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let data = serde_json::to_vec_pretty(p)?;
    fs::write(path, data)
}

/// What the user asked for on the command line.
#[derive(Debug, Default, Clone)]
pub struct ConfigRequest {
    pub url: Option<String>,
    pub profile: Option<String>,
    pub interval_secs: Option<u64>,
    pub timeout_secs: Option<u64>,
    pub save: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
    pub interval: Duration,
    pub timeout: Duration,
}

/// Outcome of resolving a request against the profiles file.
#[derive(Debug)]
pub struct Resolved {
    pub settings: Settings,
    /// Updated profiles to persist, when the request created or changed one.
    pub save: Option<ProfilesFile>,
}

impl ConfigRequest {
    /// `env_url` is the value of [`API_URL_ENV`], passed in so resolution stays pure.
    pub fn resolve(
        &self,
        pf: &ProfilesFile,
        env_url: Option<String>,
    ) -> Result<Resolved, ConfigError> {
        let entry = self.profile.as_ref().and_then(|n| pf.profiles.get(n));

        let base_url = self
            .url
            .clone()
            .or_else(|| entry.map(|e| e.url.clone()))
            .or(env_url.filter(|u| !u.trim().is_empty()))
            .ok_or(ConfigError::MissingBaseUrl)?;

        let interval_secs = self
            .interval_secs
            .or_else(|| entry.and_then(|e| e.interval_secs));
        let timeout_secs = self
            .timeout_secs
            .or_else(|| entry.and_then(|e| e.timeout_secs));

        let settings = Settings {
            base_url,
            interval: secs_or(interval_secs, DEFAULT_INTERVAL, "interval")?,
            timeout: secs_or(timeout_secs, DEFAULT_TIMEOUT, "timeout")?,
        };

        // Profile + URL: create when new, overwrite only with --save and a real change
        let mut save = None;
        if let (Some(name), Some(url)) = (self.profile.as_ref(), self.url.as_ref()) {
            let wanted = ProfileEntry {
                url: url.clone(),
                interval_secs,
                timeout_secs,
            };
            let write = match entry {
                None => true,
                Some(existing) => self.save && *existing != wanted,
            };
            if write {
                let mut updated = pf.clone();
                updated.profiles.insert(name.clone(), wanted);
                save = Some(updated);
            }
        }

        Ok(Resolved { settings, save })
    }
}

fn secs_or(v: Option<u64>, default: Duration, field: &'static str) -> Result<Duration, ConfigError> {
    match v {
        None => Ok(default),
        Some(0) => Err(ConfigError::InvalidValue {
            field,
            reason: "must be at least 1 second".into(),
        }),
        Some(s) => Ok(Duration::from_secs(s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pf_with(name: &str, url: &str) -> ProfilesFile {
        let mut pf = ProfilesFile::default();
        pf.profiles.insert(
            name.into(),
            ProfileEntry {
                url: url.into(),
                interval_secs: Some(10),
                timeout_secs: None,
            },
        );
        pf
    }

    #[test]
    fn missing_url_everywhere_is_fatal() {
        let req = ConfigRequest::default();
        let err = req.resolve(&ProfilesFile::default(), None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingBaseUrl));
        // blank env value counts as missing
        let err = req
            .resolve(&ProfilesFile::default(), Some("  ".into()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingBaseUrl));
    }

    #[test]
    fn env_url_is_last_resort() {
        let req = ConfigRequest::default();
        let r = req
            .resolve(&ProfilesFile::default(), Some("http://env:1".into()))
            .unwrap();
        assert_eq!(r.settings.base_url, "http://env:1");
        assert_eq!(r.settings.interval, DEFAULT_INTERVAL);
        assert_eq!(r.settings.timeout, DEFAULT_TIMEOUT);
        assert!(r.save.is_none());

        let req = ConfigRequest {
            url: Some("http://cli:2".into()),
            ..Default::default()
        };
        let r = req
            .resolve(&ProfilesFile::default(), Some("http://env:1".into()))
            .unwrap();
        assert_eq!(r.settings.base_url, "http://cli:2");
    }

    #[test]
    fn profile_supplies_url_and_interval() {
        let pf = pf_with("lab", "http://lab:5000");
        let req = ConfigRequest {
            profile: Some("lab".into()),
            ..Default::default()
        };
        let r = req.resolve(&pf, Some("http://env:1".into())).unwrap();
        assert_eq!(r.settings.base_url, "http://lab:5000");
        assert_eq!(r.settings.interval, Duration::from_secs(10));
        assert!(r.save.is_none());

        // CLI interval beats the profile
        let req = ConfigRequest {
            profile: Some("lab".into()),
            interval_secs: Some(3),
            ..Default::default()
        };
        assert_eq!(
            req.resolve(&pf, None).unwrap().settings.interval,
            Duration::from_secs(3)
        );
    }

    #[test]
    fn new_profile_with_url_is_saved() {
        let req = ConfigRequest {
            url: Some("http://new:1".into()),
            profile: Some("fresh".into()),
            ..Default::default()
        };
        let r = req.resolve(&ProfilesFile::default(), None).unwrap();
        let saved = r.save.expect("profile should be saved");
        assert_eq!(saved.profiles["fresh"].url, "http://new:1");
    }

    #[test]
    fn existing_profile_changes_only_with_save_flag() {
        let pf = pf_with("lab", "http://lab:5000");
        let mut req = ConfigRequest {
            url: Some("http://other:1".into()),
            profile: Some("lab".into()),
            ..Default::default()
        };
        assert!(req.resolve(&pf, None).unwrap().save.is_none());
        req.save = true;
        let saved = req.resolve(&pf, None).unwrap().save.unwrap();
        assert_eq!(saved.profiles["lab"].url, "http://other:1");
    }

    #[test]
    fn http_client_failure_does_not_blame_a_setting() {
        let msg = ConfigError::HttpClient("tls backend unavailable".into()).to_string();
        assert_eq!(msg, "cannot initialise HTTP client: tls backend unavailable");
        assert!(!msg.contains("timeout") && !msg.contains("interval"));
    }

    #[test]
    fn zero_seconds_rejected() {
        let req = ConfigRequest {
            url: Some("http://h".into()),
            timeout_secs: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            req.resolve(&ProfilesFile::default(), None),
            Err(ConfigError::InvalidValue { field: "timeout", .. })
        ));
    }
}
