use std::{fmt, fs, io, path::Path};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use tracing::{debug, info};

use crate::{
    clock::Clock,
    error::{Error, Result},
};

/// Layout of the fallback timestamp, minus its trailing zone abbreviation
const ABBREVIATED_ZONE_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// A login session left in the SSO cache by `aws sso login`
#[derive(Clone, PartialEq, Eq)]
pub struct CachedLogin {
    pub start_url: String,
    pub region: String,
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

impl fmt::Debug for CachedLogin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedLogin")
            .field("start_url", &self.start_url)
            .field("region", &self.region)
            .field("access_token", &"** redacted **")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Every shape found in the cache directory deserializes into this;
/// client registrations simply lack `accessToken`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct CacheEntry {
    start_url: Option<String>,
    region: Option<String>,
    access_token: Option<String>,
    expires_at: Option<String>,
}

impl CacheEntry {
    fn into_login(self) -> Option<CachedLogin> {
        let access_token = self.access_token.filter(|token| !token.is_empty())?;
        let region = self.region?;
        let expires_at = parse_expires_at(self.expires_at.as_deref()?)?;

        Some(CachedLogin {
            start_url: self.start_url.unwrap_or_default(),
            region,
            access_token,
            expires_at,
        })
    }
}

/// Parse an `expiresAt` value.
///
/// RFC 3339 (any fractional precision) is tried first, then the
/// `2006-01-02T15:04:05UTC` form older CLI releases wrote, with optional
/// fractional seconds before the abbreviation. Zone
/// abbreviations carry no offset information and are read as UTC.
pub fn parse_expires_at(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    let zone_start = raw
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_alphabetic())
        .last()
        .map(|(idx, _)| idx)?;
    let (wall_clock, zone) = raw.split_at(zone_start);
    if !(3..=5).contains(&zone.len()) {
        return None;
    }

    NaiveDateTime::parse_from_str(wall_clock, ABBREVIATED_ZONE_LAYOUT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Find the cached login with the latest expiry.
///
/// Files that are not JSON, lack an access token, or carry an unreadable
/// timestamp are skipped. Entries are visited in file name order, so equal
/// expiries resolve to the first name.
pub fn scan(dir: &Path, clock: &impl Clock) -> Result<CachedLogin> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("SSO cache directory does not exist: {}", dir.display());
            return Err(Error::NoLogin);
        }
        Err(e) => return Err(Error::io(dir, e)),
    };

    let mut paths = entries
        .map(|entry| entry.map(|e| e.path()))
        .collect::<io::Result<Vec<_>>>()
        .map_err(|e| Error::io(dir, e))?;
    paths.sort();

    let mut latest: Option<CachedLogin> = None;
    for path in paths.iter().filter(|p| p.is_file()) {
        let Some(login) = read_login(path)? else {
            continue;
        };

        if latest
            .as_ref()
            .is_none_or(|best| login.expires_at > best.expires_at)
        {
            latest = Some(login);
        }
    }

    let login = latest.ok_or(Error::NoLogin)?;
    if login.expires_at <= clock.now() {
        info!("Latest cached SSO login expired at {}", login.expires_at);
        return Err(Error::Expired);
    }

    info!(
        "Using cached SSO login for {} ({}), expires at {}",
        login.start_url, login.region, login.expires_at
    );
    Ok(login)
}

fn read_login(path: &Path) -> Result<Option<CachedLogin>> {
    let content = fs::read(path).map_err(|e| Error::io(path, e))?;

    let entry = match serde_json::from_slice::<CacheEntry>(&content) {
        Ok(entry) => entry,
        Err(e) => {
            debug!("Skipping {}: not a cache entry ({})", path.display(), e);
            return Ok(None);
        }
    };

    let login = entry.into_login();
    if login.is_none() {
        debug!("Skipping {}: no usable login", path.display());
    }
    Ok(login)
}
