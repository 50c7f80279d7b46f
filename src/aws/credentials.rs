use chrono::SecondsFormat;
use ini::{EscapePolicy, Ini, ParseOption, WriteOption};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use super::Credentials;
use crate::{
    constants::{
        ACCESS_KEY_ID_KEY, DEFAULT_PROFILE, SECRET_ACCESS_KEY_KEY, SECURITY_TOKEN_KEY,
        SESSION_EXPIRATION_KEY, SESSION_TOKEN_KEY,
    },
    error::{Error, Result},
};

/// Merge credentials into the `default` profile of the shared credentials file.
///
/// Other profiles and unrelated keys survive the rewrite. The new document
/// is written to a sibling temporary file and renamed over the target, so
/// readers see either the old file or the new one, never a partial write.
pub fn save_credentials(path: &Path, creds: &Credentials) -> Result<()> {
    let existing = path.exists();
    // Write through a symlinked credentials file instead of replacing the link.
    let target: PathBuf = if existing {
        fs::canonicalize(path).map_err(|e| Error::io(path, e))?
    } else {
        path.to_path_buf()
    };
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;

    let mut ini = if existing {
        Ini::load_from_file_opt(&target, verbatim_parse()).map_err(|e| Error::ini(path, e))?
    } else {
        Ini::new()
    };

    ini.with_section(Some(DEFAULT_PROFILE))
        .set(ACCESS_KEY_ID_KEY, &creds.access_key_id)
        .set(SECRET_ACCESS_KEY_KEY, &creds.secret_access_key)
        .set(SESSION_TOKEN_KEY, &creds.session_token)
        .set(SECURITY_TOKEN_KEY, &creds.session_token);

    if let Some(expiration) = creds.expiration {
        ini.with_section(Some(DEFAULT_PROFILE)).set(
            SESSION_EXPIRATION_KEY,
            expiration.to_rfc3339_opts(SecondsFormat::Secs, true),
        );
    }

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
    ini.write_to_opt(&mut tmp, verbatim_write())
        .map_err(|e| Error::io(tmp.path(), e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| Error::io(tmp.path(), e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = if existing {
            let current = fs::metadata(&target)
                .map_err(|e| Error::io(&target, e))?
                .permissions()
                .mode();
            restricted_mode(current)
        } else {
            crate::constants::CREDENTIALS_FILE_MODE
        };
        debug!("Credentials file mode: {:o}", mode);
        tmp.as_file()
            .set_permissions(fs::Permissions::from_mode(mode))
            .map_err(|e| Error::io(tmp.path(), e))?;
    }

    tmp.persist(&target)
        .map_err(|e| Error::io(&target, e.error))?;

    info!("Credentials saved to profile: {}", DEFAULT_PROFILE);
    Ok(())
}

/// Values of profiles we do not own are kept byte for byte: no unescaping,
/// no quote stripping.
fn verbatim_parse() -> ParseOption {
    ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..Default::default()
    }
}

fn verbatim_write() -> WriteOption {
    WriteOption {
        escape_policy: EscapePolicy::Nothing,
        ..Default::default()
    }
}

/// Keep an existing mode unless it grants more than owner read/write.
#[cfg(unix)]
fn restricted_mode(current: u32) -> u32 {
    use crate::constants::CREDENTIALS_FILE_MODE;

    let current = current & 0o777;
    if current & !CREDENTIALS_FILE_MODE != 0 {
        current & CREDENTIALS_FILE_MODE
    } else {
        current
    }
}
