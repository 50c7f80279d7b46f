use ini::{Ini, Properties};
use std::path::Path;
use tracing::debug;

use crate::{
    constants::{DEFAULT_PROFILE, SSO_ACCOUNT_ID_KEY, SSO_ROLE_NAME_KEY},
    error::{Error, Result},
};

/// Account and role the cached SSO token is exchanged for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleBinding {
    pub account_id: String,
    pub role_name: String,
}

impl RoleBinding {
    fn from_ini_section(section: Option<&Properties>, path: &Path) -> Result<Self> {
        let field = |key: &'static str| {
            section
                .and_then(|props| props.get(key))
                .filter(|value| !value.is_empty())
                .map(str::to_string)
                .ok_or_else(|| Error::MissingField {
                    key,
                    path: path.to_path_buf(),
                })
        };

        Ok(Self {
            account_id: field(SSO_ACCOUNT_ID_KEY)?,
            role_name: field(SSO_ROLE_NAME_KEY)?,
        })
    }
}

/// Read the role binding from the `default` section of the AWS config file.
pub fn read_role_binding(path: &Path) -> Result<RoleBinding> {
    let ini = Ini::load_from_file(path).map_err(|e| Error::ini(path, e))?;
    let binding = RoleBinding::from_ini_section(ini.section(Some(DEFAULT_PROFILE)), path)?;

    debug!(
        "Role binding: account {} role {}",
        binding.account_id, binding.role_name
    );
    Ok(binding)
}
