pub mod handle;

pub use handle::ConfigHandle;

use crate::utils::error::Result;
use regex::Regex;
use std::path::Path;

/// Replaces `${VAR}` references with values from the process environment.
/// Unresolved references are left intact so the parse error points at them.
pub fn substitute_env_vars(content: &str) -> String {
    let re = Regex::new(r"\$\{([^}]+)\}").unwrap();
    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{var_name}}}"))
    })
    .to_string()
}

/// Writes through a sibling temp file and renames it over the target, so a
/// crash mid-write never leaves a truncated file behind.
pub(crate) fn write_atomically(target: &Path, content: &str) -> Result<()> {
    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut temp_name = target
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| "config".into());
    temp_name.push(".tmp");
    let temp = target.with_file_name(temp_name);
    std::fs::write(&temp, content)?;
    std::fs::rename(&temp, target)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitute_known_env_var() {
        std::env::set_var("FEMUTILS_TEST_HOST", "db.example.com");
        let out = substitute_env_vars("host: ${FEMUTILS_TEST_HOST}");
        assert_eq!(out, "host: db.example.com");
    }

    #[test]
    fn test_unknown_env_var_left_intact() {
        let out = substitute_env_vars("host: ${FEMUTILS_DEFINITELY_UNSET}");
        assert_eq!(out, "host: ${FEMUTILS_DEFINITELY_UNSET}");
    }
}
