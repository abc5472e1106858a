use std::path::PathBuf;

use crate::errors::{Result, Error, ErrorKind};

pub fn get_config_path() -> Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|e| Error::wrap(e, ErrorKind::Read)
            .with_msg("utils: Failed to get home environment variable"))?;

    Ok(PathBuf::from(home).join(".config/scrollwatch.conf"))
}

pub fn format_offset(offset: std::time::Duration) -> String {
    format!("{:>6}ms", offset.as_millis())
}
