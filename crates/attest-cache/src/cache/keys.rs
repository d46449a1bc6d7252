//! Key to on-disk name mapping.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::digest::is_key;

pub(crate) const ENTRY_EXT: &str = "json";
const TEMP_EXT: &str = "tmp";

pub(crate) fn entry_path_impl(storage_dir: &Path, key: &str) -> PathBuf {
    storage_dir.join(format!("{key}.{ENTRY_EXT}"))
}

/// Unique per writer, so concurrent writers of one key never share a temp file.
pub(crate) fn temp_path_impl(storage_dir: &Path, key: &str) -> PathBuf {
    storage_dir.join(format!(".{key}.{}.{TEMP_EXT}", Uuid::new_v4().simple()))
}

/// Key of an entry file name (`<key>.json`), if it is one.
pub(crate) fn key_from_file_name(name: &str) -> Option<&str> {
    name.strip_suffix(".json").filter(|stem| is_key(stem))
}

pub(crate) fn is_temp_file_name(name: &str) -> bool {
    name.starts_with('.') && name.ends_with(".tmp")
}
