//! A single pkginfo record and its read/write/mutate operations

use crate::domain::{
    KEY_CATALOGS, KEY_DISPLAY_NAME, KEY_FORCE_INSTALL_AFTER_DATE, KEY_INSTALLER_ITEM_LOCATION,
    KEY_NAME, KEY_UNATTENDED_INSTALL, KEY_VERSION,
};
use crate::pkginfo::date::to_plist_date;
use chrono::NaiveDateTime;
use plist::{Dictionary, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PkgInfoError {
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: plist::Error,
    },
    #[error("{0} does not contain a dictionary at its root")]
    NotADictionary(PathBuf),
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: plist::Error,
    },
}

/// In-memory pkginfo: a dictionary of string keys to plist values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PkgInfo {
    dict: Dictionary,
}

impl PkgInfo {
    pub fn new(dict: Dictionary) -> Self {
        Self { dict }
    }

    /// Read a pkginfo from disk. XML and binary plists are both accepted.
    pub fn read(path: &Path) -> Result<Self, PkgInfoError> {
        let value = Value::from_file(path)
            .map_err(|source| PkgInfoError::Parse { path: path.to_path_buf(), source })?;
        value
            .into_dictionary()
            .map(Self::new)
            .ok_or_else(|| PkgInfoError::NotADictionary(path.to_path_buf()))
    }

    /// Write the record back as an XML plist, replacing the file.
    pub fn write(&self, path: &Path) -> Result<(), PkgInfoError> {
        Value::Dictionary(self.dict.clone())
            .to_file_xml(path)
            .map_err(|source| PkgInfoError::Write { path: path.to_path_buf(), source })
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.dict.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.dict.contains_key(key)
    }

    /// String value of `key`, or `None` when absent or not a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.dict.get(key).and_then(Value::as_string)
    }

    pub fn name(&self) -> Option<&str> {
        self.get_str(KEY_NAME)
    }

    pub fn display_name(&self) -> Option<&str> {
        self.get_str(KEY_DISPLAY_NAME)
    }

    pub fn version(&self) -> Option<&str> {
        self.get_str(KEY_VERSION)
    }

    pub fn installer_item_location(&self) -> Option<&str> {
        self.get_str(KEY_INSTALLER_ITEM_LOCATION)
    }

    /// Catalog names; non-string array members are ignored.
    pub fn catalogs(&self) -> Vec<&str> {
        self.dict
            .get(KEY_CATALOGS)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_string).collect())
            .unwrap_or_default()
    }

    pub fn force_install_after_date(&self) -> Option<plist::Date> {
        self.dict.get(KEY_FORCE_INSTALL_AFTER_DATE).and_then(Value::as_date)
    }

    pub fn unattended_install(&self) -> Option<bool> {
        self.dict.get(KEY_UNATTENDED_INSTALL).and_then(Value::as_boolean)
    }

    /// Set `force_install_after_date`, or remove it when `date` is `None`.
    pub fn set_force_install_after_date(&mut self, date: Option<NaiveDateTime>) {
        match date {
            Some(date) => {
                self.set_key(KEY_FORCE_INSTALL_AFTER_DATE, Value::Date(to_plist_date(date)))
            }
            None => {
                self.remove_key(KEY_FORCE_INSTALL_AFTER_DATE);
            }
        }
    }

    pub fn set_unattended_install(&mut self, unattended: bool) {
        self.set_key(KEY_UNATTENDED_INSTALL, Value::Boolean(unattended));
    }

    /// Replace the catalog list with `[catalog]`. A blank catalog clears the list.
    pub fn set_catalog(&mut self, catalog: &str) {
        let catalogs = if catalog.trim().is_empty() {
            Vec::new()
        } else {
            vec![Value::String(catalog.to_string())]
        };
        self.set_key(KEY_CATALOGS, Value::Array(catalogs));
    }

    pub fn set_key(&mut self, key: &str, value: Value) {
        self.dict.insert(key.to_string(), value);
    }

    /// Remove `key`, returning whether it was present.
    pub fn remove_key(&mut self, key: &str) -> bool {
        self.dict.remove(key).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pkginfo::date::parse_install_date;
    use std::fs;
    use tempfile::TempDir;

    fn crypt() -> PkgInfo {
        let mut dict = Dictionary::new();
        dict.insert("name".to_string(), Value::String("Crypt".to_string()));
        dict.insert("version".to_string(), Value::String("0.7.2".to_string()));
        dict.insert(
            "catalogs".to_string(),
            Value::Array(vec![Value::String("testing".to_string())]),
        );
        dict.insert("unattended_install".to_string(), Value::Boolean(true));
        PkgInfo::new(dict)
    }

    #[test]
    fn set_date_stores_exact_timestamp() {
        let mut record = crypt();
        let date = parse_install_date("2011-08-03T13:00:00Z").unwrap();
        record.set_force_install_after_date(date);
        assert_eq!(record.force_install_after_date(), date.map(to_plist_date));
    }

    #[test]
    fn clearing_date_removes_existing_key() {
        let mut record = crypt();
        record.set_force_install_after_date(parse_install_date("2011-08-03T13:00:00Z").unwrap());
        record.set_force_install_after_date(None);
        assert!(!record.contains_key(KEY_FORCE_INSTALL_AFTER_DATE));
    }

    #[test]
    fn clearing_absent_date_is_noop() {
        let mut record = crypt();
        let before = record.clone();
        record.set_force_install_after_date(None);
        assert_eq!(record, before);
    }

    #[test]
    fn unattended_install_is_always_set() {
        let mut record = crypt();
        record.set_unattended_install(false);
        assert_eq!(record.unattended_install(), Some(false));
        record.remove_key(KEY_UNATTENDED_INSTALL);
        record.set_unattended_install(true);
        assert_eq!(record.unattended_install(), Some(true));
    }

    #[test]
    fn set_catalog_replaces_list_with_single_entry() {
        let mut record = crypt();
        record.set_key(
            KEY_CATALOGS,
            Value::Array(vec![
                Value::String("testing".to_string()),
                Value::String("phase1".to_string()),
            ]),
        );
        record.set_catalog("phase2");
        assert_eq!(record.catalogs(), vec!["phase2"]);
    }

    #[test]
    fn blank_catalog_clears_list() {
        let mut record = crypt();
        record.set_catalog("");
        assert!(record.catalogs().is_empty());
        assert!(record.contains_key(KEY_CATALOGS));
    }

    #[test]
    fn remove_key_reports_presence() {
        let mut record = crypt();
        assert!(record.remove_key("name"));
        assert!(!record.remove_key("name"));
    }

    #[test]
    fn read_write_preserves_other_keys() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("Crypt-0.7.2.pkginfo");
        crypt().write(&path).expect("write");

        let mut record = PkgInfo::read(&path).expect("read");
        record.set_unattended_install(false);
        record.write(&path).expect("rewrite");

        let reread = PkgInfo::read(&path).expect("reread");
        assert_eq!(reread.name(), Some("Crypt"));
        assert_eq!(reread.version(), Some("0.7.2"));
        assert_eq!(reread.unattended_install(), Some(false));
    }

    #[test]
    fn read_rejects_garbage_and_non_dictionaries() {
        let tmp = TempDir::new().expect("tmp");
        let garbage = tmp.path().join("broken.pkginfo");
        fs::write(&garbage, "<?xml version=\"1.0\"?><plist><dict><key>name</key>")
            .expect("write");
        assert!(matches!(PkgInfo::read(&garbage), Err(PkgInfoError::Parse { .. })));

        let array = tmp.path().join("array.plist");
        Value::Array(vec![Value::Boolean(true)]).to_file_xml(&array).expect("write array");
        assert!(matches!(PkgInfo::read(&array), Err(PkgInfoError::NotADictionary(_))));
    }
}
