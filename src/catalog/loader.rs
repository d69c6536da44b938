use super::TerpeneRecord;
use crate::errors::{Error, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Load a catalog document from disk.
pub fn load_catalog(path: &Path) -> Result<Vec<TerpeneRecord>> {
    let contents = fs::read_to_string(path)
        .map_err(|e| Error::io("Failed to read catalog", path, e))?;

    let records = parse_document(&contents).map_err(|source| Error::Catalog {
        path: Some(path.to_path_buf()),
        source,
    })?;

    log::debug!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Parse a catalog document.
///
/// Accepts either a bare JSON array of records or an object holding the
/// records under a `terpenes` key.
pub fn parse_catalog(contents: &str) -> Result<Vec<TerpeneRecord>> {
    parse_document(contents).map_err(|source| Error::Catalog { path: None, source })
}

fn parse_document(contents: &str) -> std::result::Result<Vec<TerpeneRecord>, serde_json::Error> {
    let document: Value = serde_json::from_str(contents)?;
    let records = match document {
        Value::Array(_) => document,
        Value::Object(mut map) => map.remove("terpenes").ok_or_else(|| {
            <serde_json::Error as serde::de::Error>::custom(
                "catalog object has no 'terpenes' array",
            )
        })?,
        _ => {
            return Err(<serde_json::Error as serde::de::Error>::custom(
                "catalog must be an array of records or an object with a 'terpenes' array",
            ))
        }
    };
    serde_json::from_value(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, CategoryField};

    #[test]
    fn test_parse_bare_array() {
        let records = parse_catalog(
            r#"[{"id": "t1", "name": "Limonene", "category": "Core", "effects": ["energizing"]}]"#,
        )
        .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].category, CategoryField::Known(Category::Core));
        assert_eq!(records[0].effects, vec!["energizing"]);
    }

    #[test]
    fn test_parse_wrapped_document() {
        let records = parse_catalog(r#"{"terpenes": [{"id": "t1", "name": "Pinene"}]}"#).unwrap();
        assert_eq!(records[0].name, "Pinene");
        assert!(records[0].effects.is_empty());
        assert_eq!(records[0].category, CategoryField::Missing);
    }

    #[test]
    fn test_structural_issues_degrade_to_empty() {
        let records = parse_catalog(
            r#"[{"id": "t1", "name": "Myrcene", "effects": null, "sources": "mango",
                 "aroma": null, "category": 3}]"#,
        )
        .unwrap();
        let record = &records[0];
        assert!(record.effects.is_empty());
        assert!(record.sources.is_empty());
        assert_eq!(record.aroma, "");
        assert_eq!(record.category, CategoryField::Invalid("3".to_string()));
    }

    #[test]
    fn test_non_string_list_entries_are_skipped() {
        let records =
            parse_catalog(r#"[{"id": "t1", "name": "Humulene", "effects": ["anti-inflammatory", 4, null]}]"#)
                .unwrap();
        assert_eq!(records[0].effects, vec!["anti-inflammatory"]);
    }

    #[test]
    fn test_opaque_fields_pass_through() {
        let records = parse_catalog(
            r#"[{"id": "t1", "name": "Linalool", "boilingPoint": 198, "molecularFormula": "C10H18O"}]"#,
        )
        .unwrap();
        let record = &records[0];
        assert_eq!(record.extra.get("boilingPoint"), Some(&serde_json::json!(198)));

        let back = serde_json::to_value(record).unwrap();
        assert_eq!(back["molecularFormula"], "C10H18O");
    }

    #[test]
    fn test_wrong_top_level_shape_is_an_error() {
        assert!(matches!(parse_catalog("42"), Err(Error::Catalog { .. })));
        assert!(matches!(
            parse_catalog(r#"{"records": []}"#),
            Err(Error::Catalog { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_catalog(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
