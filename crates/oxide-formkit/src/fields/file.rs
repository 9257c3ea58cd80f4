//! File upload field and the submitted-files lookup it reads from.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::bag::AttrValue;
use crate::element::{impl_element, Field, FieldCore};
use crate::error::{FormError, Result};

const UPLOAD_KEYS: [&str; 5] = ["name", "type", "tmp_name", "error", "size"];

/// Metadata of one uploaded file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileUpload {
    /// Original file name.
    pub name: String,
    /// Mime type reported by the client.
    #[serde(rename = "type")]
    pub mime_type: String,
    /// Where the upload was stored.
    pub tmp_name: String,
    /// Upload error code, `0` on success.
    pub error: i64,
    /// Size in bytes.
    pub size: u64,
}

impl FileUpload {
    fn assign(&mut self, key: &str, value: &Value) {
        match key {
            "name" => self.name = text(value),
            "type" => self.mime_type = text(value),
            "tmp_name" => self.tmp_name = text(value),
            "error" => self.error = number(value).unwrap_or_default(),
            "size" => self.size = number(value).and_then(|n| u64::try_from(n).ok()).unwrap_or_default(),
            _ => {}
        }
    }
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn number(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Submitted files, keyed the way multipart form data arrives:
///
/// ```json
/// { "photos": { "name": ["a.png", "b.png"], "type": ["image/png", "image/png"], ... } }
/// ```
///
/// Under each root name, every metadata key (`name`, `type`, `tmp_name`,
/// `error`, `size`) holds a tree following the rest of the bracketed field
/// name, e.g. `docs[cv]` is found at `docs.name.cv`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadedFiles {
    root: Value,
}

impl UploadedFiles {
    /// Creates an empty lookup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an already parsed structure.
    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    /// Parses the structure from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let root = serde_json::from_str(json).map_err(|e| FormError::ParseError(e.to_string()))?;
        Ok(Self { root })
    }

    /// Returns the uploads submitted for a field name such as `avatar`,
    /// `photos[]` or `docs[cv]`.
    pub fn lookup(&self, field_name: &str) -> Vec<FileUpload> {
        let (root, path) = split_name(field_name);
        let Some(entry) = self.root.get(root) else {
            debug!(field = field_name, "no uploaded files for field");
            return Vec::new();
        };

        let mut uploads: Vec<FileUpload> = Vec::new();
        for key in UPLOAD_KEYS {
            let node = path
                .iter()
                .try_fold(entry.get(key), |node, segment| Some(node?.get(*segment)))
                .flatten();
            let Some(node) = node else {
                continue;
            };

            let values: Vec<&Value> = match node {
                Value::Array(items) => items.iter().collect(),
                Value::Object(map) => map.values().collect(),
                scalar => vec![scalar],
            };
            if uploads.len() < values.len() {
                uploads.resize_with(values.len(), FileUpload::default);
            }
            for (upload, value) in uploads.iter_mut().zip(values) {
                upload.assign(key, value);
            }
        }

        if uploads.is_empty() {
            debug!(field = field_name, "no uploaded files for field");
        }
        uploads
    }
}

/// Splits `root[a][b][]` into `root` and `["a", "b"]`; empty brackets are dropped.
fn split_name(name: &str) -> (&str, Vec<&str>) {
    let Some(open) = name.find('[') else {
        return (name, Vec::new());
    };
    let path = name[open..]
        .split(['[', ']'])
        .filter(|segment| !segment.is_empty())
        .collect();
    (&name[..open], path)
}

/// An `<input type="file">`. Names ending in `[]` accept several files.
///
/// Conditions are checked against the mime type of each upload.
#[derive(Debug, Clone)]
pub struct File {
    core: FieldCore,
    uploads: Vec<FileUpload>,
}

impl File {
    /// Creates a file field with no uploads.
    pub fn new(name: &str) -> Self {
        Self {
            core: FieldCore::new(name),
            uploads: Vec::new(),
        }
    }

    /// Creates a file field holding the uploads submitted under its name.
    pub fn from_uploaded(name: &str, files: &UploadedFiles) -> Self {
        let mut field = Self::new(name);
        field.uploads = files.lookup(field.name());
        field
    }

    /// Builder method to set the uploads.
    #[must_use]
    pub fn with_uploads(mut self, uploads: Vec<FileUpload>) -> Self {
        self.uploads = uploads;
        self
    }

    /// Returns the uploads.
    pub fn uploads(&self) -> &[FileUpload] {
        &self.uploads
    }

    /// Replaces the uploads.
    pub fn set_uploads(&mut self, uploads: Vec<FileUpload>) {
        self.uploads = uploads;
    }

    fn submitted(&self) -> impl Iterator<Item = &FileUpload> {
        self.uploads.iter().filter(|u| !u.name.is_empty())
    }
}

impl Field for File {
    fn core(&self) -> &FieldCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut FieldCore {
        &mut self.core
    }

    fn has_value(&self) -> bool {
        self.submitted().next().is_some()
    }

    fn condition_values(&self) -> Vec<String> {
        self.submitted().map(|u| u.mime_type.clone()).collect()
    }

    fn render_field(&self) -> String {
        let multiple = self.name().ends_with("[]");
        format!(
            "<input {}/>",
            self.attributes().render_with(&[
                ("type", Some(AttrValue::from("file"))),
                ("multiple", Some(AttrValue::Flag(multiple))),
            ])
        )
    }
}

impl_element!(File);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Condition;
    use serde_json::json;

    fn files() -> UploadedFiles {
        UploadedFiles::from_value(json!({
            "avatar": {
                "name": "me.png",
                "type": "image/png",
                "tmp_name": "/tmp/php1",
                "error": 0,
                "size": 1024
            },
            "photos": {
                "name": ["a.jpg", "b.gif"],
                "type": ["image/jpeg", "image/gif"],
                "tmp_name": ["/tmp/php2", "/tmp/php3"],
                "error": [0, 0],
                "size": [10, "20"]
            },
            "docs": {
                "name": { "cv": "cv.pdf" },
                "type": { "cv": "application/pdf" },
                "tmp_name": { "cv": "/tmp/php4" },
                "error": { "cv": 0 },
                "size": { "cv": 300 }
            }
        }))
    }

    #[test]
    fn test_split_name() {
        assert_eq!(split_name("avatar"), ("avatar", vec![]));
        assert_eq!(split_name("photos[]"), ("photos", vec![]));
        assert_eq!(split_name("docs[cv][]"), ("docs", vec!["cv"]));
    }

    #[test]
    fn test_lookup_single() {
        let uploads = files().lookup("avatar");
        assert_eq!(
            uploads,
            [FileUpload {
                name: "me.png".to_string(),
                mime_type: "image/png".to_string(),
                tmp_name: "/tmp/php1".to_string(),
                error: 0,
                size: 1024,
            }]
        );
    }

    #[test]
    fn test_lookup_multiple() {
        let uploads = files().lookup("photos[]");
        assert_eq!(uploads.len(), 2);
        assert_eq!(uploads[1].name, "b.gif");
        assert_eq!(uploads[1].size, 20);
    }

    #[test]
    fn test_lookup_nested() {
        let uploads = files().lookup("docs[cv]");
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].mime_type, "application/pdf");
    }

    #[test]
    fn test_lookup_missing() {
        assert!(files().lookup("nothing").is_empty());
        assert!(files().lookup("docs[letter]").is_empty());
        assert!(UploadedFiles::new().lookup("avatar").is_empty());
    }

    #[test]
    fn test_from_json() {
        let files = UploadedFiles::from_json(r#"{"f": {"name": "x.txt", "type": "text/plain"}}"#).unwrap();
        assert_eq!(files.lookup("f")[0].mime_type, "text/plain");
        assert!(matches!(
            UploadedFiles::from_json("{not json"),
            Err(FormError::ParseError(_))
        ));
    }

    #[test]
    fn test_render_field() {
        let field = File::new("avatar").with_required(true);
        assert_eq!(
            field.render_field(),
            r#"<input type="file" id="avatar" name="avatar" required="required"/>"#
        );
        let field = File::new("photos[]");
        assert_eq!(
            field.render_field(),
            r#"<input type="file" id="photos" name="photos[]" multiple="multiple"/>"#
        );
    }

    #[test]
    fn test_condition_checks_mime_type() {
        let mut field = File::from_uploaded("photos[]", &files());
        field
            .condition(&Condition::pattern("^image/"), "Images only")
            .unwrap();
        assert!(field.error_bag().is_empty());

        field
            .condition(&Condition::one_of(["image/jpeg"]), "JPEG only")
            .unwrap();
        assert_eq!(field.error_bag().all(), ["JPEG only"]);
    }

    #[test]
    fn test_upload_serde() {
        let upload: FileUpload = serde_json::from_value(json!({
            "name": "a", "type": "text/plain", "tmp_name": "/tmp/a", "error": 0, "size": 1
        }))
        .unwrap();
        assert_eq!(upload.mime_type, "text/plain");
        assert_eq!(serde_json::to_value(&upload).unwrap()["type"], "text/plain");
    }
}
