//! Response payloads for `/upload_file`.
//!
//! Two shapes depending on the file class: images return dimensions plus a
//! base64 data URI the client can inline, code files return their decoded
//! text. Field names match the JSON contract (`fileType`, `type`).

use serde::{Deserialize, Serialize};

/// Metadata for an uploaded image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageFile {
    pub id: String,
    pub name: String,
    /// Size in bytes of the raw upload.
    pub size: usize,
    pub width: u32,
    pub height: u32,
    #[serde(rename = "fileType")]
    pub file_type: String,
    /// `data:{mime};base64,...` URI of the full image.
    pub base64: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Metadata plus content for an uploaded code/text file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeFile {
    pub id: String,
    pub name: String,
    /// Size in characters of the decoded content.
    pub size: usize,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Either upload result, serialized as its inner shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UploadedFile {
    Image(ImageFile),
    Code(CodeFile),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_file_field_names() {
        let img = ImageFile {
            id: "abc".into(),
            name: "pic.png".into(),
            size: 10,
            width: 2,
            height: 3,
            file_type: "image/png".into(),
            base64: "data:image/png;base64,AA==".into(),
            kind: "image".into(),
        };
        let json = serde_json::to_value(&img).unwrap();
        assert_eq!(json["fileType"], "image/png");
        assert_eq!(json["type"], "image");
    }

    #[test]
    fn test_uploaded_file_untagged() {
        let code = UploadedFile::Code(CodeFile {
            id: "x".into(),
            name: "a.py".into(),
            size: 5,
            content: "print".into(),
            kind: "code".into(),
        });
        let json = serde_json::to_value(&code).unwrap();
        assert_eq!(json["type"], "code");
        assert!(json.get("width").is_none());
    }
}
