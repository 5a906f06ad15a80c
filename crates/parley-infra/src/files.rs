//! Upload classification and metadata extraction.
//!
//! Files are classified by extension: `.png`/`.jpg`/`.jpeg` are images,
//! `.py`/`.js`/`.txt` are code. Images are decoded just far enough to read
//! their dimensions and re-emitted as a base64 data URI; code files are
//! returned as UTF-8 text with a character count.

use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::ImageReader;
use uuid::Uuid;

use parley_types::upload::{CodeFile, ImageFile, UploadedFile};

/// Failure while classifying or decoding an upload.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error(
        "Unsupported file type. Use images (.png, .jpg, .jpeg) or code files (.py, .js, .txt)"
    )]
    Unsupported,

    #[error("Failed to process file: {0}")]
    Process(String),
}

/// Classify and inspect an uploaded file by its name and raw bytes.
pub fn inspect_upload(name: &str, bytes: &[u8]) -> Result<UploadedFile, FileError> {
    let lower = name.to_lowercase();
    if let Some(mime) = image_mime(&lower) {
        inspect_image(name, mime, bytes).map(UploadedFile::Image)
    } else if is_code(&lower) {
        inspect_code(name, bytes).map(UploadedFile::Code)
    } else {
        Err(FileError::Unsupported)
    }
}

fn image_mime(lower: &str) -> Option<&'static str> {
    if lower.ends_with(".png") {
        Some("image/png")
    } else if lower.ends_with(".jpg") || lower.ends_with(".jpeg") {
        Some("image/jpeg")
    } else {
        None
    }
}

fn is_code(lower: &str) -> bool {
    lower.ends_with(".py") || lower.ends_with(".js") || lower.ends_with(".txt")
}

fn inspect_image(name: &str, mime: &str, bytes: &[u8]) -> Result<ImageFile, FileError> {
    let (width, height) = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| FileError::Process(e.to_string()))?
        .into_dimensions()
        .map_err(|e| FileError::Process(e.to_string()))?;

    let encoded = STANDARD.encode(bytes);

    Ok(ImageFile {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        size: bytes.len(),
        width,
        height,
        file_type: mime.to_string(),
        base64: format!("data:{mime};base64,{encoded}"),
        kind: "image".to_string(),
    })
}

fn inspect_code(name: &str, bytes: &[u8]) -> Result<CodeFile, FileError> {
    let content =
        String::from_utf8(bytes.to_vec()).map_err(|e| FileError::Process(e.to_string()))?;

    Ok(CodeFile {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        size: content.chars().count(),
        content,
        kind: "code".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbImage::new(width, height);
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_png_upload_reports_dimensions() {
        let bytes = png_bytes(4, 3);
        let uploaded = inspect_upload("photo.PNG", &bytes).unwrap();

        let UploadedFile::Image(img) = uploaded else {
            panic!("expected image classification");
        };
        assert_eq!(img.width, 4);
        assert_eq!(img.height, 3);
        assert_eq!(img.size, bytes.len());
        assert_eq!(img.file_type, "image/png");
        assert_eq!(img.kind, "image");
        assert_eq!(img.name, "photo.PNG");
        assert!(img.base64.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_base64_round_trips() {
        let bytes = png_bytes(2, 2);
        let UploadedFile::Image(img) = inspect_upload("a.png", &bytes).unwrap() else {
            panic!("expected image");
        };
        let encoded = img.base64.strip_prefix("data:image/png;base64,").unwrap();
        assert_eq!(STANDARD.decode(encoded).unwrap(), bytes);
    }

    #[test]
    fn test_code_upload_returns_content() {
        let source = "print('hi')\n";
        let UploadedFile::Code(code) = inspect_upload("script.py", source.as_bytes()).unwrap()
        else {
            panic!("expected code classification");
        };
        assert_eq!(code.content, source);
        assert_eq!(code.size, source.chars().count());
        assert_eq!(code.kind, "code");
    }

    #[test]
    fn test_code_size_counts_characters_not_bytes() {
        let source = "héllo";
        let UploadedFile::Code(code) = inspect_upload("note.txt", source.as_bytes()).unwrap()
        else {
            panic!("expected code classification");
        };
        assert_eq!(code.size, 5);
    }

    #[test]
    fn test_unsupported_extension_rejected() {
        let err = inspect_upload("archive.zip", b"PK").unwrap_err();
        assert!(matches!(err, FileError::Unsupported));
        assert!(err.to_string().starts_with("Unsupported file type."));
    }

    #[test]
    fn test_corrupt_image_reports_process_error() {
        let err = inspect_upload("broken.png", b"not a png").unwrap_err();
        assert!(matches!(err, FileError::Process(_)));
        assert!(err.to_string().starts_with("Failed to process file:"));
    }

    #[test]
    fn test_invalid_utf8_code_reports_process_error() {
        let err = inspect_upload("bad.txt", &[0xff, 0xfe, 0xfd]).unwrap_err();
        assert!(matches!(err, FileError::Process(_)));
    }

    #[test]
    fn test_ids_are_full_uuids() {
        let UploadedFile::Code(a) = inspect_upload("a.txt", b"x").unwrap() else {
            panic!("expected code");
        };
        let UploadedFile::Code(b) = inspect_upload("b.txt", b"x").unwrap() else {
            panic!("expected code");
        };
        assert_eq!(a.id.len(), 36);
        assert_ne!(a.id, b.id);
    }
}
