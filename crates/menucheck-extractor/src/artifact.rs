//! Uploaded artifacts, classified once at the boundary
//!
//! Downstream code matches on [`UploadedArtifact`] and never looks at the
//! declared MIME type again.

use crate::error::ExtractorError;

/// Supported image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageMediaType {
    /// `image/png`
    Png,
    /// `image/jpeg` (also accepted as `image/jpg`)
    Jpeg,
    /// `image/webp`
    Webp,
}

impl ImageMediaType {
    /// Parse a declared MIME type
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/png" => Some(ImageMediaType::Png),
            "image/jpeg" | "image/jpg" => Some(ImageMediaType::Jpeg),
            "image/webp" => Some(ImageMediaType::Webp),
            _ => None,
        }
    }

    /// Canonical MIME type
    pub fn mime(&self) -> &'static str {
        match self {
            ImageMediaType::Png => "image/png",
            ImageMediaType::Jpeg => "image/jpeg",
            ImageMediaType::Webp => "image/webp",
        }
    }
}

/// Supported document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentMediaType {
    /// `application/pdf`
    Pdf,
}

impl DocumentMediaType {
    /// Parse a declared MIME type
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "application/pdf" => Some(DocumentMediaType::Pdf),
            _ => None,
        }
    }

    /// Canonical MIME type
    pub fn mime(&self) -> &'static str {
        match self {
            DocumentMediaType::Pdf => "application/pdf",
        }
    }
}

/// An accepted upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadedArtifact {
    /// Photo or scan of a menu
    Image {
        /// Image format
        media_type: ImageMediaType,
        /// Raw bytes
        data: Vec<u8>,
    },
    /// Menu document
    Document {
        /// Document format
        media_type: DocumentMediaType,
        /// Raw bytes
        data: Vec<u8>,
    },
}

fn check_size(data: &[u8], max_bytes: usize) -> Result<(), ExtractorError> {
    if data.len() > max_bytes {
        return Err(ExtractorError::ArtifactTooLarge {
            size: data.len(),
            max: max_bytes,
        });
    }
    Ok(())
}

impl UploadedArtifact {
    /// Accept an image upload
    ///
    /// # Errors
    ///
    /// Returns error if the declared type is not png, jpeg or webp, or the
    /// data exceeds `max_bytes`
    pub fn image(declared_type: &str, data: Vec<u8>, max_bytes: usize) -> Result<Self, ExtractorError> {
        let media_type = ImageMediaType::from_mime(declared_type)
            .ok_or_else(|| ExtractorError::UnsupportedMediaType(declared_type.to_string()))?;
        check_size(&data, max_bytes)?;
        Ok(UploadedArtifact::Image { media_type, data })
    }

    /// Accept a document upload
    ///
    /// # Errors
    ///
    /// Returns error if the declared type is not PDF, or the data exceeds
    /// `max_bytes`
    pub fn document(declared_type: &str, data: Vec<u8>, max_bytes: usize) -> Result<Self, ExtractorError> {
        let media_type = DocumentMediaType::from_mime(declared_type)
            .ok_or_else(|| ExtractorError::UnsupportedMediaType(declared_type.to_string()))?;
        check_size(&data, max_bytes)?;
        Ok(UploadedArtifact::Document { media_type, data })
    }

    /// Short name of the artifact kind, for messages
    pub fn kind(&self) -> &'static str {
        match self {
            UploadedArtifact::Image { .. } => "image",
            UploadedArtifact::Document { .. } => "PDF",
        }
    }

    /// Size in bytes
    pub fn len(&self) -> usize {
        self.data().len()
    }

    /// Whether the upload is empty
    pub fn is_empty(&self) -> bool {
        self.data().is_empty()
    }

    /// Raw bytes
    pub fn data(&self) -> &[u8] {
        match self {
            UploadedArtifact::Image { data, .. } | UploadedArtifact::Document { data, .. } => data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_types() {
        assert_eq!(ImageMediaType::from_mime("image/PNG"), Some(ImageMediaType::Png));
        assert_eq!(ImageMediaType::from_mime("image/jpg"), Some(ImageMediaType::Jpeg));
        assert_eq!(ImageMediaType::from_mime("image/webp"), Some(ImageMediaType::Webp));
        assert_eq!(ImageMediaType::from_mime("image/gif"), None);
        assert_eq!(ImageMediaType::Jpeg.mime(), "image/jpeg");
    }

    #[test]
    fn test_accepts_supported_uploads() {
        let image = UploadedArtifact::image("image/png", vec![1, 2, 3], 10).unwrap();
        assert_eq!(image.kind(), "image");
        assert_eq!(image.len(), 3);

        let pdf = UploadedArtifact::document("application/pdf", vec![1], 10).unwrap();
        assert_eq!(pdf.kind(), "PDF");
    }

    #[test]
    fn test_rejects_unsupported_type() {
        let result = UploadedArtifact::image("image/gif", vec![1], 10);
        assert!(matches!(result, Err(ExtractorError::UnsupportedMediaType(t)) if t == "image/gif"));

        let result = UploadedArtifact::document("image/png", vec![1], 10);
        assert!(matches!(result, Err(ExtractorError::UnsupportedMediaType(_))));
    }

    #[test]
    fn test_size_ceiling_is_inclusive() {
        assert!(UploadedArtifact::image("image/webp", vec![0; 10], 10).is_ok());
        let result = UploadedArtifact::image("image/webp", vec![0; 11], 10);
        assert!(matches!(
            result,
            Err(ExtractorError::ArtifactTooLarge { size: 11, max: 10 })
        ));
    }
}
