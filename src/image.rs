// src/image.rs
//! Profile pictures and project screenshots are stored inline as `data:` URLs.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

const PNG_SIGNATURE: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
const JPEG_SIGNATURE: &[u8] = &[0xFF, 0xD8, 0xFF];

/// Upper bound on uploaded image size.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Png,
    Jpeg,
}

impl ImageKind {
    pub fn mime(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }

    fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "image/png" => Some(Self::Png),
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Image is empty")]
    Empty,

    #[error("Image is {0} bytes, larger than the allowed size")]
    TooLarge(usize),

    #[error("Unsupported image format - use PNG or JPEG only")]
    WrongFormat,

    #[error("Not a base64 image data URL")]
    MalformedDataUrl,

    #[error("Image payload is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),
}

impl ImageError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Empty => "IMAGE_EMPTY",
            Self::TooLarge(_) => "IMAGE_TOO_LARGE",
            Self::WrongFormat => "IMAGE_WRONG_FORMAT",
            Self::MalformedDataUrl | Self::Decode(_) => "IMAGE_CORRUPTED",
        }
    }
}

/// Identify the image by its leading bytes.
pub fn detect(bytes: &[u8]) -> Result<ImageKind, ImageError> {
    if bytes.is_empty() {
        return Err(ImageError::Empty);
    }
    if bytes.starts_with(PNG_SIGNATURE) {
        Ok(ImageKind::Png)
    } else if bytes.starts_with(JPEG_SIGNATURE) {
        Ok(ImageKind::Jpeg)
    } else {
        Err(ImageError::WrongFormat)
    }
}

pub fn to_data_url(bytes: &[u8]) -> Result<String, ImageError> {
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(ImageError::TooLarge(bytes.len()));
    }
    let kind = detect(bytes)?;
    Ok(format!("data:{};base64,{}", kind.mime(), STANDARD.encode(bytes)))
}

pub fn decode_data_url(url: &str) -> Result<(ImageKind, Vec<u8>), ImageError> {
    let rest = url
        .strip_prefix("data:")
        .ok_or(ImageError::MalformedDataUrl)?;
    let (mime, payload) = rest
        .split_once(";base64,")
        .ok_or(ImageError::MalformedDataUrl)?;
    let declared = ImageKind::from_mime(mime).ok_or(ImageError::WrongFormat)?;

    let bytes = STANDARD.decode(payload.trim())?;
    let actual = detect(&bytes)?;
    if actual != declared {
        return Err(ImageError::WrongFormat);
    }
    Ok((actual, bytes))
}
