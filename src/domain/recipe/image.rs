// src/domain/recipe/image.rs
//
// Recipe photos travel as encoded bytes inside the recipe record.
// Nothing here re-encodes pixels; the UI hands over compressed bytes and
// gets them back, with the format recognised from the file signature.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Jpeg,
    Png,
    Heic,
    WebP,
}

/// A borrowed view over a recognised image payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecipeImage<'a> {
    pub format: ImageFormat,
    pub bytes: &'a [u8],
}

const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];
const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
const HEIF_BRANDS: &[&[u8]] = &[b"heic", b"heix", b"heim", b"heis", b"mif1", b"msf1"];

impl<'a> RecipeImage<'a> {
    /// Recognises the payload format. Returns `None` for anything that is not
    /// a supported encoded image.
    pub fn decode(bytes: &'a [u8]) -> Option<Self> {
        let format = sniff_format(bytes)?;
        Some(Self { format, bytes })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

fn sniff_format(bytes: &[u8]) -> Option<ImageFormat> {
    if bytes.starts_with(JPEG_MAGIC) {
        return Some(ImageFormat::Jpeg);
    }
    if bytes.starts_with(PNG_MAGIC) {
        return Some(ImageFormat::Png);
    }
    if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        return Some(ImageFormat::WebP);
    }
    if bytes.len() >= 12 && &bytes[4..8] == b"ftyp" && HEIF_BRANDS.contains(&&bytes[8..12]) {
        return Some(ImageFormat::Heic);
    }
    None
}

/// Serde adapter storing `Option<Vec<u8>>` as a base64 string.
pub(crate) mod base64_payload {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(bytes) => serializer.serialize_some(&STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded: Option<String> = Option::deserialize(deserializer)?;
        encoded
            .map(|text| STANDARD.decode(text.as_bytes()).map_err(serde::de::Error::custom))
            .transpose()
    }
}
