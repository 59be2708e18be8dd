use base64::{
    alphabet,
    engine::{general_purpose::STANDARD, DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine,
};
use derive_more::Display;
use once_cell::sync::Lazy;
use regex::Regex;

/// Mime type stamped on every image read back from storage.
pub const STORED_IMAGE_MIME: &str = "image/jpeg";

static IMAGE_DATA_URI_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^data:image/[A-Za-z0-9_]+;base64,").expect("image data URI pattern is valid")
});

// Browsers emit padded base64, but older clients strip it.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

#[derive(Debug, Display, PartialEq)]
pub enum DataUriError {
    #[display("Value is not a data:image/<type>;base64 URI")]
    InvalidPrefix,

    #[display("Invalid base64 payload: {_0}")]
    InvalidPayload(String),
}

/// Strips the `data:image/<subtype>;base64,` prefix and decodes the payload.
/// The subtype is discarded.
pub fn decode_image_data_uri(value: &str) -> Result<Vec<u8>, DataUriError> {
    let prefix = IMAGE_DATA_URI_PREFIX
        .find(value)
        .ok_or(DataUriError::InvalidPrefix)?;

    let payload: String = value[prefix.end()..]
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    LENIENT_BASE64
        .decode(payload)
        .map_err(|e| DataUriError::InvalidPayload(e.to_string()))
}

pub fn encode_image_data_uri(bytes: &[u8]) -> String {
    format!("data:{};base64,{}", STORED_IMAGE_MIME, STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 4] = [0x89, 0x50, 0x4E, 0x47];

    #[test]
    fn decodes_png_payload() {
        let bytes = decode_image_data_uri("data:image/png;base64,iVBORw==").unwrap();
        assert_eq!(bytes, PNG_MAGIC);
    }

    #[test]
    fn accepts_unpadded_and_wrapped_payloads() {
        assert_eq!(decode_image_data_uri("data:image/png;base64,iVBORw").unwrap(), PNG_MAGIC);
        assert_eq!(
            decode_image_data_uri("data:image/png;base64,iVBO\nRw==").unwrap(),
            PNG_MAGIC
        );
    }

    #[test]
    fn rejects_non_image_uris() {
        assert_eq!(
            decode_image_data_uri("data:text/plain;base64,aGVsbG8="),
            Err(DataUriError::InvalidPrefix)
        );
        assert_eq!(
            decode_image_data_uri("https://example.com/cat.png"),
            Err(DataUriError::InvalidPrefix)
        );
        // subtypes outside [A-Za-z0-9_] never matched upstream either
        assert_eq!(
            decode_image_data_uri("data:image/svg+xml;base64,PHN2Zz4="),
            Err(DataUriError::InvalidPrefix)
        );
    }

    #[test]
    fn rejects_garbage_payload() {
        let err = decode_image_data_uri("data:image/png;base64,@@@@").unwrap_err();
        assert!(matches!(err, DataUriError::InvalidPayload(_)));
    }

    #[test]
    fn reads_back_as_jpeg_regardless_of_uploaded_subtype() {
        let bytes = decode_image_data_uri("data:image/png;base64,iVBORw==").unwrap();
        assert_eq!(encode_image_data_uri(&bytes), "data:image/jpeg;base64,iVBORw==");
    }

    #[test]
    fn empty_image_still_encodes() {
        assert_eq!(encode_image_data_uri(&[]), "data:image/jpeg;base64,");
    }
}
