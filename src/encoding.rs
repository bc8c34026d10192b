//! Text encodings for report files
//!
//! Ad platform exports are commonly UTF-16LE ("Unicode text"), which is what
//! the reports this tool was built for use. UTF-8 is accepted as well.

use crate::error::ReportError;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
const UTF16LE_BOM: [u8; 2] = [0xFF, 0xFE];

/// Supported report encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    Utf8,
    Utf16le,
}

impl Encoding {
    /// Guess the encoding of raw report bytes
    ///
    /// BOMs win. Without one, an even-length buffer whose second byte is NUL
    /// is taken as UTF-16LE (ASCII header text), anything else as UTF-8.
    pub fn detect(bytes: &[u8]) -> Self {
        if bytes.starts_with(&UTF16LE_BOM) {
            return Encoding::Utf16le;
        }
        if bytes.starts_with(&UTF8_BOM) {
            return Encoding::Utf8;
        }
        if bytes.len() >= 2 && bytes.len() % 2 == 0 && bytes[1] == 0 {
            return Encoding::Utf16le;
        }
        Encoding::Utf8
    }

    /// Decode bytes to text, dropping a leading BOM
    pub fn decode(&self, bytes: &[u8]) -> Result<String, ReportError> {
        match self {
            Encoding::Utf8 => {
                let body = bytes.strip_prefix(&UTF8_BOM).unwrap_or(bytes);
                String::from_utf8(body.to_vec())
                    .map_err(|e| ReportError::Encoding(format!("invalid UTF-8: {}", e)))
            }
            Encoding::Utf16le => {
                let body = bytes.strip_prefix(&UTF16LE_BOM).unwrap_or(bytes);
                if body.len() % 2 != 0 {
                    return Err(ReportError::Encoding(format!(
                        "UTF-16LE input has odd length {}",
                        body.len()
                    )));
                }
                let units: Vec<u16> = body
                    .chunks_exact(2)
                    .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                    .collect();
                String::from_utf16(&units)
                    .map_err(|e| ReportError::Encoding(format!("invalid UTF-16LE: {}", e)))
            }
        }
    }

    /// Encode text without a BOM
    pub fn encode(&self, text: &str) -> Vec<u8> {
        match self {
            Encoding::Utf8 => text.as_bytes().to_vec(),
            Encoding::Utf16le => text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
        }
    }
}
