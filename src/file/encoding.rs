//! テキストエンコーディング
//!
//! 読み込み時のデコードと保存時のエンコードを提供する。

use crate::error::{file::Result, FileError};
use std::fmt;
use std::str::FromStr;

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// 対応エンコーディング
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    /// UTF-8（BOM は通常の文字として扱う）
    #[default]
    Utf8,
    /// BOM 付き UTF-8
    Utf8Bom,
    /// ISO-8859-1
    Latin1,
}

impl TextEncoding {
    pub fn name(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Utf8Bom => "utf-8-bom",
            TextEncoding::Latin1 => "latin1",
        }
    }

    /// バイト列を文字列へ
    pub fn decode(self, bytes: &[u8]) -> Result<String> {
        match self {
            TextEncoding::Utf8 => decode_utf8(bytes),
            TextEncoding::Utf8Bom => {
                decode_utf8(bytes.strip_prefix(&UTF8_BOM[..]).unwrap_or(bytes))
            }
            TextEncoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
        }
    }

    /// 文字列をバイト列へ
    pub fn encode(self, text: &str) -> Result<Vec<u8>> {
        match self {
            TextEncoding::Utf8 => Ok(text.as_bytes().to_vec()),
            TextEncoding::Utf8Bom => {
                let mut bytes = Vec::with_capacity(text.len() + UTF8_BOM.len());
                bytes.extend_from_slice(&UTF8_BOM);
                bytes.extend_from_slice(text.as_bytes());
                Ok(bytes)
            }
            TextEncoding::Latin1 => text
                .chars()
                .enumerate()
                .map(|(pos, ch)| {
                    u8::try_from(u32::from(ch)).map_err(|_| FileError::Encoding {
                        message: format!(
                            "character {:?} at offset {} cannot be represented in latin1",
                            ch, pos
                        ),
                    })
                })
                .collect(),
        }
    }
}

fn decode_utf8(bytes: &[u8]) -> Result<String> {
    String::from_utf8(bytes.to_vec()).map_err(|err| FileError::Encoding {
        message: format!(
            "invalid utf-8 at byte {}",
            err.utf8_error().valid_up_to()
        ),
    })
}

impl FromStr for TextEncoding {
    type Err = FileError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(TextEncoding::Utf8),
            "utf8bom" | "utf-8-bom" | "utf8-bom" => Ok(TextEncoding::Utf8Bom),
            "latin1" | "latin-1" | "iso-8859-1" | "iso8859-1" => Ok(TextEncoding::Latin1),
            _ => Err(FileError::UnknownEncoding {
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_keeps_bom_as_text() {
        let bytes = [0xEF, 0xBB, 0xBF, b'a'];
        assert_eq!(TextEncoding::Utf8.decode(&bytes).unwrap(), "\u{FEFF}a");
        assert_eq!(TextEncoding::Utf8Bom.decode(&bytes).unwrap(), "a");
    }

    #[test]
    fn utf8_bom_writes_marker() {
        let bytes = TextEncoding::Utf8Bom.encode("a").unwrap();
        assert_eq!(bytes, vec![0xEF, 0xBB, 0xBF, b'a']);
    }

    #[test]
    fn invalid_utf8_is_encoding_error() {
        let err = TextEncoding::Utf8.decode(&[b'a', 0xff]).unwrap_err();
        assert!(matches!(err, FileError::Encoding { .. }));
    }

    #[test]
    fn latin1_maps_bytes_to_code_points() {
        assert_eq!(TextEncoding::Latin1.decode(&[0x63, 0xE9]).unwrap(), "cé");
        assert_eq!(TextEncoding::Latin1.encode("cé").unwrap(), vec![0x63, 0xE9]);
        assert!(TextEncoding::Latin1.encode("日").is_err());
    }

    #[test]
    fn parses_names() {
        assert_eq!("UTF-8".parse::<TextEncoding>().unwrap(), TextEncoding::Utf8);
        assert_eq!("iso-8859-1".parse::<TextEncoding>().unwrap(), TextEncoding::Latin1);
        assert!("ebcdic".parse::<TextEncoding>().is_err());
    }
}
