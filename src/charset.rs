use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{HbscError, Result};

/// Encoding used to read template sources and write compiled output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Charset {
    #[default]
    Utf8,
    Latin1,
}

impl Charset {
    pub fn name(self) -> &'static str {
        match self {
            Charset::Utf8 => "utf-8",
            Charset::Latin1 => "latin1",
        }
    }

    pub fn decode(self, bytes: Vec<u8>, path: &Path) -> Result<String> {
        match self {
            Charset::Utf8 => String::from_utf8(bytes).map_err(|_| HbscError::Encoding {
                action: "decode",
                path: path.to_path_buf(),
                charset: self.name(),
            }),
            Charset::Latin1 => Ok(bytes.into_iter().map(char::from).collect()),
        }
    }

    pub fn encode(self, text: &str, path: &Path) -> Result<Vec<u8>> {
        match self {
            Charset::Utf8 => Ok(text.as_bytes().to_vec()),
            Charset::Latin1 => text
                .chars()
                .map(|c| u8::try_from(c).ok())
                .collect::<Option<Vec<u8>>>()
                .ok_or_else(|| HbscError::Encoding {
                    action: "encode",
                    path: path.to_path_buf(),
                    charset: self.name(),
                }),
        }
    }

    /// Read a file and decode it with this charset.
    pub fn read(self, path: &Path) -> Result<String> {
        let bytes = std::fs::read(path).map_err(|e| HbscError::Io {
            context: format!("reading {}", path.display()),
            source: e,
        })?;
        self.decode(bytes, path)
    }
}

impl FromStr for Charset {
    type Err = HbscError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Charset::Utf8),
            "latin1" | "latin-1" | "iso-8859-1" | "iso8859-1" => Ok(Charset::Latin1),
            _ => Err(HbscError::UnsupportedCharset {
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
