use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use zstd::stream::read::Decoder as ZstdDecoder;

use super::error::BatchError;

pub type GameInput = Box<dyn BufRead>;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CompressionMode {
    Plain,
    Zstd,
}

impl CompressionMode {
    pub fn parse(raw: &str) -> Result<Self, BatchError> {
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(BatchError::Compression(
                "Invalid compression value ''. Supported values: 'zstd' or omitted.".to_string(),
            ));
        }

        if normalized.eq_ignore_ascii_case("zstd") {
            Ok(Self::Zstd)
        } else {
            Err(BatchError::Compression(format!(
                "Invalid compression value '{}'. Supported values: 'zstd' or omitted.",
                normalized
            )))
        }
    }

    /// Explicit choice wins; otherwise `.zst` inputs are decompressed.
    pub fn resolve(explicit: Option<&str>, path: &Path) -> Result<Self, BatchError> {
        match explicit {
            Some(raw) => Self::parse(raw),
            None => {
                let is_zst = path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("zst"));
                Ok(if is_zst { Self::Zstd } else { Self::Plain })
            }
        }
    }
}

pub fn open_input(path: &Path, compression: CompressionMode) -> Result<GameInput, BatchError> {
    if !path.exists() {
        return Err(BatchError::InputNotFound(path.to_path_buf()));
    }

    let file = File::open(path)?;

    match compression {
        CompressionMode::Plain => Ok(Box::new(BufReader::new(file))),
        CompressionMode::Zstd => ZstdDecoder::new(file)
            .map(|decoder| Box::new(BufReader::new(decoder)) as GameInput)
            .map_err(|e| {
                BatchError::Compression(format!(
                    "Failed to initialize zstd decoder for '{}': {}",
                    path.display(),
                    e
                ))
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};

    #[test]
    fn test_parse_compression_mode_zstd_case_insensitive() {
        assert_eq!(CompressionMode::parse("zstd").unwrap(), CompressionMode::Zstd);
        assert_eq!(CompressionMode::parse("ZsTd").unwrap(), CompressionMode::Zstd);
    }

    #[test]
    fn test_parse_compression_mode_rejects_empty_value() {
        let err = CompressionMode::parse("   ").unwrap_err().to_string();
        assert!(err.contains("Invalid compression value"));
    }

    #[test]
    fn test_parse_compression_mode_rejects_unsupported_value() {
        let err = CompressionMode::parse("gzip").unwrap_err().to_string();
        assert!(err.contains("Invalid compression value 'gzip'"));
    }

    #[test]
    fn test_resolve_from_extension() {
        assert_eq!(
            CompressionMode::resolve(None, Path::new("games.txt.zst")).unwrap(),
            CompressionMode::Zstd
        );
        assert_eq!(
            CompressionMode::resolve(None, Path::new("games.txt")).unwrap(),
            CompressionMode::Plain
        );
        assert_eq!(
            CompressionMode::resolve(Some("zstd"), Path::new("games.txt")).unwrap(),
            CompressionMode::Zstd
        );
    }

    #[test]
    fn test_open_missing_input() {
        let err = open_input(Path::new("/definitely/not/here.txt"), CompressionMode::Plain)
            .err()
            .unwrap();
        assert!(matches!(err, BatchError::InputNotFound(_)));
    }

    #[test]
    fn test_open_zstd_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("games.txt.zst");
        let compressed = zstd::stream::encode_all("1. e4 e5\n".as_bytes(), 0).unwrap();
        File::create(&path).unwrap().write_all(&compressed).unwrap();

        let mut text = String::new();
        open_input(&path, CompressionMode::Zstd)
            .unwrap()
            .read_to_string(&mut text)
            .unwrap();
        assert_eq!(text, "1. e4 e5\n");
    }
}
