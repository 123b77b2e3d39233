//! DXF document reader: section framing and dispatch

use crate::document::DrawingDocument;
use crate::error::{PreviewError, Result};
use crate::io::dxf::entity_reader::EntityReader;
use crate::io::dxf::pair::PairReader;
use encoding_rs::Encoding;
use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::Path;
use tracing::debug;

/// DXF text reader producing a [`DrawingDocument`]
pub struct DxfReader<R: Read> {
    reader: PairReader<R>,
}

impl DxfReader<File> {
    /// Create a reader from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self {
            reader: PairReader::new(BufReader::new(file)),
        })
    }
}

impl DxfReader<Cursor<Vec<u8>>> {
    /// Create a reader over in-memory DXF text
    pub fn from_str(text: &str) -> Self {
        Self {
            reader: PairReader::new(BufReader::new(Cursor::new(text.as_bytes().to_vec()))),
        }
    }
}

/// Parse DXF text directly into a document
pub fn parse_str(text: &str) -> Result<DrawingDocument> {
    DxfReader::from_str(text).read()
}

impl<R: Read> DxfReader<R> {
    /// Create a reader from any byte source
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader: PairReader::new(BufReader::new(reader)),
        }
    }

    /// Read the stream and return the extracted document.
    ///
    /// Broken section framing (a SECTION without a name, or end of
    /// input inside a section) is [`PreviewError::ParseCorrupted`];
    /// unrecognized entities and sections are skipped and counted, not
    /// errors.
    pub fn read(mut self) -> Result<DrawingDocument> {
        let mut document = DrawingDocument::new();

        while let Some(pair) = self.reader.read_pair()? {
            if pair.code != 0 {
                continue;
            }
            match pair.value.as_str() {
                "SECTION" => {
                    let name_pair = self.reader.read_pair()?.ok_or_else(|| {
                        PreviewError::ParseCorrupted("SECTION without a name".to_string())
                    })?;
                    if name_pair.code != 2 {
                        return Err(PreviewError::ParseCorrupted(format!(
                            "expected section name (code 2), got code {}",
                            name_pair.code
                        )));
                    }

                    match name_pair.value.as_str() {
                        "HEADER" => self.read_header()?,
                        "TABLES" => {
                            EntityReader::new(&mut self.reader).read_tables(&mut document)?
                        }
                        "BLOCKS" => {
                            EntityReader::new(&mut self.reader).read_blocks(&mut document)?
                        }
                        "ENTITIES" => {
                            EntityReader::new(&mut self.reader).read_entities(&mut document)?
                        }
                        other => {
                            debug!(section = other, "skipping section");
                            self.skip_section(other)?;
                        }
                    }
                }
                "EOF" => break,
                _ => {}
            }
        }

        if !document.skipped.is_empty() {
            debug!(
                skipped = document.skipped_total(),
                kinds = document.skipped.len(),
                "unrecognized entities skipped"
            );
        }

        Ok(document)
    }

    /// Scan the HEADER section for $DWGCODEPAGE so pre-2007 files with
    /// national code pages decode correctly.
    fn read_header(&mut self) -> Result<()> {
        loop {
            let pair = self.reader.read_pair()?.ok_or_else(|| {
                PreviewError::ParseCorrupted("unexpected end of input in HEADER section".to_string())
            })?;
            if pair.code == 0 && pair.value == "ENDSEC" {
                return Ok(());
            }
            if pair.code == 9 && pair.value == "$DWGCODEPAGE" {
                if let Some(cp) = self.reader.read_pair()? {
                    if cp.code == 3 {
                        if let Some(enc) = encoding_from_code_page(&cp.value) {
                            self.reader.set_encoding(enc);
                        }
                    } else {
                        self.reader.push_back(cp);
                    }
                }
            }
        }
    }

    /// Skip a section body up to and including ENDSEC
    fn skip_section(&mut self, name: &str) -> Result<()> {
        loop {
            let pair = self.reader.read_pair()?.ok_or_else(|| {
                PreviewError::ParseCorrupted(format!(
                    "unexpected end of input in {} section",
                    name
                ))
            })?;
            if pair.code == 0 && pair.value == "ENDSEC" {
                return Ok(());
            }
        }
    }
}

/// Map a DXF $DWGCODEPAGE value to an encoding
fn encoding_from_code_page(code_page: &str) -> Option<&'static Encoding> {
    match code_page.to_uppercase().as_str() {
        "ANSI_1250" => Some(encoding_rs::WINDOWS_1250),
        "ANSI_1251" => Some(encoding_rs::WINDOWS_1251),
        "ANSI_1252" => Some(encoding_rs::WINDOWS_1252),
        "ANSI_1254" => Some(encoding_rs::WINDOWS_1254),
        "ANSI_932" | "DOS932" => Some(encoding_rs::SHIFT_JIS),
        "ANSI_936" | "GB2312" => Some(encoding_rs::GBK),
        "ANSI_949" => Some(encoding_rs::EUC_KR),
        "ANSI_950" | "BIG5" => Some(encoding_rs::BIG5),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dxf(body: &str) -> String {
        format!("0\nSECTION\n2\nENTITIES\n{}0\nENDSEC\n0\nEOF\n", body)
    }

    #[test]
    fn test_empty_document() {
        let doc = parse_str("0\nEOF\n").unwrap();
        assert!(doc.entities.is_empty());
        assert!(doc.layers.contains("0"));
    }

    #[test]
    fn test_line_extraction() {
        let text = dxf("0\nLINE\n8\nWalls\n10\n1.0\n20\n2.0\n11\n3.0\n21\n4.0\n");
        let doc = parse_str(&text).unwrap();
        assert_eq!(doc.entities.len(), 1);
        assert_eq!(doc.entities[0].layer, "Walls");
    }

    #[test]
    fn test_section_without_name_is_corrupt() {
        let err = parse_str("0\nSECTION\n").unwrap_err();
        assert!(matches!(err, PreviewError::ParseCorrupted(_)));
    }

    #[test]
    fn test_truncated_section_is_corrupt() {
        let err = parse_str("0\nSECTION\n2\nENTITIES\n0\nLINE\n").unwrap_err();
        assert!(matches!(err, PreviewError::ParseCorrupted(_)));
    }

    #[test]
    fn test_unknown_section_skipped() {
        let text = "0\nSECTION\n2\nOBJECTS\n0\nDICTIONARY\n0\nENDSEC\n0\nEOF\n";
        let doc = parse_str(text).unwrap();
        assert!(doc.entities.is_empty());
    }

    #[test]
    fn test_code_page_mapping() {
        assert!(encoding_from_code_page("ansi_1252").is_some());
        assert!(encoding_from_code_page("ANSI_936").is_some());
        assert!(encoding_from_code_page("UNKNOWN_CP").is_none());
    }
}
