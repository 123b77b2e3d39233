//! DXF group code/value pair reading

use crate::error::{PreviewError, Result};
use encoding_rs::Encoding;
use std::io::{BufReader, Read};

/// A DXF code/value pair
#[derive(Debug, Clone)]
pub struct CodePair {
    /// The DXF group code
    pub code: i32,
    /// String representation of the value
    pub value: String,
}

impl CodePair {
    /// Create a new code/value pair
    pub fn new(code: i32, value: String) -> Self {
        Self { code, value }
    }

    /// Get value as string
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Get value as double
    pub fn as_double(&self) -> Option<f64> {
        self.value.trim().parse::<f64>().ok()
    }

    /// Get value as i16
    pub fn as_i16(&self) -> Option<i16> {
        self.value.trim().parse::<i16>().ok()
    }

    /// Get value as i32
    pub fn as_i32(&self) -> Option<i32> {
        self.value.trim().parse::<i32>().ok()
    }
}

/// Reads DXF code/value pairs from a byte stream
///
/// Lines that are not valid UTF-8 decode through the configured
/// encoding, or Latin-1 (byte-to-char) when none is set.
pub struct PairReader<R: Read> {
    reader: BufReader<R>,
    line_number: usize,
    peeked_pair: Option<CodePair>,
    encoding: Option<&'static Encoding>,
}

impl<R: Read> PairReader<R> {
    /// Create a new pair reader
    pub fn new(reader: BufReader<R>) -> Self {
        Self {
            reader,
            line_number: 0,
            peeked_pair: None,
            encoding: None,
        }
    }

    /// Set the non-UTF8 fallback encoding
    pub fn set_encoding(&mut self, encoding: &'static Encoding) {
        self.encoding = Some(encoding);
    }

    /// Current line number (1-based), for diagnostics
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Read a single line, handling non-UTF8 bytes gracefully
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut bytes = Vec::new();

        loop {
            let mut byte = [0u8; 1];
            match self.reader.read(&mut byte) {
                Ok(0) => {
                    if bytes.is_empty() {
                        return Ok(None);
                    }
                    break;
                }
                Ok(_) => {
                    if byte[0] == b'\n' {
                        break;
                    }
                    bytes.push(byte[0]);
                }
                Err(e) => return Err(e.into()),
            }
        }

        self.line_number += 1;

        // Try UTF-8 first, then the configured encoding, then Latin-1.
        let mut line = match String::from_utf8(bytes.clone()) {
            Ok(s) => s,
            Err(_) => {
                if let Some(enc) = self.encoding {
                    let (decoded, _, _) = enc.decode(&bytes);
                    decoded.into_owned()
                } else {
                    // Latin-1 maps bytes 0-255 straight to code points.
                    bytes.iter().map(|&b| b as char).collect()
                }
            }
        };

        // Strip only the line terminator. Boundary whitespace in string
        // values is significant (MTEXT chunks, padded text); numeric
        // accessors trim for themselves.
        if line.ends_with('\r') {
            line.pop();
        }

        Ok(Some(line))
    }

    fn read_pair_internal(&mut self) -> Result<Option<CodePair>> {
        let code_line = match self.read_line()? {
            Some(line) => line,
            None => return Ok(None),
        };

        let code = code_line.trim().parse::<i32>().map_err(|_| {
            PreviewError::ParseCorrupted(format!(
                "invalid group code at line {}: '{}'",
                self.line_number, code_line
            ))
        })?;

        let value_line = match self.read_line()? {
            Some(line) => line,
            None => {
                return Err(PreviewError::ParseCorrupted(format!(
                    "unexpected EOF after code {} at line {}",
                    code, self.line_number
                )))
            }
        };

        Ok(Some(CodePair::new(code, process_string_value(&value_line))))
    }

    /// Read the next code/value pair
    pub fn read_pair(&mut self) -> Result<Option<CodePair>> {
        if let Some(pair) = self.peeked_pair.take() {
            return Ok(Some(pair));
        }
        self.read_pair_internal()
    }

    /// Peek at the next code without consuming the pair
    pub fn peek_code(&mut self) -> Result<Option<i32>> {
        if let Some(ref pair) = self.peeked_pair {
            return Ok(Some(pair.code));
        }
        if let Some(pair) = self.read_pair_internal()? {
            let code = pair.code;
            self.peeked_pair = Some(pair);
            Ok(Some(code))
        } else {
            Ok(None)
        }
    }

    /// Push a pair back to be read again on the next read_pair call
    pub fn push_back(&mut self, pair: CodePair) {
        self.peeked_pair = Some(pair);
    }
}

/// Expand DXF caret escapes in string values
fn process_string_value(value: &str) -> String {
    value
        .replace("^J", "\n")
        .replace("^M", "\r")
        .replace("^I", "\t")
        .replace("^ ", "^")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn reader_for(data: &str) -> PairReader<Cursor<Vec<u8>>> {
        PairReader::new(BufReader::new(Cursor::new(data.as_bytes().to_vec())))
    }

    #[test]
    fn test_read_simple_pair() {
        let mut reader = reader_for("0\nSECTION\n");
        let pair = reader.read_pair().unwrap().unwrap();
        assert_eq!(pair.code, 0);
        assert_eq!(pair.value, "SECTION");
    }

    #[test]
    fn test_read_numeric_pairs() {
        let mut reader = reader_for("70\n42\n10\n123.456\n");
        let pair = reader.read_pair().unwrap().unwrap();
        assert_eq!(pair.as_i16(), Some(42));
        let pair = reader.read_pair().unwrap().unwrap();
        assert_eq!(pair.as_double(), Some(123.456));
    }

    #[test]
    fn test_peek_and_push_back() {
        let mut reader = reader_for("0\nSECTION\n2\nHEADER\n");
        assert_eq!(reader.peek_code().unwrap(), Some(0));

        let pair = reader.read_pair().unwrap().unwrap();
        assert_eq!(pair.code, 0);

        reader.push_back(pair);
        let pair = reader.read_pair().unwrap().unwrap();
        assert_eq!(pair.value, "SECTION");

        assert_eq!(reader.peek_code().unwrap(), Some(2));
    }

    #[test]
    fn test_non_numeric_code_is_corrupt() {
        let mut reader = reader_for("NOTACODE\nvalue\n");
        let err = reader.read_pair().unwrap_err();
        assert!(matches!(err, PreviewError::ParseCorrupted(_)));
    }

    #[test]
    fn test_eof_after_code_is_corrupt() {
        let mut reader = reader_for("0");
        let err = reader.read_pair().unwrap_err();
        assert!(matches!(err, PreviewError::ParseCorrupted(_)));
    }

    #[test]
    fn test_special_characters() {
        let mut reader = reader_for("1\nLine1^JLine2^MLine3\n");
        let pair = reader.read_pair().unwrap().unwrap();
        assert_eq!(pair.value, "Line1\nLine2\rLine3");
    }

    #[test]
    fn test_latin1_fallback() {
        let mut bytes = b"2\n".to_vec();
        bytes.push(0xD6); // 'Ö' in Latin-1, invalid on its own in UTF-8
        bytes.push(b'\n');
        let mut reader = PairReader::new(BufReader::new(Cursor::new(bytes)));
        let pair = reader.read_pair().unwrap().unwrap();
        assert_eq!(pair.value, "\u{00D6}");
    }

    #[test]
    fn test_value_whitespace_preserved() {
        let mut reader = reader_for("1\n  padded value \n3\nchunk \n");
        let pair = reader.read_pair().unwrap().unwrap();
        assert_eq!(pair.value, "  padded value ");
        let pair = reader.read_pair().unwrap().unwrap();
        assert_eq!(pair.value, "chunk ");
    }

    #[test]
    fn test_crlf_lines() {
        let mut reader = reader_for("0\r\nLINE\r\n");
        let pair = reader.read_pair().unwrap().unwrap();
        assert_eq!(pair.value, "LINE");
    }
}
