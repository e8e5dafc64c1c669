//! CSV encoding with RFC 4180-like behavior
//!
//! The counterpart to the parser: records encoded here and parsed back with
//! the same separator/quote/escape configuration reproduce the original
//! values.

/// CSV encoder for writing properly formatted CSV data
pub struct CsvEncoder {
    separator: u8,
    quote: u8,
    escape: u8,
}

impl CsvEncoder {
    /// Create an encoder; the escape byte defaults to the quote byte
    pub fn new(separator: u8, quote: u8) -> Self {
        Self {
            separator,
            quote,
            escape: quote,
        }
    }

    /// Create an encoder with a distinct escape byte
    pub fn with_escape(separator: u8, quote: u8, escape: u8) -> Self {
        Self {
            separator,
            quote,
            escape,
        }
    }

    /// Encode an entire row into the buffer, without a line terminator
    pub fn encode_row(&self, fields: &[&str], buffer: &mut Vec<u8>) {
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                buffer.push(self.separator);
            }
            self.encode_field(field, buffer);
        }
    }

    /// Encode a row and terminate it with a newline
    pub fn encode_line(&self, fields: &[&str], buffer: &mut Vec<u8>) {
        self.encode_row(fields, buffer);
        buffer.push(b'\n');
    }

    /// Encode single field with proper quoting/escaping
    fn encode_field(&self, field: &str, buffer: &mut Vec<u8>) {
        if self.needs_quoting(field) {
            buffer.push(self.quote);
            for byte in field.bytes() {
                if byte == self.quote {
                    buffer.push(self.escape);
                    buffer.push(self.quote);
                } else {
                    buffer.push(byte);
                }
            }
            buffer.push(self.quote);
        } else {
            buffer.extend_from_slice(field.as_bytes());
        }
    }

    /// Check if field requires quoting
    fn needs_quoting(&self, field: &str) -> bool {
        field
            .bytes()
            .any(|b| b == self.separator || b == self.quote || b == b'\n' || b == b'\r')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_fields() {
        let encoder = CsvEncoder::new(b',', b'"');
        let mut buffer = Vec::new();
        encoder.encode_row(&["a", "b", "c"], &mut buffer);
        assert_eq!(String::from_utf8(buffer).unwrap(), "a,b,c");
    }

    #[test]
    fn test_quoted_fields() {
        let encoder = CsvEncoder::new(b',', b'"');
        let mut buffer = Vec::new();
        encoder.encode_row(&["a,b", "c"], &mut buffer);
        assert_eq!(String::from_utf8(buffer).unwrap(), r#""a,b",c"#);
    }

    #[test]
    fn test_escaped_quotes() {
        let encoder = CsvEncoder::new(b',', b'"');
        let mut buffer = Vec::new();
        encoder.encode_row(&[r#"Say "Hello""#, "world"], &mut buffer);
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            r#""Say ""Hello""",world"#
        );
    }

    #[test]
    fn test_custom_escape_byte() {
        let encoder = CsvEncoder::with_escape(b',', b'"', b'\\');
        let mut buffer = Vec::new();
        encoder.encode_row(&[r#"a"b"#], &mut buffer);
        assert_eq!(String::from_utf8(buffer).unwrap(), r#""a\"b""#);
    }

    #[test]
    fn test_newlines() {
        let encoder = CsvEncoder::new(b',', b'"');
        let mut buffer = Vec::new();
        encoder.encode_row(&["Line 1\nLine 2", "normal"], &mut buffer);
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "\"Line 1\nLine 2\",normal"
        );
    }

    #[test]
    fn test_empty_fields() {
        let encoder = CsvEncoder::new(b',', b'"');
        let mut buffer = Vec::new();
        encoder.encode_row(&["a", "", "c"], &mut buffer);
        assert_eq!(String::from_utf8(buffer).unwrap(), "a,,c");
    }

    #[test]
    fn test_encode_line_terminates() {
        let encoder = CsvEncoder::new(b',', b'"');
        let mut buffer = Vec::new();
        encoder.encode_line(&["a", "b"], &mut buffer);
        assert_eq!(String::from_utf8(buffer).unwrap(), "a,b\n");
    }

    #[test]
    fn test_custom_delimiter() {
        let encoder = CsvEncoder::new(b';', b'"');
        let mut buffer = Vec::new();
        encoder.encode_row(&["a", "b;c", "d"], &mut buffer);
        assert_eq!(String::from_utf8(buffer).unwrap(), r#"a;"b;c";d"#);
    }
}
