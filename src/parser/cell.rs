//! Cell decoding: unquoting and escape-sequence collapsing

use crate::options::ResolvedOptions;
use crate::types::CellValue;
use std::borrow::Cow;

/// Decode one raw cell byte range into a value.
///
/// Symmetric surrounding quotes are stripped, then every `escape + quote`
/// pair collapses into a single literal quote. The common no-escape case
/// borrows the input without allocating.
pub(crate) fn decode(opts: &ResolvedOptions, cell: &[u8]) -> CellValue {
    let mut bytes = cell;
    if bytes.first() == Some(&opts.quote) && bytes.last() == Some(&opts.quote) {
        // A cell that is a single quote byte strips down to nothing.
        bytes = if bytes.len() == 1 {
            &[]
        } else {
            &bytes[1..bytes.len() - 1]
        };
    }

    let has_pair = bytes
        .windows(2)
        .any(|w| w[0] == opts.escape && w[1] == opts.quote);

    let compacted: Cow<'_, [u8]> = if has_pair {
        let mut out = Vec::with_capacity(bytes.len());
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] == opts.escape && i + 1 < bytes.len() && bytes[i + 1] == opts.quote {
                out.push(opts.quote);
                i += 2;
            } else {
                out.push(bytes[i]);
                i += 1;
            }
        }
        Cow::Owned(out)
    } else {
        Cow::Borrowed(bytes)
    };

    if opts.raw {
        CellValue::Raw(compacted.into_owned())
    } else {
        CellValue::Text(String::from_utf8_lossy(&compacted).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ParserOptions;

    fn opts() -> ResolvedOptions {
        ParserOptions::new().resolve().unwrap()
    }

    #[test]
    fn test_plain() {
        assert_eq!(decode(&opts(), b"hello"), CellValue::Text("hello".into()));
        assert_eq!(decode(&opts(), b""), CellValue::Text("".into()));
    }

    #[test]
    fn test_unquoting() {
        assert_eq!(decode(&opts(), b"\"a,b\""), CellValue::Text("a,b".into()));
        assert_eq!(decode(&opts(), b"\"\""), CellValue::Text("".into()));
    }

    #[test]
    fn test_single_quote_byte_strips_to_empty() {
        assert_eq!(decode(&opts(), b"\""), CellValue::Text("".into()));
    }

    #[test]
    fn test_escaped_quotes_collapse() {
        assert_eq!(
            decode(&opts(), b"\"Say \"\"Hi\"\"\""),
            CellValue::Text("Say \"Hi\"".into())
        );
    }

    #[test]
    fn test_backslash_escape() {
        let opts = ParserOptions::new().escape(b'\\').resolve().unwrap();
        assert_eq!(
            decode(&opts, b"\"a\\\"b\""),
            CellValue::Text("a\"b".into())
        );
        // A lone backslash is plain data.
        assert_eq!(decode(&opts, b"a\\b"), CellValue::Text("a\\b".into()));
    }

    #[test]
    fn test_raw_mode() {
        let opts = ParserOptions::new().raw(true).resolve().unwrap();
        assert_eq!(decode(&opts, b"\"x,y\""), CellValue::Raw(b"x,y".to_vec()));
    }

    #[test]
    fn test_invalid_utf8_is_lossy() {
        assert_eq!(
            decode(&opts(), &[b'a', 0xff, b'b']),
            CellValue::Text("a\u{fffd}b".into())
        );
    }

    #[test]
    fn test_multibyte_utf8() {
        assert_eq!(
            decode(&opts(), "héllo wörld".as_bytes()),
            CellValue::Text("héllo wörld".into())
        );
    }
}
