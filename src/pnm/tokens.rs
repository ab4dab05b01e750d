//! Whitespace/comment tokenizer shared by every Netpbm header and ASCII
//! payload parser.
//!
//! Whitespace is space, tab, CR, and LF. A `#` starts a comment that runs to
//! the end of the line; comments are discarded and always end the current
//! token. Two sources are provided and tokenize identically:
//!
//! - [`ByteTokens`] walks an in-memory slice and exposes its position, so a
//!   binary payload can be decoded right where the header ends.
//! - [`StreamTokens`] pulls from any [`Read`] with one byte of lookahead.

use std::io::{ErrorKind, Read};

use crate::error::RasterError;

#[inline]
fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

/// A source of whitespace-delimited ASCII tokens.
pub trait TokenSource {
    /// Next token, or `Ok(None)` when the input is exhausted.
    fn try_next_token(&mut self) -> Result<Option<&[u8]>, RasterError>;

    /// Next token; running out of input is an error.
    fn next_token(&mut self) -> Result<&[u8], RasterError> {
        match self.try_next_token()? {
            Some(token) => Ok(token),
            None => Err(RasterError::UnexpectedEof),
        }
    }

    /// Next token parsed as a non-negative decimal integer.
    fn next_number(&mut self, what: &str) -> Result<u32, RasterError> {
        let token = self.next_token()?;
        parse_number(token).ok_or_else(|| {
            RasterError::Format(format!(
                "{what}: expected a non-negative integer, got {:?}",
                String::from_utf8_lossy(token)
            ))
        })
    }
}

/// Parse an all-digit token. Signs, blanks, and overflow are rejected.
pub(crate) fn parse_number(token: &[u8]) -> Option<u32> {
    if token.is_empty() || !token.iter().all(u8::is_ascii_digit) {
        return None;
    }
    token.iter().try_fold(0u32, |acc, &d| {
        acc.checked_mul(10)?.checked_add(u32::from(d - b'0'))
    })
}

/// Tokenizer over an in-memory byte slice.
///
/// After each token exactly one delimiter is consumed: a single whitespace
/// byte, or a whole comment including its terminating LF. This matches the
/// Netpbm rule that binary data begins after the one whitespace character
/// following the last header field.
#[derive(Clone, Debug)]
pub struct ByteTokens<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteTokens<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Byte offset of the next unread byte.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Move the cursor, e.g. back to a saved [`position`](Self::position).
    pub fn set_position(&mut self, pos: usize) -> Result<(), RasterError> {
        if pos > self.data.len() {
            return Err(RasterError::UnexpectedEof);
        }
        self.pos = pos;
        Ok(())
    }

    /// Unread bytes.
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    fn skip_comment(&mut self) {
        match self.data[self.pos..].iter().position(|&b| b == b'\n') {
            Some(nl) => self.pos += nl + 1,
            None => self.pos = self.data.len(),
        }
    }
}

impl TokenSource for ByteTokens<'_> {
    fn try_next_token(&mut self) -> Result<Option<&[u8]>, RasterError> {
        loop {
            match self.data.get(self.pos) {
                None => return Ok(None),
                Some(&b) if is_space(b) => self.pos += 1,
                Some(b'#') => self.skip_comment(),
                Some(_) => break,
            }
        }

        let start = self.pos;
        while let Some(&b) = self.data.get(self.pos) {
            if is_space(b) || b == b'#' {
                break;
            }
            self.pos += 1;
        }
        let token = &self.data[start..self.pos];

        match self.data.get(self.pos) {
            Some(b'#') => self.skip_comment(),
            Some(_) => self.pos += 1,
            None => {}
        }
        Ok(Some(token))
    }
}

/// Forward-only tokenizer over a reader.
///
/// Reads one byte at a time; wrap unbuffered readers in a
/// [`std::io::BufReader`].
pub struct StreamTokens<R> {
    reader: R,
    peeked: Option<u8>,
    token: Vec<u8>,
}

impl<R: Read> StreamTokens<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            peeked: None,
            token: Vec::with_capacity(8),
        }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    fn peek(&mut self) -> Result<Option<u8>, RasterError> {
        if self.peeked.is_none() {
            let mut byte = [0u8; 1];
            loop {
                match self.reader.read(&mut byte) {
                    Ok(0) => return Ok(None),
                    Ok(_) => {
                        self.peeked = Some(byte[0]);
                        break;
                    }
                    Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                    Err(e) => return Err(RasterError::io("<stream>", e)),
                }
            }
        }
        Ok(self.peeked)
    }

    fn bump(&mut self) {
        self.peeked = None;
    }

    fn skip_comment(&mut self) -> Result<(), RasterError> {
        while let Some(b) = self.peek()? {
            self.bump();
            if b == b'\n' {
                break;
            }
        }
        Ok(())
    }
}

impl<R: Read> TokenSource for StreamTokens<R> {
    fn try_next_token(&mut self) -> Result<Option<&[u8]>, RasterError> {
        loop {
            match self.peek()? {
                None => return Ok(None),
                Some(b) if is_space(b) => self.bump(),
                Some(b'#') => self.skip_comment()?,
                Some(_) => break,
            }
        }

        self.token.clear();
        while let Some(b) = self.peek()? {
            if is_space(b) || b == b'#' {
                break;
            }
            self.token.push(b);
            self.bump();
        }
        Ok(Some(&self.token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn collect<T: TokenSource>(mut src: T) -> Vec<Vec<u8>> {
        let mut out = Vec::new();
        while let Some(tok) = src.try_next_token().unwrap() {
            out.push(tok.to_vec());
        }
        out
    }

    const TRICKY: &[u8] =
        b"P2 # comment with 1 2 3\n#whole line\n  4\t5\r\n25#trailing\n0 1\n2#x\n3";

    #[test]
    fn both_sources_agree() {
        let a = collect(ByteTokens::new(TRICKY));
        let b = collect(StreamTokens::new(TRICKY));
        assert_eq!(a, b);
        let expected: Vec<&[u8]> = vec![b"P2", b"4", b"5", b"25", b"0", b"1", b"2", b"3"];
        assert_eq!(a, expected);
    }

    fn header_like_byte() -> impl Strategy<Value = u8> {
        prop_oneof![
            any::<u8>(),
            Just(b'#'),
            Just(b' '),
            Just(b'\t'),
            Just(b'\r'),
            Just(b'\n'),
            b'0'..=b'9',
        ]
    }

    proptest! {
        #[test]
        fn both_sources_agree_on_any_input(
            data in proptest::collection::vec(header_like_byte(), 0..96),
        ) {
            prop_assert_eq!(
                collect(ByteTokens::new(&data)),
                collect(StreamTokens::new(&data[..]))
            );
        }
    }

    #[test]
    fn comment_terminates_token() {
        let toks = collect(ByteTokens::new(b"12#34\n56"));
        assert_eq!(toks, vec![b"12".to_vec(), b"56".to_vec()]);
    }

    #[test]
    fn required_token_at_end_is_eof() {
        let mut src = ByteTokens::new(b"  # only a comment\n ");
        assert!(matches!(src.next_token(), Err(RasterError::UnexpectedEof)));
        let mut src = StreamTokens::new(&b"\n\t"[..]);
        assert!(matches!(src.next_token(), Err(RasterError::UnexpectedEof)));
    }

    #[test]
    fn optional_token_at_end_is_none() {
        let mut src = ByteTokens::new(b"7 ");
        assert_eq!(src.try_next_token().unwrap(), Some(&b"7"[..]));
        assert_eq!(src.try_next_token().unwrap(), None);
    }

    #[test]
    fn single_delimiter_consumed_after_token() {
        let mut src = ByteTokens::new(b"255\n\n\x0a");
        src.next_token().unwrap();
        assert_eq!(src.position(), 4);
        assert_eq!(src.remaining(), b"\n\x0a");

        let mut src = ByteTokens::new(b"255# note\nXY");
        src.next_token().unwrap();
        assert_eq!(src.remaining(), b"XY");
    }

    #[test]
    fn numbers() {
        let mut src = ByteTokens::new(b"640 -1 abc 99999999999");
        assert_eq!(src.next_number("width").unwrap(), 640);
        assert!(matches!(
            src.next_number("height"),
            Err(RasterError::Format(_))
        ));
        assert!(matches!(
            src.next_number("maxval"),
            Err(RasterError::Format(_))
        ));
        assert!(matches!(
            src.next_number("big"),
            Err(RasterError::Format(_))
        ));
    }

    #[test]
    fn seek_back_and_reread() {
        let mut src = ByteTokens::new(b"P4 3 1 ");
        src.next_token().unwrap();
        let mark = src.position();
        assert_eq!(src.next_token().unwrap(), b"3");
        src.set_position(mark).unwrap();
        assert_eq!(src.next_token().unwrap(), b"3");
        assert!(src.set_position(100).is_err());
    }
}
