//! Whitespace token scanning.
//!
//! [`TokenScanner`] pulls raw tokens out of a [`BufRead`] one at a time without
//! loading the whole source into memory. Tokens are bounded by a maximum width
//! in bytes: a longer run of non-whitespace is returned as consecutive chunks,
//! the way a width-limited scan into a fixed buffer behaves.

use std::io::{self, BufRead};

/// Iterator over whitespace-delimited raw tokens.
#[derive(Debug)]
pub struct TokenScanner<R> {
    reader: R,
    max_width: usize,
    done: bool,
}

impl<R: BufRead> TokenScanner<R> {
    /// Create a scanner. A `max_width` of zero is treated as one.
    pub fn new(reader: R, max_width: usize) -> Self {
        TokenScanner {
            reader,
            max_width: max_width.max(1),
            done: false,
        }
    }

    /// Maximum token width in bytes.
    pub fn max_width(&self) -> usize {
        self.max_width
    }

    fn next_token(&mut self) -> io::Result<Option<String>> {
        let max_width = self.max_width;
        let mut token: Vec<u8> = Vec::new();

        loop {
            let buf = match self.reader.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if buf.is_empty() {
                break;
            }

            let mut used = 0;
            let mut finished = false;
            for &b in buf {
                used += 1;
                if b.is_ascii_whitespace() {
                    if !token.is_empty() {
                        finished = true;
                        break;
                    }
                } else {
                    token.push(b);
                    if token.len() == max_width {
                        finished = true;
                        break;
                    }
                }
            }
            self.reader.consume(used);

            if finished {
                break;
            }
        }

        if token.is_empty() {
            Ok(None)
        } else {
            Ok(Some(String::from_utf8_lossy(&token).into_owned()))
        }
    }
}

impl<R: BufRead> Iterator for TokenScanner<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_token() {
            Ok(Some(token)) => Some(Ok(token)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
