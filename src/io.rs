//! Whitespace-token scanning shared by the container read paths.

use std::io::{self, BufRead};

/// Read the next whitespace-delimited token from `reader`.
///
/// Consumes leading whitespace and the first delimiter after the token.
/// Returns `Ok(None)` once the stream is exhausted without finding a
/// non-whitespace byte.
pub fn next_token<R: BufRead + ?Sized>(reader: &mut R) -> io::Result<Option<String>> {
    let mut token: Vec<u8> = Vec::new();
    loop {
        let (used, done) = {
            let buf = reader.fill_buf()?;
            if buf.is_empty() {
                (0, true)
            } else {
                let mut used = 0;
                let mut done = false;
                for &byte in buf {
                    used += 1;
                    if byte.is_ascii_whitespace() {
                        if token.is_empty() {
                            continue;
                        }
                        done = true;
                        break;
                    }
                    token.push(byte);
                }
                (used, done)
            }
        };
        reader.consume(used);
        if done {
            break;
        }
    }
    if token.is_empty() {
        Ok(None)
    } else {
        Ok(Some(String::from_utf8_lossy(&token).into_owned()))
    }
}
