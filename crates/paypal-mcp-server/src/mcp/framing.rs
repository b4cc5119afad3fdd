//! Content-Length framing.
//!
//! Each message is preceded by `Content-Length: <N>\r\n\r\n` where `N` is the
//! exact byte length of the UTF-8 JSON body that follows. Messages may arrive
//! split across arbitrary chunks or back-to-back within one chunk.

const HEADER_PREFIX: &[u8] = b"Content-Length: ";
const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Encodes a message body with its framing header.
pub fn encode_frame(body: &[u8]) -> Vec<u8> {
    let mut out = format!("Content-Length: {}\r\n\r\n", body.len()).into_bytes();
    out.extend_from_slice(body);
    out
}

#[derive(Debug, Clone, Copy)]
struct PendingFrame {
    body_start: usize,
    body_len: usize,
}

/// Incremental frame decoder over a growable byte buffer.
///
/// The header scan resumes from a cursor instead of re-examining the whole
/// buffer after every chunk, and a parsed header is remembered while its body
/// is still in flight. Bytes that precede a valid header are skipped once the
/// header is found.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    buffer: Vec<u8>,
    scan_from: usize,
    pending: Option<PendingFrame>,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends newly received bytes to the buffer.
    pub fn extend(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    /// Extracts the next complete message body, if one is available. Call in
    /// a loop after each `extend`, since one chunk may complete several
    /// frames.
    pub fn next_frame(&mut self) -> Option<Vec<u8>> {
        if self.pending.is_none() {
            self.pending = self.find_header();
        }

        let pending = self.pending?;
        let frame_end = pending.body_start + pending.body_len;
        if self.buffer.len() < frame_end {
            return None;
        }

        let body = self.buffer[pending.body_start..frame_end].to_vec();
        self.buffer.drain(..frame_end);
        self.pending = None;
        self.scan_from = 0;
        Some(body)
    }

    /// Scans for a complete `Content-Length: <N>\r\n\r\n` header starting at
    /// the cursor. Bytes that merely resemble a header are skipped; a header
    /// cut off by the end of the buffer leaves the cursor on its first byte
    /// so the scan resumes there.
    fn find_header(&mut self) -> Option<PendingFrame> {
        let mut from = self.scan_from;

        loop {
            let Some(offset) = find(&self.buffer[from..], HEADER_PREFIX) else {
                // The prefix may be split across the chunk boundary; keep
                // its longest possible partial match in scan range.
                self.scan_from = self
                    .buffer
                    .len()
                    .saturating_sub(HEADER_PREFIX.len() - 1)
                    .max(from);
                return None;
            };
            let start = from + offset;
            let digits_start = start + HEADER_PREFIX.len();

            let mut digits_end = digits_start;
            while digits_end < self.buffer.len() && self.buffer[digits_end].is_ascii_digit() {
                digits_end += 1;
            }

            if digits_end == self.buffer.len() {
                // Length still arriving.
                self.scan_from = start;
                return None;
            }
            if digits_end == digits_start {
                // "Content-Length: " not followed by a number; not a header.
                from = start + 1;
                continue;
            }
            if self.buffer.len() < digits_end + HEADER_TERMINATOR.len() {
                self.scan_from = start;
                return None;
            }
            if &self.buffer[digits_end..digits_end + HEADER_TERMINATOR.len()] != HEADER_TERMINATOR
            {
                from = start + 1;
                continue;
            }

            let digits = &self.buffer[digits_start..digits_end];
            let Some(body_len) = std::str::from_utf8(digits)
                .ok()
                .and_then(|s| s.parse::<usize>().ok())
            else {
                from = start + 1;
                continue;
            };

            return Some(PendingFrame {
                body_start: digits_end + HEADER_TERMINATOR.len(),
                body_len,
            });
        }
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_all(decoder: &mut FrameDecoder) -> Vec<Vec<u8>> {
        let mut frames = Vec::new();
        while let Some(frame) = decoder.next_frame() {
            frames.push(frame);
        }
        frames
    }

    #[test]
    fn roundtrip_single_frame() {
        let body = br#"{"id":1,"type":"ping"}"#;
        let encoded = encode_frame(body);

        let mut decoder = FrameDecoder::new();
        decoder.extend(&encoded);
        assert_eq!(decode_all(&mut decoder), vec![body.to_vec()]);
        assert!(decoder.next_frame().is_none());
    }

    #[test]
    fn reassembles_one_byte_chunks() {
        let body = br#"{"id":"req-1","type":"request","method":"list_invoices","params":{}}"#;
        let encoded = encode_frame(body);

        let mut decoder = FrameDecoder::new();
        let mut frames = Vec::new();
        for byte in encoded {
            decoder.extend(&[byte]);
            frames.extend(decode_all(&mut decoder));
        }
        assert_eq!(frames, vec![body.to_vec()]);
    }

    #[test]
    fn back_to_back_frames_in_one_chunk() {
        let first = br#"{"id":1,"type":"ping"}"#;
        let second = br#"{"id":2,"type":"ping"}"#;
        let mut stream = encode_frame(first);
        stream.extend_from_slice(&encode_frame(second));

        let mut decoder = FrameDecoder::new();
        decoder.extend(&stream);
        assert_eq!(
            decode_all(&mut decoder),
            vec![first.to_vec(), second.to_vec()]
        );
    }

    #[test]
    fn skips_garbage_before_header() {
        let body = br#"{"id":1,"type":"ping"}"#;
        let mut stream = b"noise noise\r\n".to_vec();
        stream.extend_from_slice(&encode_frame(body));

        let mut decoder = FrameDecoder::new();
        decoder.extend(&stream);
        assert_eq!(decode_all(&mut decoder), vec![body.to_vec()]);
    }

    #[test]
    fn header_split_across_chunks() {
        let body = br#"{"id":1,"type":"ping"}"#;
        let encoded = encode_frame(body);
        let (head, tail) = encoded.split_at(9); // inside "Content-Length"

        let mut decoder = FrameDecoder::new();
        decoder.extend(head);
        assert!(decoder.next_frame().is_none());
        decoder.extend(tail);
        assert_eq!(decode_all(&mut decoder), vec![body.to_vec()]);
    }

    #[test]
    fn length_digits_split_across_chunks() {
        let body = vec![b'x'; 120];
        let encoded = encode_frame(&body);
        // Split between the two digits of "120".
        let split = "Content-Length: 1".len();
        let (head, tail) = encoded.split_at(split);

        let mut decoder = FrameDecoder::new();
        decoder.extend(head);
        assert!(decoder.next_frame().is_none());
        decoder.extend(tail);
        assert_eq!(decode_all(&mut decoder), vec![body]);
    }

    #[test]
    fn prefix_without_length_is_not_a_header() {
        let body = br#"{"id":1,"type":"ping"}"#;
        let mut stream = b"Content-Length: abc\r\n\r\n".to_vec();
        stream.extend_from_slice(&encode_frame(body));

        let mut decoder = FrameDecoder::new();
        decoder.extend(&stream);
        assert_eq!(decode_all(&mut decoder), vec![body.to_vec()]);
    }

    #[test]
    fn empty_extend_is_safe() {
        let mut decoder = FrameDecoder::new();
        decoder.extend(&[]);
        assert!(decoder.next_frame().is_none());
    }

    #[test]
    fn zero_length_body() {
        let mut decoder = FrameDecoder::new();
        decoder.extend(b"Content-Length: 0\r\n\r\n");
        assert_eq!(decoder.next_frame(), Some(Vec::new()));
    }
}
