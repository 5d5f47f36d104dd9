use bytes::BytesMut;

/// Turns arbitrary byte fragments into complete text lines.
///
/// Splitting happens on raw bytes and only complete lines are decoded. A `\n`
/// byte never appears inside a multi-byte UTF-8 sequence, so a character cut
/// across two fragments stays intact in `pending` until its line completes.
#[derive(Debug, Default)]
pub struct LineReassembler {
    pending: BytesMut,
    /// Prefix of `pending` already searched and known to hold no `\n`
    scanned: usize,
}

impl LineReassembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `fragment` and return every line it completes.
    ///
    /// Whitespace-only lines are dropped. The trailing partial line, possibly
    /// empty, is held until the next call.
    pub fn feed(&mut self, fragment: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(fragment);

        let mut lines = Vec::new();
        while let Some(offset) = self.pending[self.scanned..].iter().position(|&b| b == b'\n') {
            let pos = self.scanned + offset;
            let raw = self.pending.split_to(pos + 1);
            self.scanned = 0;
            if let Some(line) = decode_line(&raw[..pos]) {
                lines.push(line);
            }
        }
        self.scanned = self.pending.len();
        lines
    }

    /// Take the remainder at end of input, if it holds anything but whitespace.
    pub fn flush(&mut self) -> Option<String> {
        let rest = self.pending.split();
        self.scanned = 0;
        decode_line(&rest)
    }
}

fn decode_line(raw: &[u8]) -> Option<String> {
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    let line = String::from_utf8_lossy(raw);
    if line.trim().is_empty() {
        None
    } else {
        Some(line.into_owned())
    }
}
