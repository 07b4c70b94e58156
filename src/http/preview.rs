//! Body preview decoding.

/// Maximum number of body bytes read from the remote endpoint.
pub const PREVIEW_READ_LIMIT: usize = 1024;

/// Maximum number of characters kept in the preview.
pub const PREVIEW_CHAR_LIMIT: usize = 200;

/// Decode bytes as UTF-8, dropping every invalid sequence.
///
/// An incomplete sequence at the end of the buffer is dropped as well, which
/// covers a multi-byte character cut by [`PREVIEW_READ_LIMIT`].
pub fn decode_lossy(mut bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());

    loop {
        match std::str::from_utf8(bytes) {
            Ok(valid) => {
                out.push_str(valid);
                return out;
            }
            Err(err) => {
                let (valid, rest) = bytes.split_at(err.valid_up_to());
                // valid_up_to guarantees this prefix is UTF-8
                out.push_str(std::str::from_utf8(valid).unwrap_or_default());

                match err.error_len() {
                    Some(len) => bytes = &rest[len..],
                    None => return out,
                }
            }
        }
    }
}

/// Keep at most `limit` characters of `text`.
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Decode and truncate the leading body bytes into a preview.
pub fn body_preview(head: &[u8]) -> String {
    let limit = head.len().min(PREVIEW_READ_LIMIT);
    let decoded = decode_lossy(&head[..limit]);
    truncate_chars(&decoded, PREVIEW_CHAR_LIMIT).to_string()
}
