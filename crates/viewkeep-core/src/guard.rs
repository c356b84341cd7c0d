//! Size guard for oversized buffers

/// True when a buffer of `content_len` is too large to cache or restore.
///
/// The comparison is strict, so a buffer exactly at the cap is still cached.
/// `content_len` is in whatever unit the host's content-length measure
/// reports; the cap in the document uses the same unit.
pub fn should_skip(content_len: usize, max_buffer_size: usize) -> bool {
    content_len > max_buffer_size
}
