// String::truncate panics when cutting a multibyte
// char in half, so this counts chars instead of bytes.
pub fn truncate_utf8(s: &mut String, max_chars: usize) {
  if let Some((idx, _)) = s.char_indices().nth(max_chars) {
    s.truncate(idx);
  }
}
