//! Comma-delimited name list parsing.

/// Splits `"a,b,c"` into `["a", "b", "c"]`.
///
/// Segments are not trimmed. Empty segments are dropped wherever they occur,
/// not only trailing ones: `"a,,b"` yields `["a", "b"]` and `""` yields no names.
/// A plain `str::split` would keep the interior empty name.
pub fn split_names(list: &str) -> Vec<String> {
    list.split(',')
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
