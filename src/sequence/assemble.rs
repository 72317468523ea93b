//! Splicing two transcript sequences at their junction offsets.

/// The two unmarked fragments contributing to a chimeric sequence.
///
/// The 5' fragment is the prefix of `seq_a` of length `offset_a`; the 3'
/// fragment is `seq_b` with its first `offset_b` bases skipped. Offsets past
/// the end of a sequence are clamped to its length.
pub fn fragments<'a>(
    seq_a: &'a str,
    offset_a: usize,
    seq_b: &'a str,
    offset_b: usize,
) -> (&'a str, &'a str) {
    debug_assert!(seq_a.is_ascii() && seq_b.is_ascii());
    let a = &seq_a[..offset_a.min(seq_a.len())];
    let b = &seq_b[offset_b.min(seq_b.len())..];
    (a, b)
}

/// Join the 5' fragment of `seq_a` to the 3' fragment of `seq_b`.
///
/// With `marker` set, that single character separates the fragments.
pub fn splice(
    seq_a: &str,
    offset_a: usize,
    seq_b: &str,
    offset_b: usize,
    marker: Option<char>,
) -> String {
    let (a, b) = fragments(seq_a, offset_a, seq_b, offset_b);
    let mut chimera = String::with_capacity(a.len() + b.len() + 1);
    chimera.push_str(a);
    if let Some(m) = marker {
        chimera.push(m);
    }
    chimera.push_str(b);
    chimera
}
