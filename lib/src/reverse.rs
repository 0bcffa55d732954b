/// Reverse, in place, the last `n` elements of `array`.
///
/// `n` larger than the slice is clamped, so `reverse(a, a.len())` reverses
/// the whole slice. Fewer than two elements is a no-op.
pub(crate) fn reverse<T>(array: &mut [T], n: usize) {
    let len = array.len();
    let n = n.min(len);
    if n < 2 {
        return;
    }

    let mut i = len - n;
    let mut j = len - 1;
    while i < j {
        array.swap(i, j);
        i += 1;
        j -= 1;
    }
}
