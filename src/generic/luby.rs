//! The luby sequence, used to pace restarts.
//!
//! See <https://oeis.org/A182105> for details on the sequence.

/// `y` raised to the `x`th element of the luby sequence
/// (Luby, Sinclair, Zuckerman 1993); for `y = 2` the values run
/// `1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8, …`.
pub fn luby(y: f64, x: u32) -> f64 {
    let x = x as i64;

    // Find the finite subsequence containing x, and its position within.
    let mut size: i64 = 1;
    let mut sequence: i64 = 0;
    while size < x + 1 {
        sequence += 1;
        size = 2 * size + 1;
    }

    let mut x = x;
    while size - 1 != x {
        size = (size - 1) >> 1;
        sequence -= 1;
        x %= size;
    }

    y.powi(sequence as i32)
}
