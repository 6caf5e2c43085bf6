//! Gap filling for 24h vectors read from the sheet

use crate::types::{DayProfile, HOURS_PER_DAY};

/// Replace non-finite values in place
///
/// Interior gaps are interpolated linearly between the nearest finite
/// neighbors, leading and trailing gaps carry the nearest finite value, and a
/// vector without any finite value becomes all zeros.
pub fn fill_gaps(values: &mut [f64]) {
    let known: Vec<usize> = values
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_finite())
        .map(|(i, _)| i)
        .collect();

    let (Some(&first), Some(&last)) = (known.first(), known.last()) else {
        values.fill(0.0);
        return;
    };

    let head = values[first];
    values[..first].fill(head);
    let tail = values[last];
    values[last + 1..].fill(tail);

    for pair in known.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let (va, vb) = (values[a], values[b]);
        for i in a + 1..b {
            let t = (i - a) as f64 / (b - a) as f64;
            values[i] = va + (vb - va) * t;
        }
    }
}

/// Take up to 24 raw values (missing ones read as NaN), fill gaps
///
/// Returns the profile and how many of the raw values were finite.
pub fn build_profile<I>(raw: I) -> (DayProfile, usize)
where
    I: IntoIterator<Item = f64>,
{
    let mut values = [f64::NAN; HOURS_PER_DAY];
    for (slot, value) in values.iter_mut().zip(raw) {
        *slot = value;
    }
    let finite = values.iter().filter(|v| v.is_finite()).count();
    fill_gaps(&mut values);
    (DayProfile::new(values), finite)
}
