use std::ops::Range;

/// Split `0..len` into consecutive ranges of `size`; the last may be shorter.
pub fn batch(len: usize, size: usize) -> Vec<Range<usize>> {
    let size = size.max(1);
    (0..len)
        .step_by(size)
        .map(|start| start..(start + size).min(len))
        .collect()
}

/// Index of the unit of meaning that contains `index`
pub fn unit_containing(index: usize, size: usize) -> usize {
    index / size.max(1)
}
