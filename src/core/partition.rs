//! Order-preserving partitioning of work into batches.

/// Number of batches needed for `len` items at `batch_size` per batch.
///
/// `batch_size` must be non-zero.
pub const fn batch_count(len: usize, batch_size: usize) -> usize {
    len.div_ceil(batch_size)
}

/// Split `items` into consecutive batches of at most `batch_size` items.
///
/// Items keep their original order; only the last batch may be short.
/// Empty input yields no batches. A `batch_size` of zero is treated as one.
pub fn partition<T>(items: Vec<T>, batch_size: usize) -> Vec<Vec<T>> {
    let batch_size = batch_size.max(1);
    let mut batches = Vec::with_capacity(batch_count(items.len(), batch_size));
    let mut iter = items.into_iter();
    loop {
        let batch: Vec<T> = iter.by_ref().take(batch_size).collect();
        if batch.is_empty() {
            break;
        }
        batches.push(batch);
    }
    batches
}
