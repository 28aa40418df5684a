//! Batch-chunking helper.

/// Iterator adapter that yields fixed-size batches of the underlying sequence.
///
/// The final batch may hold fewer than `size` elements.
pub struct Chunks<I: Iterator> {
    iter: I,
    size: usize,
}

impl<I: Iterator> Iterator for Chunks<I> {
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut batch = Vec::with_capacity(self.size);
        for item in self.iter.by_ref() {
            batch.push(item);
            if batch.len() == self.size {
                break;
            }
        }
        if batch.is_empty() {
            None
        } else {
            Some(batch)
        }
    }
}

/// Split a sequence into batches of at most `size` elements.
///
/// Panics if `size` is zero.
pub fn chunked<T>(items: impl IntoIterator<Item = T>, size: usize) -> Chunks<impl Iterator<Item = T>> {
    assert!(size > 0, "chunk size must be positive");
    Chunks {
        iter: items.into_iter(),
        size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_even_split() {
        let batches: Vec<Vec<i32>> = chunked(vec![1, 2, 3, 4], 2).collect();
        assert_eq!(batches, vec![vec![1, 2], vec![3, 4]]);
    }

    #[test]
    fn test_trailing_partial_batch() {
        let batches: Vec<Vec<i32>> = chunked(vec![1, 2, 3, 4, 5], 2).collect();
        assert_eq!(batches, vec![vec![1, 2], vec![3, 4], vec![5]]);
    }

    #[test]
    fn test_size_larger_than_input() {
        let batches: Vec<Vec<i32>> = chunked(vec![1, 2], 10).collect();
        assert_eq!(batches, vec![vec![1, 2]]);
    }

    #[test]
    fn test_empty_input() {
        let batches: Vec<Vec<i32>> = chunked(Vec::new(), 3).collect();
        assert!(batches.is_empty());
    }

    #[test]
    #[should_panic(expected = "chunk size must be positive")]
    fn test_zero_size_panics() {
        let _ = chunked(vec![1], 0);
    }
}
