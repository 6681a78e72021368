//! Index tuple enumeration over a finite alphabet.
//!
//! A [`Permutor`] yields tuples of indices into a list of `size` elements:
//!
//! - single mode (`dimension == 1`): `[0]`, `[1]`, ..., `[size - 1]`
//! - full mode (`dimension > 1`): every tuple in `{0..size}^dimension`, with
//!   coordinate 0 varying fastest
//!
//! Candidate ids are correlated across runs by enumeration order, so the order
//! is fixed for a given `(size, dimension)`.

/// Which enumeration a [`Permutor`] performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermutorMode {
    Single,
    Full,
}

/// Lazy enumerator of index tuples.
#[derive(Debug, Clone)]
pub struct Permutor {
    size: usize,
    mode: PermutorMode,
    /// Next tuple to yield, or `None` once exhausted.
    next: Option<Vec<usize>>,
    remaining: Option<usize>,
}

impl Permutor {
    /// Picks single mode for `dimension == 1` and full mode otherwise.
    ///
    /// A dimension of 0 yields exactly one empty tuple (the only element of
    /// `{0..size}^0`); callers that need slots should reject it first.
    pub fn new(size: usize, dimension: usize) -> Self {
        if dimension == 1 {
            Self::single(size)
        } else {
            Self::full(size, dimension)
        }
    }

    /// Yields each index `0..size` once, as a length-1 tuple.
    pub fn single(size: usize) -> Self {
        Self {
            size,
            mode: PermutorMode::Single,
            next: (size > 0).then(|| vec![0]),
            remaining: Some(size),
        }
    }

    /// Yields the Cartesian product `{0..size}^dimension`.
    pub fn full(size: usize, dimension: usize) -> Self {
        let total = u32::try_from(dimension)
            .ok()
            .and_then(|exp| size.checked_pow(exp));
        let empty = size == 0 && dimension > 0;
        Self {
            size,
            mode: PermutorMode::Full,
            next: (!empty).then(|| vec![0; dimension]),
            remaining: total,
        }
    }

    pub const fn mode(&self) -> PermutorMode {
        self.mode
    }

    /// Steps `tuple` to its successor, first coordinate fastest.
    /// Returns `false` when the tuple wrapped past the last combination.
    fn advance(&self, tuple: &mut [usize]) -> bool {
        for digit in tuple.iter_mut() {
            *digit += 1;
            if *digit < self.size {
                return true;
            }
            *digit = 0;
        }
        false
    }
}

impl Iterator for Permutor {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        let mut successor = current.clone();
        if self.advance(&mut successor) {
            self.next = Some(successor);
        }
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining = remaining.saturating_sub(1);
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining {
            Some(remaining) => (remaining, Some(remaining)),
            None => (usize::MAX, None),
        }
    }
}
