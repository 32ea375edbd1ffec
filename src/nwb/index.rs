use core::ops::Range;

use crate::{Error, IndexError, Result};

#[doc = r#"
The ragged index of an NWB units table.

`spike_times_index[i]` is the exclusive end of unit `i`'s slice of the
flat `spike_times` array. The start of each slice is the end of the
previous one, and `0` for the first unit.

# Example
```rust
# use neuro_midi::nwb::SpikeIndex;
let index = SpikeIndex::new([3, 7, 7, 10], 10).unwrap();

assert_eq!(index.len(), 4);
assert_eq!(index.span(0), Some(0..3));
assert_eq!(index.span(2), Some(7..7)); // a unit that never fired
assert_eq!(index.span(4), None);
```
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpikeIndex {
    // ends with a 0 prepended, so unit i spans offsets[i]..offsets[i + 1]
    offsets: Vec<u64>,
}

impl SpikeIndex {
    /// Create an index from the stored end offsets and the length of the
    /// timestamp array they point into.
    ///
    /// # Errors
    /// [`Error::MalformedIndex`] if an offset decreases or points past
    /// `spike_count`.
    pub fn new<I>(ends: I, spike_count: u64) -> Result<Self>
    where
        I: IntoIterator<Item = u64>,
    {
        let ends = ends.into_iter();
        let mut offsets = Vec::with_capacity(ends.size_hint().0 + 1);
        offsets.push(0);

        for (unit, end) in ends.enumerate() {
            let start = offsets[unit];
            let reason = if end < start {
                Some(IndexError::Decreasing { start, end })
            } else if end > spike_count {
                Some(IndexError::PastEnd {
                    end,
                    len: spike_count,
                })
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(Error::MalformedIndex { unit, reason });
            }
            offsets.push(end);
        }

        Ok(Self { offsets })
    }

    /// Number of units
    pub fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    /// True if there are no units
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The slice of `spike_times` holding `unit`'s timestamps
    pub fn span(&self, unit: usize) -> Option<Range<usize>> {
        let start = *self.offsets.get(unit)?;
        let end = *self.offsets.get(unit.checked_add(1)?)?;
        Some(start as usize..end as usize)
    }

    /// The units `[start, start + n)`, or `[start, len)` without `n`,
    /// cut short at the last unit.
    ///
    /// A `start` past the last unit gives an empty range.
    pub fn units(&self, start: usize, n: Option<usize>) -> Range<usize> {
        let end = match n {
            Some(n) => start.saturating_add(n).min(self.len()),
            None => self.len(),
        };
        start..end.max(start)
    }

    /// Each requested unit with its span. See [`SpikeIndex::units`].
    pub fn spans(
        &self,
        start: usize,
        n: Option<usize>,
    ) -> impl Iterator<Item = (usize, Range<usize>)> + '_ {
        self.units(start, n).filter_map(|unit| Some((unit, self.span(unit)?)))
    }
}
