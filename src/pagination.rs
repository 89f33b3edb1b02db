pub const QUESTIONS_PER_PAGE: u32 = 10;

/// A 1-indexed, fixed-size window over an ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    number: u64,
    size: u32,
}

impl Page {
    /// Returns `None` for page 0 or an empty page size.
    pub fn new(number: u64, size: u32) -> Option<Self> {
        if number == 0 || size == 0 {
            return None;
        }
        Some(Self { number, size })
    }

    pub fn first(size: u32) -> Self {
        Self {
            number: 1,
            size: size.max(1),
        }
    }

    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    fn offset(&self) -> usize {
        usize::try_from(self.number - 1)
            .unwrap_or(usize::MAX)
            .saturating_mul(self.size as usize)
    }

    /// The items of this page; empty when the page lies past the end.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.offset().min(items.len());
        let end = start.saturating_add(self.size as usize).min(items.len());
        &items[start..end]
    }
}
