//! Photo [`Gallery`] of an estate.

/// Direction of moving through a [`Gallery`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    /// Towards the previous photo.
    Left,

    /// Towards the next photo.
    Right,
}

/// Slider over the photos of an estate.
///
/// Always has at least one slide, since an estate always has a cover photo.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Gallery {
    /// Number of slides.
    len: usize,

    /// Index of the current slide.
    current: usize,

    /// Indicator whether the slider is open.
    open: bool,
}

impl Gallery {
    /// Creates a new closed [`Gallery`] of `len` slides positioned on the
    /// first one.
    ///
    /// Returns [`None`] if there are no slides.
    #[must_use]
    pub const fn new(len: usize) -> Option<Self> {
        if len == 0 {
            return None;
        }
        Some(Self {
            len,
            current: 0,
            open: false,
        })
    }

    /// Opens this [`Gallery`] on the slide with the provided index.
    ///
    /// Out-of-range index selects the last slide.
    pub fn open(&mut self, index: usize) {
        self.current = index.min(self.len - 1);
        self.open = true;
    }

    /// Closes this [`Gallery`] keeping its current slide.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Moves to the neighbour slide, wrapping around the ends.
    pub fn slide(&mut self, direction: Direction) {
        self.current = match direction {
            Direction::Left => (self.current + self.len - 1) % self.len,
            Direction::Right => (self.current + 1) % self.len,
        };
    }

    /// Returns the index of the current slide.
    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    /// Returns the number of slides.
    #[must_use]
    pub const fn slides(&self) -> usize {
        self.len
    }

    /// Indicates whether this [`Gallery`] is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }
}
