/// Lightbox viewer state
///
/// Tracks whether the enlarged view is open and which image it points at.
/// All navigation is clamped to the visible window of the grid, so the
/// lightbox can never show an image that has not been promoted yet.

#[derive(Debug, Default)]
pub struct Lightbox {
    open: bool,
    index: usize,
}

impl Lightbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Index of the image on display; meaningful only while open
    pub fn index(&self) -> usize {
        self.index
    }

    /// Open on the clicked image; out-of-range indices are ignored
    pub fn open(&mut self, index: usize, visible_count: usize) {
        if index < visible_count {
            self.open = true;
            self.index = index;
        }
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Step to the next visible image; stays put at the end of the window
    pub fn next(&mut self, visible_count: usize) {
        if self.open && self.index + 1 < visible_count {
            self.index += 1;
        }
    }

    /// Step to the previous image; stays put at index 0
    pub fn previous(&mut self) {
        if self.open && self.index > 0 {
            self.index -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_and_close() {
        let mut lb = Lightbox::new();
        assert!(!lb.is_open());

        lb.open(3, 8);
        assert!(lb.is_open());
        assert_eq!(lb.index(), 3);

        lb.close();
        assert!(!lb.is_open());
    }

    #[test]
    fn test_open_out_of_range_is_ignored() {
        let mut lb = Lightbox::new();
        lb.open(8, 8);
        assert!(!lb.is_open());

        lb.open(0, 0);
        assert!(!lb.is_open());
    }

    #[test]
    fn test_navigation_is_clamped() {
        let mut lb = Lightbox::new();
        lb.open(0, 3);

        lb.previous();
        assert_eq!(lb.index(), 0);

        lb.next(3);
        lb.next(3);
        assert_eq!(lb.index(), 2);

        lb.next(3);
        assert_eq!(lb.index(), 2);
    }

    #[test]
    fn test_navigation_while_closed_is_noop() {
        let mut lb = Lightbox::new();
        lb.next(5);
        lb.previous();
        assert!(!lb.is_open());
        assert_eq!(lb.index(), 0);
    }
}
