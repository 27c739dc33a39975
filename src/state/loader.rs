/// Incremental grid loader
///
/// This is the state machine behind the image grid: it owns the visible
/// prefix of an album's image list and grows it one preloaded batch at a
/// time as the user scrolls. It holds no widgets and does no IO, so the
/// pagination rules can be tested on their own.

/// Number of grid columns for a given viewport width, in logical pixels
pub fn column_count(width: f32) -> usize {
    if width < 640.0 {
        1
    } else if width < 768.0 {
        2
    } else if width < 1024.0 {
        3
    } else {
        4
    }
}

/// Whether a load is currently in flight
///
/// `Idle --begin_load--> Loading --complete_load--> Idle` is the only
/// legal cycle; `begin_load` outside `Idle` is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    Loading,
}

/// A slice of the album scheduled for preloading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    /// Index of the first image in the batch
    pub start: usize,
    /// Number of images in the batch
    pub count: usize,
    /// Tag checked on completion so stale batches are discarded
    pub generation: u64,
}

/// Pagination state for one album's image grid
#[derive(Debug)]
pub struct GridLoader {
    /// Identity of the list currently loaded; a change forces a reset
    album_id: String,
    /// Total number of images in the album
    total: usize,
    /// Length of the visible prefix; never shrinks between resets
    visible: usize,
    /// Current responsive column count
    columns: usize,
    phase: LoadPhase,
    /// Bumped on every reset; in-flight batches from before the bump
    /// settle into nothing
    generation: u64,
    /// Size of the batch currently in flight (0 when idle)
    pending: usize,
}

impl GridLoader {
    /// Create a loader with no album loaded yet
    pub fn new(viewport_width: f32) -> Self {
        GridLoader {
            album_id: String::new(),
            total: 0,
            visible: 0,
            columns: column_count(viewport_width),
            phase: LoadPhase::Idle,
            generation: 0,
            pending: 0,
        }
    }

    /// Point the loader at an album's image list
    ///
    /// Idempotent while the list identity is unchanged; switching albums
    /// resets the window to the initial page and invalidates any batch
    /// still in flight. A rescan can hand the same album id a different
    /// image list, so a changed length is an identity change too —
    /// otherwise a shrunken album would leave `visible` pointing past
    /// the end of the new list.
    pub fn initialize(&mut self, album_id: &str, total: usize) {
        if self.album_id == album_id && self.total == total {
            return;
        }

        self.album_id = album_id.to_string();
        self.total = total;
        self.visible = self.page_size().min(total);
        self.phase = LoadPhase::Idle;
        self.generation += 1;
        self.pending = 0;
    }

    /// Images per incremental load: two rows at the current column count
    pub fn page_size(&self) -> usize {
        2 * self.columns
    }

    /// Current responsive column count
    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn visible_count(&self) -> usize {
        self.visible
    }

    pub fn has_more(&self) -> bool {
        self.visible < self.total
    }

    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start the next load, if one is allowed right now
    ///
    /// Returns the batch to preload, or `None` when there is nothing left
    /// or a batch is already in flight (callers treat `None` as a no-op,
    /// not an error).
    pub fn begin_load(&mut self) -> Option<Batch> {
        if self.phase != LoadPhase::Idle || !self.has_more() {
            return None;
        }

        let count = self.page_size().min(self.total - self.visible);
        self.phase = LoadPhase::Loading;
        self.pending = count;

        Some(Batch {
            start: self.visible,
            count,
            generation: self.generation,
        })
    }

    /// Promote the in-flight batch after every image in it has settled
    ///
    /// The whole batch becomes visible regardless of how many of its
    /// preloads failed. A generation mismatch means the album changed
    /// while the batch was in flight; the completion is dropped and
    /// returns false.
    pub fn complete_load(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.phase != LoadPhase::Loading {
            return false;
        }

        self.visible = (self.visible + self.pending).min(self.total);
        self.pending = 0;
        self.phase = LoadPhase::Idle;
        true
    }

    /// Track viewport width changes
    ///
    /// Crossing a breakpoint only changes the size of future pages;
    /// images already shown stay shown.
    pub fn set_viewport_width(&mut self, width: f32) {
        self.columns = column_count(width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loader(width: f32, album: &str, total: usize) -> GridLoader {
        let mut l = GridLoader::new(width);
        l.initialize(album, total);
        l
    }

    #[test]
    fn test_column_breakpoints() {
        assert_eq!(column_count(320.0), 1);
        assert_eq!(column_count(639.9), 1);
        assert_eq!(column_count(640.0), 2);
        assert_eq!(column_count(767.9), 2);
        assert_eq!(column_count(768.0), 3);
        assert_eq!(column_count(1023.9), 3);
        assert_eq!(column_count(1024.0), 4);
        assert_eq!(column_count(2560.0), 4);
    }

    #[test]
    fn test_initial_window_is_one_page() {
        // 1300px wide -> 4 columns -> pages of 8
        let l = loader(1300.0, "summer", 10);
        assert_eq!(l.visible_count(), 8);
        assert!(l.has_more());
        assert!(!l.is_loading());
    }

    #[test]
    fn test_small_album_fits_in_first_page() {
        let l = loader(1300.0, "tiny", 3);
        assert_eq!(l.visible_count(), 3);
        assert!(!l.has_more());
    }

    #[test]
    fn test_load_more_reaches_the_end() {
        // The worked example: 10 images at 1300px
        let mut l = loader(1300.0, "summer", 10);

        let batch = l.begin_load().expect("first load should start");
        assert_eq!(batch.start, 8);
        assert_eq!(batch.count, 2);
        assert!(l.is_loading());

        assert!(l.complete_load(batch.generation));
        assert_eq!(l.visible_count(), 10);
        assert!(!l.has_more());
        assert!(!l.is_loading());

        // Nothing left: further loads are no-ops
        assert!(l.begin_load().is_none());
    }

    #[test]
    fn test_single_flight_guard() {
        let mut l = loader(700.0, "a", 40); // 2 columns, pages of 4
        assert_eq!(l.visible_count(), 4);

        let batch = l.begin_load().expect("load should start");
        // A second call while loading changes nothing
        assert!(l.begin_load().is_none());
        assert_eq!(l.visible_count(), 4);
        assert!(l.is_loading());

        assert!(l.complete_load(batch.generation));
        assert_eq!(l.visible_count(), 8);
    }

    #[test]
    fn test_initialize_is_idempotent_for_same_album() {
        let mut l = loader(1300.0, "summer", 10);
        let batch = l.begin_load().expect("load should start");

        // Re-initializing with the same album must not disturb anything
        l.initialize("summer", 10);
        assert!(l.is_loading());
        assert!(l.complete_load(batch.generation));
        assert_eq!(l.visible_count(), 10);
    }

    #[test]
    fn test_rescan_with_fewer_images_resets() {
        // A folder rescan can replace an album's image list under the
        // same id; reopening it must not keep the old, larger window.
        let mut l = loader(1300.0, "summer", 10);
        let stale = l.begin_load().expect("load should start");

        l.initialize("summer", 5);
        assert_eq!(l.visible_count(), 5);
        assert!(l.visible_count() <= 5);
        assert!(!l.has_more());
        assert!(!l.is_loading());

        // The batch from before the rescan settles into nothing
        assert!(!l.complete_load(stale.generation));
        assert_eq!(l.visible_count(), 5);
    }

    #[test]
    fn test_album_switch_resets_and_invalidates_batch() {
        let mut l = loader(1300.0, "summer", 10);
        let stale = l.begin_load().expect("load should start");

        l.initialize("winter", 20);
        assert_eq!(l.visible_count(), 8);
        assert!(!l.is_loading());

        // The old batch settles after the switch and must be ignored
        assert!(!l.complete_load(stale.generation));
        assert_eq!(l.visible_count(), 8);
        assert!(l.has_more());
    }

    #[test]
    fn test_resize_changes_future_pages_only() {
        let mut l = loader(1300.0, "summer", 20); // pages of 8
        assert_eq!(l.visible_count(), 8);

        // Narrow to one column: already-visible images stay visible
        l.set_viewport_width(500.0);
        assert_eq!(l.visible_count(), 8);
        assert_eq!(l.page_size(), 2);

        let batch = l.begin_load().expect("load should start");
        assert_eq!(batch.count, 2);
        assert!(l.complete_load(batch.generation));
        assert_eq!(l.visible_count(), 10);
    }

    #[test]
    fn test_visible_count_is_monotone() {
        let mut l = loader(900.0, "a", 17); // 3 columns, pages of 6
        let mut last = l.visible_count();

        while l.has_more() {
            let batch = l.begin_load().expect("load should start");
            assert!(l.complete_load(batch.generation));
            assert!(l.visible_count() >= last);
            assert!(l.visible_count() <= 17);
            assert_eq!(l.has_more(), l.visible_count() < 17);
            last = l.visible_count();
        }

        assert_eq!(l.visible_count(), 17);
    }
}
