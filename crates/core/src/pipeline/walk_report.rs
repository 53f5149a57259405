use std::fmt;

/// Totals for one dataset walk.
///
/// Every visited entry ends up either displayed or skipped, so
/// `visited == displayed + skipped`. An unlistable FERET subject directory
/// counts as one visited, skipped entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WalkReport {
    pub visited: usize,
    pub displayed: usize,
    pub skipped: usize,
    pub faces: usize,
    pub eyes: usize,
}

impl WalkReport {
    pub fn record_displayed(&mut self, faces: usize, eyes: usize) {
        self.visited += 1;
        self.displayed += 1;
        self.faces += faces;
        self.eyes += eyes;
    }

    pub fn record_skipped(&mut self) {
        self.visited += 1;
        self.skipped += 1;
    }
}

impl fmt::Display for WalkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} visited, {} displayed, {} skipped, {} faces, {} eyes",
            self.visited, self.displayed, self.skipped, self.faces, self.eyes
        )
    }
}
