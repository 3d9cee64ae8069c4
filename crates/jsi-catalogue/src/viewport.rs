/// Responsive width tier, mirroring the page's CSS breakpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportTier {
    Wide,
    Medium,
    Narrow,
}

/// How many cards a grid shows per tier, and how far one click moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityPolicy {
    pub wide_min_width: u32,
    pub medium_min_width: u32,
    pub wide_count: usize,
    pub medium_count: usize,
    pub narrow_count: usize,
    pub step: usize,
}

impl Default for VisibilityPolicy {
    fn default() -> Self {
        Self {
            wide_min_width: 992,
            medium_min_width: 768,
            wide_count: 6,
            medium_count: 4,
            narrow_count: 2,
            step: 6,
        }
    }
}

impl VisibilityPolicy {
    pub fn tier(&self, width: u32) -> ViewportTier {
        if width >= self.wide_min_width {
            ViewportTier::Wide
        } else if width >= self.medium_min_width {
            ViewportTier::Medium
        } else {
            ViewportTier::Narrow
        }
    }

    pub fn default_visible(&self, width: u32) -> usize {
        match self.tier(width) {
            ViewportTier::Wide => self.wide_count,
            ViewportTier::Medium => self.medium_count,
            ViewportTier::Narrow => self.narrow_count,
        }
    }
}
