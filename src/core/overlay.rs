use crate::models::{FilterCriteria, MinRating};

/// Draft filters edited in the "Refine Search" overlay.
///
/// Edits stay local until [`apply`](Self::apply); [`cancel`](Self::cancel)
/// throws them away.
#[derive(Debug, Clone)]
pub struct FilterOverlay {
    draft: FilterCriteria,
}

impl FilterOverlay {
    /// Open the overlay on the currently applied filters
    pub fn open(current: &FilterCriteria) -> Self {
        Self {
            draft: current.clone(),
        }
    }

    pub fn draft(&self) -> &FilterCriteria {
        &self.draft
    }

    pub fn toggle(&mut self, category: &str, value: &str) -> bool {
        self.draft.toggle(category, value)
    }

    pub fn set_min_rating(&mut self, rating: MinRating) {
        self.draft.set_min_rating(rating);
    }

    pub fn reset(&mut self) {
        self.draft.reset();
    }

    /// Close the overlay and hand back the criteria to apply
    pub fn apply(self) -> FilterCriteria {
        self.draft
    }

    pub fn cancel(self) {
        tracing::debug!("Filter overlay cancelled with {}", self.draft.summary());
    }
}
