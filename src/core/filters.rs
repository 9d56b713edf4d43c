use crate::models::{FilterCategory, FilterCriteria, MinRating, BUDGET_TIERS};

/// Filter state transitions
///
/// All operations are synchronous and pure with respect to anything outside
/// the criteria value itself.
impl FilterCriteria {
    /// Toggle `value` in the category named `category`.
    ///
    /// Unknown category names are ignored. Returns whether the criteria changed.
    pub fn toggle(&mut self, category: &str, value: &str) -> bool {
        match category.parse::<FilterCategory>() {
            Ok(category) => self.toggle_in(category, value),
            Err(e) => {
                tracing::debug!("Ignoring toggle: {}", e);
                false
            }
        }
    }

    /// Add `value` to the category if absent, otherwise remove it.
    ///
    /// Budget only accepts the four tier tokens; anything else is ignored.
    pub fn toggle_in(&mut self, category: FilterCategory, value: &str) -> bool {
        if category == FilterCategory::Budget && !BUDGET_TIERS.contains(&value) {
            tracing::debug!("Ignoring unknown budget tier {:?}", value);
            return false;
        }

        let values = self.values_mut(category);
        // shift_remove keeps the remaining selections in order
        if !values.shift_remove(value) {
            values.insert(value.to_string());
        }
        true
    }

    pub fn is_selected(&self, category: FilterCategory, value: &str) -> bool {
        self.values(category).contains(value)
    }

    pub fn set_min_rating(&mut self, rating: MinRating) {
        self.min_rating = rating;
    }

    /// Clear every category and drop the rating back to the floor
    pub fn reset(&mut self) {
        *self = FilterCriteria::default();
    }

    /// Number of selected set values. The rating is always selected and
    /// does not count.
    pub fn active_count(&self) -> usize {
        FilterCategory::ALL
            .iter()
            .map(|category| self.values(*category).len())
            .sum()
    }

    /// Short status line for the search controls
    pub fn summary(&self) -> String {
        match self.active_count() {
            0 => "No filters".to_string(),
            n => format!("{} filters active", n),
        }
    }
}
