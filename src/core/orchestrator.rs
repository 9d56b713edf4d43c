use crate::core::notify::{Notice, NoticeSink};
use crate::models::{Coordinates, FilterCriteria, MinRating, RestaurantResult, ResultSet, SearchRequest};
use crate::services::{SearchApi, SearchError};

/// Observable search lifecycle.
///
/// A failed search passes through a transient failure state and settles on
/// `Idle`, so failure is never observed here; see [`Completion::Failed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPhase {
    #[default]
    Idle,
    Loading,
    Success,
}

/// Identifies one issued search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchTicket(u64);

/// A search that has been issued but not yet answered
#[derive(Debug, Clone)]
pub struct PendingSearch {
    ticket: SearchTicket,
    request: SearchRequest,
}

impl PendingSearch {
    pub fn ticket(&self) -> SearchTicket {
        self.ticket
    }

    pub fn request(&self) -> &SearchRequest {
        &self.request
    }

    pub fn into_parts(self) -> (SearchTicket, SearchRequest) {
        (self.ticket, self.request)
    }
}

/// How a response was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Results replaced with this many restaurants
    Succeeded(usize),
    /// Results cleared and the user notified
    Failed,
    /// A newer search was issued; the response was ignored
    Stale,
}

/// Owns location, filters, results and loading state for the landing page.
///
/// Searches are split in two steps so the caller can run the request
/// wherever it likes: `begin_*`/`apply_*` issue a [`PendingSearch`], and
/// [`complete`](Self::complete) feeds the response back. Only the response
/// to the most recently issued search may touch state.
pub struct SearchOrchestrator<N: NoticeSink> {
    notifier: N,
    location: String,
    filters: FilterCriteria,
    results: ResultSet,
    phase: SearchPhase,
    map_focus: Coordinates,
    last_issued: u64,
    revision: u64,
}

impl<N: NoticeSink> SearchOrchestrator<N> {
    pub fn new(notifier: N, default_focus: Coordinates) -> Self {
        Self {
            notifier,
            location: String::new(),
            filters: FilterCriteria::default(),
            results: ResultSet::default(),
            phase: SearchPhase::Idle,
            map_focus: default_focus,
            last_issued: 0,
            revision: 0,
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn filters(&self) -> &FilterCriteria {
        &self.filters
    }

    pub fn results(&self) -> &ResultSet {
        &self.results
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == SearchPhase::Loading
    }

    pub fn map_focus(&self) -> Coordinates {
        self.map_focus
    }

    /// Heading above the result list
    pub fn results_header(&self) -> String {
        if self.is_loading() {
            "Searching...".to_string()
        } else if !self.results.is_empty() {
            format!("Found {} restaurants", self.results.len())
        } else {
            "Search to discover restaurants".to_string()
        }
    }

    /// Search for `location` with the current filters.
    ///
    /// A blank location raises [`Notice::MissingLocation`] and issues nothing.
    pub fn begin_search(&mut self, location: &str) -> Option<PendingSearch> {
        match SearchRequest::new(location, self.filters.clone()) {
            Ok(request) => {
                self.location = request.location.clone();
                Some(self.issue(request))
            }
            Err(e) => {
                tracing::debug!("Search refused: {}", e);
                self.notifier.notify(Notice::MissingLocation);
                None
            }
        }
    }

    /// Search again for the stored location
    pub fn refresh(&mut self) -> Option<PendingSearch> {
        let location = self.location.clone();
        self.begin_search(&location)
    }

    /// Replace the filters; re-search at once when a location is already set
    pub fn apply_filters(&mut self, filters: FilterCriteria) -> Option<PendingSearch> {
        self.filters = filters;
        tracing::debug!("Filters applied: {}", self.filters.summary());

        match SearchRequest::new(&self.location, self.filters.clone()) {
            Ok(request) => Some(self.issue(request)),
            Err(_) => None,
        }
    }

    /// Toggle one filter value, following the [`apply_filters`](Self::apply_filters) rule
    pub fn toggle_filter(&mut self, category: &str, value: &str) -> Option<PendingSearch> {
        let mut filters = self.filters.clone();
        if !filters.toggle(category, value) {
            return None;
        }
        self.apply_filters(filters)
    }

    pub fn set_min_rating(&mut self, rating: MinRating) -> Option<PendingSearch> {
        if self.filters.min_rating() == rating {
            return None;
        }
        let mut filters = self.filters.clone();
        filters.set_min_rating(rating);
        self.apply_filters(filters)
    }

    pub fn reset_filters(&mut self) -> Option<PendingSearch> {
        if self.filters == FilterCriteria::default() {
            return None;
        }
        self.apply_filters(FilterCriteria::default())
    }

    fn issue(&mut self, request: SearchRequest) -> PendingSearch {
        self.last_issued += 1;
        self.phase = SearchPhase::Loading;

        tracing::info!(
            "Searching {:?} with {} (request #{})",
            request.location,
            request.filters.summary(),
            self.last_issued
        );

        PendingSearch {
            ticket: SearchTicket(self.last_issued),
            request,
        }
    }

    /// Feed a search response back in
    pub fn complete(
        &mut self,
        ticket: SearchTicket,
        outcome: Result<Vec<RestaurantResult>, SearchError>,
    ) -> Completion {
        if ticket.0 != self.last_issued {
            tracing::warn!(
                "Ignoring stale response for request #{} (latest is #{})",
                ticket.0,
                self.last_issued
            );
            return Completion::Stale;
        }

        self.revision += 1;

        match outcome {
            Ok(restaurants) => {
                if let Some(focus) = restaurants.first().and_then(RestaurantResult::coordinates) {
                    self.map_focus = focus;
                }
                let count = restaurants.len();
                self.results = ResultSet::new(self.revision, restaurants);
                self.phase = SearchPhase::Success;

                tracing::info!("Found {} restaurants for {:?}", count, self.location);
                Completion::Succeeded(count)
            }
            Err(e) => {
                self.results = ResultSet::new(self.revision, Vec::new());
                self.phase = SearchPhase::Idle;

                tracing::error!("Search for {:?} failed: {}", self.location, e);
                self.notifier.notify(Notice::SearchFailed { reason: e.to_string() });
                Completion::Failed
            }
        }
    }

    /// Run an issued search against `api` and apply the response
    pub async fn run<A>(&mut self, api: &A, pending: PendingSearch) -> Completion
    where
        A: SearchApi + ?Sized,
    {
        let (ticket, request) = pending.into_parts();
        let outcome = api.search(&request).await;
        self.complete(ticket, outcome)
    }

    /// [`begin_search`](Self::begin_search) and wait for the answer
    pub async fn search<A>(&mut self, api: &A, location: &str) -> Option<Completion>
    where
        A: SearchApi + ?Sized,
    {
        let pending = self.begin_search(location)?;
        Some(self.run(api, pending).await)
    }

    /// [`apply_filters`](Self::apply_filters) and wait for any triggered search
    pub async fn apply_filters_and_search<A>(
        &mut self,
        api: &A,
        filters: FilterCriteria,
    ) -> Option<Completion>
    where
        A: SearchApi + ?Sized,
    {
        let pending = self.apply_filters(filters)?;
        Some(self.run(api, pending).await)
    }
}
