//! Terminal front end: a line-oriented stand-in for the landing page.
//!
//! Searches and detail lookups run on spawned tasks and report back over a
//! channel, so input keeps flowing while a request is in flight.

pub mod commands;
pub mod map;
pub mod render;

pub use commands::{Command, CommandError, HELP};
pub use map::TracingMap;

use crate::config::Settings;
use crate::core::{
    Completion, FilterOverlay, ImagePolicy, MapSync, Notice, NoticeSink, PendingSearch, RestaurantCard,
    ResultPager, SearchOrchestrator, SearchTicket,
};
use crate::models::RestaurantResult;
use crate::services::{SearchApi, SearchClient, SearchError};
use std::io;
use std::ops::ControlFlow;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

/// A finished background request, delivered back to the REPL loop
#[derive(Debug)]
pub enum ConsoleEvent {
    Search {
        ticket: SearchTicket,
        outcome: Result<Vec<RestaurantResult>, SearchError>,
    },
    Details {
        index: usize,
        name: String,
        outcome: Result<RestaurantResult, SearchError>,
    },
}

pub struct ConsoleApp<N: NoticeSink> {
    orchestrator: SearchOrchestrator<N>,
    map: MapSync<TracingMap>,
    pager: ResultPager,
    images: ImagePolicy,
    overlay: Option<FilterOverlay>,
    client: Arc<SearchClient>,
    events: UnboundedSender<ConsoleEvent>,
    pending_details: usize,
}

impl<N: NoticeSink> ConsoleApp<N> {
    pub fn new(
        settings: &Settings,
        client: Arc<SearchClient>,
        notifier: N,
        events: UnboundedSender<ConsoleEvent>,
    ) -> Self {
        let map = MapSync::from_settings(
            TracingMap::new(settings.map.provider_key.clone()),
            &settings.map,
        );

        Self {
            orchestrator: SearchOrchestrator::new(notifier, settings.map.default_center),
            map,
            pager: ResultPager::new(settings.results.page_size),
            images: ImagePolicy::from_settings(&settings.images),
            overlay: None,
            client,
            events,
            pending_details: 0,
        }
    }

    /// Whether a search or detail lookup is still waiting for its answer
    pub fn is_busy(&self) -> bool {
        self.orchestrator.is_loading() || self.pending_details > 0
    }

    pub fn orchestrator(&self) -> &SearchOrchestrator<N> {
        &self.orchestrator
    }

    pub fn overlay(&self) -> Option<&FilterOverlay> {
        self.overlay.as_ref()
    }

    /// Draw the initial, empty page
    pub fn start(&mut self) {
        self.redraw();
    }

    /// Parse and run one line of input
    pub fn handle_line(&mut self, line: &str) -> ControlFlow<()> {
        match line.parse::<Command>() {
            Ok(command) => self.handle(command),
            Err(e) => {
                println!("{}", e);
                ControlFlow::Continue(())
            }
        }
    }

    pub fn handle(&mut self, command: Command) -> ControlFlow<()> {
        match command {
            Command::Search(location) => {
                let pending = self.orchestrator.begin_search(&location);
                self.dispatch(pending);
            }
            Command::Toggle { category, value } => {
                if let Some(overlay) = self.overlay.as_mut() {
                    if !overlay.toggle(&category, &value) {
                        println!("Nothing to toggle for {} {:?}", category, value);
                    }
                    println!("Draft: {}", overlay.draft().summary());
                } else {
                    let pending = self.orchestrator.toggle_filter(&category, &value);
                    self.report_filters(pending);
                }
            }
            Command::Rating(rating) => {
                if let Some(overlay) = self.overlay.as_mut() {
                    overlay.set_min_rating(rating);
                    println!("Draft minimum rating: {}", rating);
                } else {
                    let pending = self.orchestrator.set_min_rating(rating);
                    self.report_filters(pending);
                }
            }
            Command::Reset => {
                if let Some(overlay) = self.overlay.as_mut() {
                    overlay.reset();
                    println!("Draft: {}", overlay.draft().summary());
                } else {
                    let pending = self.orchestrator.reset_filters();
                    self.report_filters(pending);
                }
            }
            Command::Filters => {
                let overlay = FilterOverlay::open(self.orchestrator.filters());
                println!("Refine search: toggle/rating/reset edit the draft, then `apply` or `cancel`");
                println!("Draft: {}", overlay.draft().summary());
                self.overlay = Some(overlay);
            }
            Command::Apply => match self.overlay.take() {
                Some(overlay) => {
                    let pending = self.orchestrator.apply_filters(overlay.apply());
                    self.report_filters(pending);
                }
                None => println!("No filter overlay open"),
            },
            Command::Cancel => match self.overlay.take() {
                Some(overlay) => overlay.cancel(),
                None => println!("No filter overlay open"),
            },
            Command::More => {
                self.pager.load_more();
                self.print_results();
            }
            Command::Show(index) => self.show_details(index),
            Command::Status => self.print_status(),
            Command::Help => println!("{}", HELP),
            Command::Quit => return ControlFlow::Break(()),
            Command::Empty => {}
        }

        ControlFlow::Continue(())
    }

    /// Read commands until input ends or `quit`, then wait out any request
    /// still in flight.
    pub async fn run<R>(
        &mut self,
        input: R,
        events: &mut UnboundedReceiver<ConsoleEvent>,
        notices: &mut UnboundedReceiver<Notice>,
    ) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        let mut input_open = true;

        // Piped input may close before the last request answers
        while input_open || self.is_busy() {
            tokio::select! {
                line = lines.next_line(), if input_open => {
                    match line? {
                        Some(line) => {
                            if self.handle_line(&line).is_break() {
                                break;
                            }
                        }
                        None => input_open = false,
                    }
                }
                Some(event) = events.recv() => self.on_event(event),
                Some(notice) = notices.recv() => show_notice(&notice),
                else => break,
            }
        }

        // The last completion may have raised a notice on its way out
        while let Ok(notice) = notices.try_recv() {
            show_notice(&notice);
        }

        Ok(())
    }

    /// Apply a finished background request
    pub fn on_event(&mut self, event: ConsoleEvent) {
        match event {
            ConsoleEvent::Search { ticket, outcome } => match self.orchestrator.complete(ticket, outcome) {
                Completion::Stale => {}
                _ => self.redraw(),
            },
            ConsoleEvent::Details { index, name, outcome } => {
                self.pending_details = self.pending_details.saturating_sub(1);
                match outcome {
                    Ok(details) => {
                        let card = RestaurantCard::build(&details, &self.images);
                        print!("{}", render::render_card(index, &card));
                    }
                    Err(e) => {
                        tracing::warn!("Detail lookup for {:?} failed: {}", name, e);
                        println!("Could not load details for {}", name);
                    }
                }
            }
        }
    }

    fn dispatch(&mut self, pending: Option<PendingSearch>) {
        let Some(pending) = pending else { return };
        let (ticket, request) = pending.into_parts();
        let client = self.client.clone();
        let events = self.events.clone();

        tokio::spawn(async move {
            let outcome = client.search(&request).await;
            if events.send(ConsoleEvent::Search { ticket, outcome }).is_err() {
                tracing::debug!("Search finished after the console closed");
            }
        });

        println!("⏳ {}", self.orchestrator.results_header());
    }

    fn report_filters(&mut self, pending: Option<PendingSearch>) {
        println!("Filters: {}", self.orchestrator.filters().summary());
        self.dispatch(pending);
    }

    fn redraw(&mut self) {
        let report = self
            .map
            .sync(self.orchestrator.map_focus(), self.orchestrator.results());

        if let Some(placed) = report.placed {
            println!(
                "Map: {} markers around {} ({} without coordinates)",
                placed,
                self.orchestrator.map_focus(),
                report.skipped
            );
        }
        self.print_results();
    }

    fn print_results(&mut self) {
        let results = self.orchestrator.results().clone();
        let cards: Vec<RestaurantCard> = self
            .pager
            .visible(&results)
            .iter()
            .map(|r| RestaurantCard::build(r, &self.images))
            .collect();
        let status = self.pager.status(&results);

        print!(
            "{}",
            render::render_list(&self.orchestrator.results_header(), &cards, status)
        );
    }

    fn show_details(&mut self, index: usize) {
        let results = self.orchestrator.results().clone();
        let visible = self.pager.visible(&results);

        let Some(restaurant) = index.checked_sub(1).and_then(|i| visible.get(i)) else {
            println!("No result #{} on screen", index);
            return;
        };

        let key = restaurant.key().to_string();
        let name = restaurant.name.clone();
        let client = self.client.clone();
        let events = self.events.clone();
        self.pending_details += 1;

        tokio::spawn(async move {
            let outcome = client.restaurant_details(&key).await;
            if events.send(ConsoleEvent::Details { index, name, outcome }).is_err() {
                tracing::debug!("Detail lookup finished after the console closed");
            }
        });

        println!("⏳ Loading details for result #{}", index);
    }

    fn print_status(&self) {
        let location = match self.orchestrator.location() {
            "" => "(none)",
            l => l,
        };
        println!("Location: {}", location);
        println!("Filters: {}", self.orchestrator.filters().summary());
        println!("State: {:?}", self.orchestrator.phase());
        println!("Map focus: {}", self.orchestrator.map_focus());
        println!("Markers: {}", self.map.marker_count());
        let total = self.orchestrator.results().len();
        println!("Showing: {} of {}", self.pager.revealed().min(total), total);
        if let Some(overlay) = &self.overlay {
            println!("Overlay draft: {}", overlay.draft().summary());
        }
    }
}

fn show_notice(notice: &Notice) {
    println!("⚠️  {}", notice);
}
