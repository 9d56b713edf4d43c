// Integration tests for Restaurant Finder

use async_trait::async_trait;
use geo::Rect;
use restaurant_finder::core::{
    bounds::is_within_bounds, ChannelNotifier, Completion, MapProvider, MapSync, MarkerSpec, Notice,
    ResultPager, SearchOrchestrator, SearchPhase,
};
use restaurant_finder::models::{Coordinates, FilterCriteria, RestaurantResult, SearchRequest};
use restaurant_finder::services::{SearchApi, SearchClient, SearchError};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::oneshot;

const NYC: Coordinates = Coordinates::new(40.7128, -74.0060);

/// Map double that remembers what is on screen
#[derive(Default)]
struct RecordingMap {
    views: Vec<Coordinates>,
    next_id: usize,
    live: BTreeMap<usize, Coordinates>,
    viewport: Option<Rect<f64>>,
}

impl MapProvider for RecordingMap {
    type Marker = usize;

    fn init_view(&mut self, center: Coordinates, _zoom: u8) {
        self.views.push(center);
    }

    fn place_marker(&mut self, spec: &MarkerSpec) -> usize {
        self.next_id += 1;
        self.live.insert(self.next_id, spec.position);
        self.next_id
    }

    fn remove_marker(&mut self, marker: usize) {
        self.live.remove(&marker);
    }

    fn fit_bounds(&mut self, bounds: Rect<f64>, _padding: u32) {
        self.viewport = Some(bounds);
    }
}

/// Counts calls and answers with nothing
#[derive(Default)]
struct CountingApi {
    calls: AtomicUsize,
}

#[async_trait]
impl SearchApi for CountingApi {
    async fn search(&self, _request: &SearchRequest) -> Result<Vec<RestaurantResult>, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![])
    }
}

/// Answers each location only when the test releases it
struct GatedApi {
    gates: Mutex<HashMap<String, oneshot::Receiver<Vec<RestaurantResult>>>>,
}

impl GatedApi {
    fn new(gates: Vec<(&str, oneshot::Receiver<Vec<RestaurantResult>>)>) -> Self {
        Self {
            gates: Mutex::new(gates.into_iter().map(|(l, rx)| (l.to_string(), rx)).collect()),
        }
    }
}

#[async_trait]
impl SearchApi for GatedApi {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<RestaurantResult>, SearchError> {
        let gate = self.gates.lock().unwrap().remove(&request.location);
        match gate {
            Some(rx) => rx
                .await
                .map_err(|_| SearchError::InvalidResponse("gate dropped".into())),
            None => Err(SearchError::InvalidResponse(format!("no gate for {}", request.location))),
        }
    }
}

fn orchestrator() -> (SearchOrchestrator<ChannelNotifier>, UnboundedReceiver<Notice>) {
    let (notifier, rx) = ChannelNotifier::channel();
    (SearchOrchestrator::new(notifier, NYC), rx)
}

fn restaurant(name: &str, lat: f64, lng: f64) -> RestaurantResult {
    RestaurantResult {
        id: Some(name.to_lowercase().replace(' ', "_")),
        name: name.to_string(),
        address: format!("{} Broadway", name.len()),
        latitude: Some(lat),
        longitude: Some(lng),
        rating: Some(4.2),
        ..Default::default()
    }
}

/// 15 restaurants, the last 3 without coordinates
fn new_york_payload() -> serde_json::Value {
    let restaurants: Vec<serde_json::Value> = (0..15)
        .map(|i| {
            if i < 12 {
                serde_json::json!({
                    "id": format!("r{}", i),
                    "name": format!("Restaurant {}", i),
                    "address": format!("{} 5th Ave", i + 1),
                    "latitude": 40.70 + i as f64 * 0.005,
                    "longitude": -74.01 + i as f64 * 0.003,
                    "rating": 4.0,
                    "budget": "$$",
                    "cuisines": ["American"]
                })
            } else {
                serde_json::json!({
                    "id": format!("r{}", i),
                    "name": format!("Restaurant {}", i),
                    "address": "Unknown"
                })
            }
        })
        .collect();

    serde_json::json!({ "totalFound": 15, "location": "New York", "restaurants": restaurants })
}

#[tokio::test]
async fn test_integration_new_york_scenario() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/restaurants/search")
        .match_body(mockito::Matcher::PartialJson(serde_json::json!({
            "location": "New York",
            "filters": {"dietary": [], "minRating": 3.5}
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(new_york_payload().to_string())
        .create_async()
        .await;

    let client = SearchClient::new(server.url(), Duration::from_secs(5)).unwrap();
    let (mut orch, mut notices) = orchestrator();
    let mut map = MapSync::new(RecordingMap::default(), 13, 50);
    let mut pager = ResultPager::new(10);

    let completion = orch.search(&client, "New York").await;

    mock.assert_async().await;
    assert_eq!(completion, Some(Completion::Succeeded(15)));
    assert!(!orch.is_loading());
    assert!(notices.try_recv().is_err());

    // Result list: 10, then 15 after one "load more"
    assert_eq!(pager.visible(orch.results()).len(), 10);
    pager.load_more();
    assert_eq!(pager.visible(orch.results()).len(), 15);

    // Map: 12 markers, viewport bounding all of them
    let report = map.sync(orch.map_focus(), orch.results());
    assert_eq!(report.placed, Some(12));
    assert_eq!(report.skipped, 3);

    let provider = map.provider();
    assert_eq!(provider.live.len(), 12);
    let viewport = provider.viewport.expect("viewport fitted");
    assert!(provider.live.values().all(|c| is_within_bounds(*c, &viewport)));

    // Focus moved to the first result
    assert_eq!(orch.map_focus(), Coordinates::new(40.70, -74.01));
    assert_eq!(provider.views, vec![Coordinates::new(40.70, -74.01)]);
}

#[tokio::test]
async fn test_integration_filter_toggle_auto_searches() {
    let mut server = mockito::Server::new_async().await;
    let plain = server
        .mock("POST", "/api/restaurants/search")
        .match_body(mockito::Matcher::PartialJson(serde_json::json!({
            "location": "New York",
            "filters": {"dietary": []}
        })))
        .with_status(200)
        .with_body(r#"{"restaurants": []}"#)
        .create_async()
        .await;
    let vegan = server
        .mock("POST", "/api/restaurants/search")
        .match_body(mockito::Matcher::PartialJson(serde_json::json!({
            "location": "New York",
            "filters": {"dietary": ["Vegan"]}
        })))
        .with_status(200)
        .with_body(r#"{"restaurants": [{"id": "v", "name": "Green Leaf", "address": "1 Bleecker St"}]}"#)
        .create_async()
        .await;

    let client = SearchClient::new(server.url(), Duration::from_secs(5)).unwrap();
    let (mut orch, _notices) = orchestrator();

    orch.search(&client, "New York").await;

    let pending = orch.toggle_filter("dietary", "Vegan").expect("auto search issued");
    assert_eq!(orch.phase(), SearchPhase::Loading);
    let completion = orch.run(&client, pending).await;

    plain.assert_async().await;
    vegan.assert_async().await;
    assert_eq!(completion, Completion::Succeeded(1));
    assert_eq!(orch.results().as_slice()[0].name, "Green Leaf");
}

#[tokio::test]
async fn test_integration_server_error_returns_to_idle() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/restaurants/search")
        .with_status(500)
        .with_body(r#"{"detail": "Search error: upstream"}"#)
        .create_async()
        .await;

    let client = SearchClient::new(server.url(), Duration::from_secs(5)).unwrap();
    let (mut orch, mut notices) = orchestrator();

    let completion = orch.search(&client, "New York").await;

    assert_eq!(completion, Some(Completion::Failed));
    assert!(orch.results().is_empty());
    assert!(!orch.is_loading());
    assert_eq!(orch.phase(), SearchPhase::Idle);

    let notice = notices.try_recv().unwrap();
    assert!(notice.is_error());
    assert_eq!(notice.message(), "Error searching restaurants. Please try again.");
}

#[tokio::test]
async fn test_integration_network_error_returns_to_idle() {
    let client = SearchClient::new("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();
    let (mut orch, mut notices) = orchestrator();

    assert_eq!(orch.search(&client, "New York").await, Some(Completion::Failed));
    assert!(!orch.is_loading());
    assert!(notices.try_recv().unwrap().is_error());
}

#[tokio::test]
async fn test_integration_blank_location_never_calls_api() {
    let api = CountingApi::default();
    let (mut orch, mut notices) = orchestrator();

    assert_eq!(orch.search(&api, "").await, None);
    assert_eq!(orch.search(&api, "   \t").await, None);

    let mut filters = FilterCriteria::default();
    filters.toggle("cuisines", "Mexican");
    assert_eq!(orch.apply_filters_and_search(&api, filters).await, None);

    assert_eq!(api.calls.load(Ordering::SeqCst), 0);
    assert_eq!(notices.try_recv().unwrap(), Notice::MissingLocation);
    assert_eq!(notices.try_recv().unwrap(), Notice::MissingLocation);
    assert!(notices.try_recv().is_err());
}

#[tokio::test]
async fn test_integration_stale_response_guard() {
    let (slow_tx, slow_rx) = oneshot::channel();
    let (fast_tx, fast_rx) = oneshot::channel();
    let api = Arc::new(GatedApi::new(vec![("Chicago", slow_rx), ("Boston", fast_rx)]));
    let (mut orch, _notices) = orchestrator();

    let (slow_ticket, slow_request) = orch.begin_search("Chicago").unwrap().into_parts();
    let (fast_ticket, fast_request) = orch.begin_search("Boston").unwrap().into_parts();

    let slow = tokio::spawn({
        let api = api.clone();
        async move { api.search(&slow_request).await }
    });
    let fast = tokio::spawn({
        let api = api.clone();
        async move { api.search(&fast_request).await }
    });

    // Second search answers first
    fast_tx.send(vec![restaurant("Neptune Oyster", 42.3633, -71.0560)]).unwrap();
    let fast_outcome = fast.await.unwrap();
    assert_eq!(orch.complete(fast_ticket, fast_outcome), Completion::Succeeded(1));

    slow_tx.send(vec![restaurant("Lou Malnati", 41.8903, -87.6339), restaurant("Portillo", 41.8934, -87.6313)]).unwrap();
    let slow_outcome = slow.await.unwrap();
    assert_eq!(orch.complete(slow_ticket, slow_outcome), Completion::Stale);

    let names: Vec<&str> = orch.results().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Neptune Oyster"]);
    assert_eq!(orch.map_focus(), Coordinates::new(42.3633, -71.0560));
    assert!(!orch.is_loading());
}

#[tokio::test]
async fn test_integration_map_follows_successive_searches() {
    let (mut orch, _notices) = orchestrator();
    let mut map = MapSync::new(RecordingMap::default(), 13, 50);
    map.sync(orch.map_focus(), orch.results());

    let first = orch.begin_search("Boston").unwrap();
    orch.complete(
        first.ticket(),
        Ok(vec![restaurant("A", 42.36, -71.05), restaurant("B", 42.35, -71.06)]),
    );
    map.sync(orch.map_focus(), orch.results());
    assert_eq!(map.provider().live.len(), 2);

    // Same focus, different results: markers rebuilt, view kept
    let second = orch.refresh().unwrap();
    orch.complete(second.ticket(), Ok(vec![restaurant("A", 42.36, -71.05)]));
    map.sync(orch.map_focus(), orch.results());
    assert_eq!(map.provider().live.len(), 1);
    assert_eq!(map.provider().views.len(), 2);

    // Failure clears the map too
    let third = orch.refresh().unwrap();
    orch.complete(third.ticket(), Err(SearchError::InvalidResponse("bad".into())));
    let report = map.sync(orch.map_focus(), orch.results());
    assert_eq!(report.placed, Some(0));
    assert!(map.provider().live.is_empty());
}
