// Core coordination exports
pub mod bounds;
pub mod cards;
pub mod filters;
pub mod map_sync;
pub mod notify;
pub mod orchestrator;
pub mod overlay;
pub mod pager;

pub use bounds::{marker_bounds, is_within_bounds};
pub use cards::{ImagePolicy, RestaurantCard};
pub use map_sync::{MapProvider, MapSync, MarkerPopup, MarkerSpec, SyncReport};
pub use notify::{ChannelNotifier, Notice, NoticeSink};
pub use orchestrator::{Completion, PendingSearch, SearchOrchestrator, SearchPhase, SearchTicket};
pub use overlay::FilterOverlay;
pub use pager::{ListStatus, ResultPager};
