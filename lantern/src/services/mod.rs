mod alerts;
mod circles;
mod dispatch;
mod feed;
mod friends;
pub mod news;
mod reports;
mod trust_graph;

pub use alerts::AlertService;
pub use circles::CircleService;
pub use dispatch::{truncate_message, AlertDispatcher};
pub use feed::FeedService;
pub use friends::FriendService;
pub use news::{IngestSummary, NewsIngestItem, NewsService};
pub use reports::{NewReport, ReportService};
pub use trust_graph::{TrustGraph, TrustGraphResolver};
