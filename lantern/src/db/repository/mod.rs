mod alerts;
mod circles;
mod friends;
mod incidents;
mod notifications;
mod users;

pub use alerts::AlertRepository;
pub use circles::{CircleMemberRepository, CircleRepository};
pub use friends::FriendRepository;
pub use incidents::{NewsRepository, ReportRepository};
pub use notifications::NotificationRepository;
pub use users::UserRepository;
