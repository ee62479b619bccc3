mod alert;
mod circle;
mod common;
mod dispatch;
mod feed;
mod friend;
mod incident;
mod notification;
mod user;

pub use alert::*;
pub use circle::*;
pub use common::*;
pub use dispatch::*;
pub use feed::*;
pub use friend::*;
pub use incident::*;
pub use notification::*;
pub use user::*;
