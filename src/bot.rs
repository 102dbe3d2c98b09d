pub mod dispatch;
pub mod telegram;
pub mod wizard;
