//! Events - 变更通知
//!
//! 订阅者列表 + 同步有序投递

mod notifier;

pub use notifier::{ChangeNotifier, SubscriptionId, VoiceCultureEvent};
