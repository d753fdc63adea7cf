//! Change Notifier Implementation
//!
//! 缓存失效与解析变更的同步广播

use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::culture::CultureCode;
use crate::domain::voice::DialogueId;

/// 变更事件
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data")]
pub enum VoiceCultureEvent {
    /// 当前文化已切换
    CultureChanged {
        culture: CultureCode,
        generation: u64,
    },
    /// 某台词的条目被编辑，相关缓存已失效
    EntryInvalidated { dialogue_id: DialogueId },
    /// 授权数据整表重载
    DataReloaded,
}

/// 订阅句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

type EventCallback = Arc<dyn Fn(&VoiceCultureEvent) + Send + Sync>;

/// 变更通知器
///
/// 在调用线程上按订阅顺序同步投递。需要延迟处理的订阅者
/// （如要回到音频线程重新取句柄的播放系统）自行转发。
pub struct ChangeNotifier {
    subscribers: RwLock<Vec<(SubscriptionId, EventCallback)>>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self {
            subscribers: RwLock::new(Vec::new()),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 注册订阅者，返回用于退订的句柄
    pub fn subscribe(
        &self,
        callback: impl Fn(&VoiceCultureEvent) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(Uuid::new_v4());
        self.subscribers.write().push((id, Arc::new(callback)));
        id
    }

    /// 退订，返回是否确有移除
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.write();
        let before = subscribers.len();
        subscribers.retain(|(sid, _)| *sid != id);
        subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }

    /// 清空订阅者（引擎停机时调用）
    pub fn clear(&self) {
        self.subscribers.write().clear();
    }

    /// 发布文化切换事件
    pub fn publish_culture_changed(&self, culture: CultureCode, generation: u64) {
        self.publish(VoiceCultureEvent::CultureChanged {
            culture,
            generation,
        });
    }

    /// 发布条目失效事件
    pub fn publish_entry_invalidated(&self, dialogue_id: DialogueId) {
        self.publish(VoiceCultureEvent::EntryInvalidated { dialogue_id });
    }

    /// 发布整表重载事件
    pub fn publish_data_reloaded(&self) {
        self.publish(VoiceCultureEvent::DataReloaded);
    }

    /// 按订阅顺序同步投递
    ///
    /// 先在锁内拍快照再逐个调用，回调内可以安全地订阅/退订。
    fn publish(&self, event: VoiceCultureEvent) {
        let snapshot: Vec<EventCallback> = self
            .subscribers
            .read()
            .iter()
            .map(|(_, callback)| callback.clone())
            .collect();

        for callback in &snapshot {
            callback(&event);
        }

        tracing::trace!(subscribers = snapshot.len(), "Event published");
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    fn culture(s: &str) -> CultureCode {
        CultureCode::new(s).unwrap()
    }

    #[test]
    fn test_delivery_in_subscription_order() {
        let notifier = ChangeNotifier::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        let first = order.clone();
        notifier.subscribe(move |_| first.lock().push("first"));
        let second = order.clone();
        notifier.subscribe(move |_| second.lock().push("second"));

        notifier.publish_data_reloaded();

        assert_eq!(*order.lock(), vec!["first", "second"]);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let notifier = ChangeNotifier::new();
        let count = Arc::new(Mutex::new(0u32));

        let counter = count.clone();
        let id = notifier.subscribe(move |_| *counter.lock() += 1);

        notifier.publish_culture_changed(culture("fr"), 1);
        assert!(notifier.unsubscribe(id));
        notifier.publish_culture_changed(culture("en"), 2);

        assert_eq!(*count.lock(), 1);
        assert!(!notifier.unsubscribe(id));
    }

    #[test]
    fn test_callback_payload() {
        let notifier = ChangeNotifier::new();
        let seen = Arc::new(Mutex::new(None));

        let sink = seen.clone();
        notifier.subscribe(move |event| {
            if let VoiceCultureEvent::CultureChanged { culture, generation } = event {
                *sink.lock() = Some((culture.clone(), *generation));
            }
        });

        notifier.publish_culture_changed(culture("fr-ca"), 7);

        assert_eq!(*seen.lock(), Some((culture("fr-ca"), 7)));
    }

    #[test]
    fn test_subscribe_inside_callback_does_not_deadlock() {
        let notifier = ChangeNotifier::new().arc();

        let inner = notifier.clone();
        notifier.subscribe(move |_| {
            inner.subscribe(|_| {});
        });

        notifier.publish_data_reloaded();
        assert_eq!(notifier.subscriber_count(), 2);
    }
}
