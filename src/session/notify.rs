//! 通知中枢：瞬时通知的发布、顶替与自动过期
//!
//! 每条通知带单调递增的代号；单线程调度器到期后只在代号仍然
//! 匹配时清除（比较后清除），新通知到来即让旧计时失效，过期
//! 与顶替之间不存在竞态。

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crate::model::events::SessionEvent;

struct HubState {
    /// (代号, 事件)；None 表示当前无通知
    current: Mutex<Option<(u64, SessionEvent)>>,
    generation: AtomicU64,
}

impl HubState {
    /// 只在代号未被更新的通知顶替时清除
    fn clear_if_generation(&self, generation: u64) {
        let mut guard = match self.current.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if matches!(*guard, Some((current, _)) if current == generation) {
            *guard = None;
        }
    }
}

/// 可克隆的通知句柄；克隆体共享同一条当前通知与调度器
#[derive(Clone)]
pub struct NotificationHub {
    state: Arc<HubState>,
    timer_tx: Sender<(u64, Duration)>,
}

impl NotificationHub {
    pub fn new() -> Self {
        let state = Arc::new(HubState {
            current: Mutex::new(None),
            generation: AtomicU64::new(0),
        });
        let (timer_tx, timer_rx) = mpsc::channel::<(u64, Duration)>();

        // 调度线程：同一时刻最多挂一个到期任务，新任务直接顶替
        let scheduler_state = Arc::clone(&state);
        thread::spawn(move || {
            let mut pending: Option<(u64, Instant)> = None;
            loop {
                match pending {
                    None => match timer_rx.recv() {
                        Ok((generation, delay)) => {
                            pending = Some((generation, Instant::now() + delay));
                        }
                        Err(_) => break,
                    },
                    Some((generation, deadline)) => {
                        let now = Instant::now();
                        if now >= deadline {
                            scheduler_state.clear_if_generation(generation);
                            pending = None;
                            continue;
                        }
                        match timer_rx.recv_timeout(deadline - now) {
                            Ok((next_generation, delay)) => {
                                pending = Some((next_generation, Instant::now() + delay));
                            }
                            Err(RecvTimeoutError::Timeout) => {
                                scheduler_state.clear_if_generation(generation);
                                pending = None;
                            }
                            Err(RecvTimeoutError::Disconnected) => break,
                        }
                    }
                }
            }
        });

        Self { state, timer_tx }
    }

    /// 发布通知并按事件自带的时长安排过期；时长为零的事件
    /// 不进调度器，停留到被顶替或显式清除
    pub fn publish(&self, event: SessionEvent) {
        self.publish_with_timeout(event, event.timeout());
    }

    fn publish_with_timeout(&self, event: SessionEvent, timeout: Duration) {
        let generation = self.state.generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut guard = match self.state.current.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            *guard = Some((generation, event));
        }
        if timeout > Duration::ZERO {
            let _ = self.timer_tx.send((generation, timeout));
        }
    }

    pub fn current(&self) -> Option<SessionEvent> {
        match self.state.current.lock() {
            Ok(guard) => guard.map(|(_, event)| event),
            Err(poisoned) => poisoned.into_inner().map(|(_, event)| event),
        }
    }

    pub fn clear(&self) {
        let mut guard = match self.state.current.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = None;
    }

    /// 只清除滞留的解析失败通知（新一轮解析的第一步）
    pub fn clear_parse_failure(&self) {
        let mut guard = match self.state.current.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if matches!(*guard, Some((_, SessionEvent::JsonParsingFailed))) {
            *guard = None;
        }
    }
}

impl Default for NotificationHub {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_and_read_back() {
        let hub = NotificationHub::new();
        assert_eq!(hub.current(), None);

        hub.publish(SessionEvent::FileSaved);
        assert_eq!(hub.current(), Some(SessionEvent::FileSaved));
    }

    #[test]
    fn test_timed_notification_expires() {
        let hub = NotificationHub::new();
        hub.publish_with_timeout(SessionEvent::ContentCopied, Duration::from_millis(30));
        assert_eq!(hub.current(), Some(SessionEvent::ContentCopied));

        thread::sleep(Duration::from_millis(120));
        assert_eq!(hub.current(), None, "到期后应自动清除");
    }

    #[test]
    fn test_newer_notification_survives_old_timer() {
        let hub = NotificationHub::new();
        hub.publish_with_timeout(SessionEvent::ContentCopied, Duration::from_millis(30));
        // 零时长事件顶替后，旧计时器到期不得误清新通知
        hub.publish_with_timeout(SessionEvent::JsonParsingFailed, Duration::ZERO);

        thread::sleep(Duration::from_millis(120));
        assert_eq!(hub.current(), Some(SessionEvent::JsonParsingFailed));
    }

    #[test]
    fn test_compare_and_clear_skips_mismatched_generation() {
        let state = HubState { current: Mutex::new(Some((7, SessionEvent::FileSaved))), generation: AtomicU64::new(7) };
        state.clear_if_generation(3);
        assert!(state.current.lock().unwrap().is_some(), "代号不匹配不应清除");
        state.clear_if_generation(7);
        assert!(state.current.lock().unwrap().is_none());
    }

    #[test]
    fn test_clear_parse_failure_only() {
        let hub = NotificationHub::new();
        hub.publish(SessionEvent::FileSaved);
        hub.clear_parse_failure();
        assert_eq!(hub.current(), Some(SessionEvent::FileSaved), "非解析错误不应被清除");

        hub.publish(SessionEvent::JsonParsingFailed);
        hub.clear_parse_failure();
        assert_eq!(hub.current(), None);
    }
}
