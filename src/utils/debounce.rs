//! 防抖原语：把静默窗口内的连续更新合并为最后一次
//!
//! 轮询式设计：调用方在事件循环里 submit 新值、定期 poll；
//! 距最后一次 submit 满一个窗口后 poll 才吐出值。

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self { window, pending: None }
    }

    /// 提交新值，覆盖窗口内尚未吐出的旧值并重新计时
    pub fn submit(&mut self, value: T) {
        self.submit_at(Instant::now(), value);
    }

    fn submit_at(&mut self, now: Instant, value: T) {
        self.pending = Some((now, value));
    }

    /// 静默期已满时取出合并后的值，否则返回 None
    pub fn poll(&mut self) -> Option<T> {
        self.poll_at(Instant::now())
    }

    fn poll_at(&mut self, now: Instant) -> Option<T> {
        let ready = matches!(&self.pending,
            Some((submitted, _)) if now.duration_since(*submitted) >= self.window);
        if ready {
            self.pending.take().map(|(_, value)| value)
        } else {
            None
        }
    }

    /// 丢弃未吐出的值
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_none()
    }
}
