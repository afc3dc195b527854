//! # 可观察参数
//!
//! 单线程、同步回调的可观察值。`set` 在返回之前按注册顺序依次通知所有订阅者。
//!
//! ## 通知规则
//! - 写入与当前值相等的值不触发任何回调
//! - 回调签名为 `(old, new)`，返回 `anyhow::Result<()>`
//! - 某个回调返回错误时，仅记录日志，不影响已提交的值，也不影响后续回调
//!
//! ## 依赖关系
//! - 被 `models/base.rs` 和所有领域模型使用
//! - 使用 `tracing` 记录回调失败

use std::fmt;
use std::rc::Rc;

/// 订阅者句柄
///
/// 订阅者身份即 `Rc` 的指针身份，因此重复订阅同一句柄是幂等的。
pub type Subscriber<T> = Rc<dyn Fn(&T, &T) -> anyhow::Result<()>>;

/// 带变更通知的类型化值
pub struct Observable<T> {
    /// 字段名（序列化键与日志使用）
    name: &'static str,
    value: T,
    subscribers: Vec<Subscriber<T>>,
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("name", &self.name)
            .field("value", &self.value)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl<T: Clone + PartialEq> Observable<T> {
    /// 以初始值创建
    pub fn new(name: &'static str, initial_value: T) -> Self {
        Self {
            name,
            value: initial_value,
            subscribers: Vec::new(),
        }
    }

    /// 字段名
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// 当前值（克隆）
    pub fn get(&self) -> T {
        self.value.clone()
    }

    /// 当前值（借用）
    pub fn value(&self) -> &T {
        &self.value
    }

    /// 写入新值
    ///
    /// 仅当新值与当前值不同时才更新并通知订阅者。返回值表示是否发生了变更。
    pub fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }

        let old = std::mem::replace(&mut self.value, value);
        self.notify(&old);
        true
    }

    /// 订阅变更；已订阅的句柄不会重复添加
    pub fn subscribe(&mut self, subscriber: Subscriber<T>) {
        if !self.subscribers.iter().any(|s| same_subscriber(s, &subscriber)) {
            self.subscribers.push(subscriber);
        }
    }

    /// 取消订阅；未订阅的句柄直接忽略
    pub fn unsubscribe(&mut self, subscriber: &Subscriber<T>) {
        self.subscribers.retain(|s| !same_subscriber(s, subscriber));
    }

    /// 当前订阅者数量
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn notify(&self, old: &T) {
        for subscriber in &self.subscribers {
            if let Err(e) = subscriber(old, &self.value) {
                tracing::warn!(field = self.name, error = %e, "observable callback failed");
            }
        }
    }
}

fn same_subscriber<T>(a: &Subscriber<T>, b: &Subscriber<T>) -> bool {
    Rc::as_ptr(a).cast::<()>() == Rc::as_ptr(b).cast::<()>()
}
