use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

/// 区块浏览器 API 的全局请求间隔控制
///
/// 所有操作共享同一个"上次发出请求时间"，不区分接口。
/// 检查间隔、补足等待、记录时间三步在同一把锁内完成，
/// 因此并发调用的发出时间之间至少相隔 `min_interval`。
#[derive(Debug)]
pub struct RateLimiter {
    last_dispatch: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            last_dispatch: Mutex::new(None),
            min_interval,
        }
    }

    /// 等待到允许发出下一个请求为止，返回本次记录的发出时间
    pub async fn acquire(&self) -> Instant {
        let mut last_dispatch = self.last_dispatch.lock().await;

        if let Some(last) = *last_dispatch {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                let wait_time = self.min_interval - elapsed;
                debug!("请求限流: 等待 {:?} 后再请求区块浏览器", wait_time);
                tokio::time::sleep(wait_time).await;
            }
        }

        let now = Instant::now();
        *last_dispatch = Some(now);
        now
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}
