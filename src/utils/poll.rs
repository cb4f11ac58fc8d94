//! 有界轮询
//!
//! 固定间隔、固定次数地重复一次检查；次数用完返回 `Ok(None)`，而不是错误。

use anyhow::Result;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// 轮询直到检查返回 `Some`
///
/// # 参数
/// - `check`: 每次轮询执行的检查，`Ok(None)` 表示尚未完成
/// - `interval`: 两次检查之间的等待时间
/// - `max_attempts`: 最大检查次数
///
/// # 返回
/// - `Ok(Some(value))`: 在次数内完成
/// - `Ok(None)`: 次数用完仍未完成
/// - `Err(e)`: 某次检查本身出错，立即返回
pub async fn poll_until<T, F, Fut>(
    mut check: F,
    interval: Duration,
    max_attempts: usize,
) -> Result<Option<T>>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = Result<Option<T>>>,
{
    for attempt in 1..=max_attempts {
        debug!("轮询第 {}/{} 次", attempt, max_attempts);
        if let Some(value) = check(attempt).await? {
            return Ok(Some(value));
        }
        if attempt < max_attempts {
            tokio::time::sleep(interval).await;
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_completes_within_budget() {
        let result = poll_until(
            |attempt| async move { Ok((attempt == 3).then_some(attempt * 10)) },
            Duration::from_millis(1),
            5,
        )
        .await
        .unwrap();
        assert_eq!(result, Some(30));
    }

    #[tokio::test]
    async fn test_budget_exhausted_is_none() {
        let calls = AtomicUsize::new(0);
        let result: Option<()> = poll_until(
            |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok(None) }
            },
            Duration::from_millis(1),
            4,
        )
        .await
        .unwrap();

        assert_eq!(result, None);
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_check_error_propagates() {
        let result: Result<Option<()>> = poll_until(
            |_| async { Err(anyhow::anyhow!("status request failed")) },
            Duration::from_millis(1),
            3,
        )
        .await;
        tokio_test::assert_err!(result);
    }

    #[tokio::test]
    async fn test_zero_attempts() {
        let result: Option<u8> = poll_until(|_| async { Ok(Some(1)) }, Duration::ZERO, 0)
            .await
            .unwrap();
        assert_eq!(result, None);
    }
}
