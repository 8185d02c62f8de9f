//! 取消信号
//!
//! 调用方持有 [`CancelHandle`]，任务持有 [`CancelSignal`]。

use futures::future::select_all;
use tokio::sync::watch;

/// 触发取消的一端
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

/// 监听取消的一端，可以随意 clone
///
/// 可以由多个来源合并而成，任一来源触发即视为已取消。
#[derive(Debug, Clone)]
pub struct CancelSignal {
    sources: Vec<watch::Receiver<bool>>,
}

impl CancelHandle {
    pub fn channel() -> (Self, CancelSignal) {
        let (tx, rx) = watch::channel(false);
        (Self { tx }, CancelSignal { sources: vec![rx] })
    }

    /// 通知所有监听者
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn signal(&self) -> CancelSignal {
        CancelSignal {
            sources: vec![self.tx.subscribe()],
        }
    }
}

impl CancelSignal {
    /// 永远不会被触发的信号
    pub fn never() -> Self {
        let (tx, rx) = watch::channel(false);
        // sender 被丢弃后 changed() 返回错误，cancelled() 会一直挂起
        drop(tx);
        Self { sources: vec![rx] }
    }

    /// 合并两个信号：任一方触发，新信号即触发
    pub fn or(&self, other: &CancelSignal) -> CancelSignal {
        let mut sources = self.sources.clone();
        sources.extend(other.sources.iter().cloned());
        CancelSignal { sources }
    }

    pub fn is_cancelled(&self) -> bool {
        self.sources.iter().any(|rx| *rx.borrow())
    }

    /// 等待直到被取消；所有发送端都已关闭且未取消时永远挂起
    pub async fn cancelled(&self) {
        let waiters = self.sources.iter().cloned().map(|rx| Box::pin(wait_for(rx)));
        select_all(waiters).await;
    }
}

async fn wait_for(mut rx: watch::Receiver<bool>) {
    loop {
        if *rx.borrow_and_update() {
            return;
        }
        if rx.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
