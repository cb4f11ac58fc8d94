//! 应用生命周期 - 编排层
//!
//! 负责组装依赖（OCR 客户端、LLM 服务、请求处理器）、绑定监听端口，
//! 并在收到 Ctrl+C / SIGTERM 后优雅关闭。

use anyhow::{Context, Result};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use crate::clients::{DocumentReader, OcrClient};
use crate::config::Config;
use crate::orchestrator::request_processor::RequestProcessor;
use crate::orchestrator::routes::{routes, AppState};
use crate::services::{ChatBackend, LlmService};

/// 应用主结构
pub struct App {
    listener: TcpListener,
    router: Router,
}

impl App {
    /// 初始化应用：使用真实的 OCR / LLM 服务
    pub async fn initialize(config: Config) -> Result<Self> {
        let reader: Arc<dyn DocumentReader> = Arc::new(OcrClient::new(&config));
        let llm = LlmService::new(&config);
        info!("🤖 LLM 模型: {}", llm.model_name());
        let backend: Arc<dyn ChatBackend> = Arc::new(llm);

        Self::with_components(config, reader, backend).await
    }

    /// 使用给定的文档识别器和对话后端初始化应用
    ///
    /// # 参数
    /// - `config`: 监听地址、上传上限、日志开关
    /// - `reader`: 文档识别器
    /// - `backend`: LLM 对话后端
    pub async fn with_components(
        config: Config,
        reader: Arc<dyn DocumentReader>,
        backend: Arc<dyn ChatBackend>,
    ) -> Result<Self> {
        let processor = RequestProcessor::new(reader, backend, config.verbose_logging);
        let state = AppState {
            processor: Arc::new(processor),
        };
        let router = routes(state, config.max_upload_mb * 1024 * 1024);

        let listener = TcpListener::bind(&config.bind_addr)
            .await
            .with_context(|| format!("无法绑定监听地址 {}", config.bind_addr))?;

        Ok(Self { listener, router })
    }

    /// 实际监听的地址（绑定端口 0 时由系统分配）
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// 运行服务直到收到关闭信号
    pub async fn run(self) -> Result<()> {
        info!("🚀 服务已启动: http://{}", self.local_addr()?);

        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("👋 服务已关闭");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("❌ 无法监听 Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("收到 Ctrl+C，准备关闭"),
        _ = terminate => info!("收到 SIGTERM，准备关闭"),
    }
}
