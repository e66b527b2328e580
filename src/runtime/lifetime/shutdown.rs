use tracing::{error, warn};

/// Ctrl+C 到达时返回；信号监听装不上时永不返回，交由服务自身结束
pub async fn listen_for_shutdown() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => warn!("Ctrl+C received, stopping exam admin server"),
        Err(e) => {
            error!("Failed to listen for Ctrl+C, shutdown signal disabled: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
