//! Async task management for background operations
//!
//! This module handles all background tasks including:
//! - Document loading
//! - Resize debouncing

use crate::document::Document;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Messages sent from background tasks to the main thread
#[derive(Debug)]
pub enum TaskMessage {
    /// Document text read from disk
    DocumentLoaded { text: String, file_path: String },

    /// Document loading failed
    DocumentLoadError { error: String },

    /// Resize event after debounce timeout
    ResizeComplete { width: u16, height: u16 },
}

/// Manages spawning and communication with background tasks
pub struct AsyncTaskRunner {
    tx: mpsc::UnboundedSender<TaskMessage>,
}

impl AsyncTaskRunner {
    /// Create a new task runner
    pub fn new(tx: mpsc::UnboundedSender<TaskMessage>) -> Self {
        Self { tx }
    }

    /// Spawn a task to read a document from disk
    pub fn spawn_load_document(&self, file_path: String) -> JoinHandle<()> {
        let tx = self.tx.clone();
        tokio::spawn(async move { load_document_task(file_path, tx).await })
    }

    /// Spawn a resize debouncer
    ///
    /// Collects resize events and sends a single resize message after debounce timeout
    pub fn spawn_resize_debouncer(&self, debounce_ms: u64) -> mpsc::UnboundedSender<(u16, u16)> {
        let tx = self.tx.clone();
        let (resize_tx, resize_rx) = mpsc::unbounded_channel::<(u16, u16)>();

        tokio::spawn(async move { resize_debounce_task(resize_rx, tx, debounce_ms).await });

        resize_tx
    }
}

/// Background task for reading a document
async fn load_document_task(file_path: String, tx: mpsc::UnboundedSender<TaskMessage>) {
    tracing::info!("Starting document load task: {}", file_path);

    // File I/O is blocking
    let path = PathBuf::from(&file_path);
    let result = tokio::task::spawn_blocking(move || Document::load(&path)).await;

    let message = match result {
        Ok(Ok(text)) => {
            tracing::debug!("Document read: {} bytes", text.len());
            TaskMessage::DocumentLoaded { text, file_path }
        }
        Ok(Err(e)) => {
            tracing::error!("Document load error: {}", e);
            TaskMessage::DocumentLoadError {
                error: e.to_string(),
            }
        }
        Err(e) => {
            tracing::error!("Task join error during document load: {}", e);
            TaskMessage::DocumentLoadError {
                error: format!("Task join error: {}", e),
            }
        }
    };
    let _ = tx.send(message);
}

/// Background task for debouncing resize events
async fn resize_debounce_task(
    mut resize_rx: mpsc::UnboundedReceiver<(u16, u16)>,
    tx: mpsc::UnboundedSender<TaskMessage>,
    debounce_ms: u64,
) {
    tracing::debug!("Resize debouncer started (debounce: {}ms)", debounce_ms);
    let mut last_size: Option<(u16, u16)> = None;

    loop {
        match tokio::time::timeout(Duration::from_millis(debounce_ms), resize_rx.recv()).await {
            Ok(Some(size)) => {
                tracing::debug!("Resize event received: {}x{}", size.0, size.1);
                last_size = Some(size);
            }
            Ok(None) => {
                tracing::debug!("Resize channel closed");
                break;
            }
            Err(_) => {
                // Quiet for a full debounce period
                if let Some((width, height)) = last_size.take() {
                    tracing::info!("Debounced resize event: {}x{}", width, height);
                    let _ = tx.send(TaskMessage::ResizeComplete { width, height });
                }
            }
        }
    }
}
