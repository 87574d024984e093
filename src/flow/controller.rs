/// アップロードフローコントローラー
///
/// 1つの `UploadSession` を所有し、次の操作を提供する。
///
/// - `select_file`: ファイル選択
/// - `submit`: アップロード先の要求 → ファイル読み込み → 転送 → 共有リンク公開
/// - `abort`: 送信中の試行の中断（別タスクから呼んでよい）
/// - `copy_share_link`: 共有リンクのコピー
/// - `reset`: 完了後、次のアップロードに向けた初期化
///
/// 中断トークン（`AbortHandle`）は送信のたびに新しく作る。
use crate::api::client::ApiClient;
use crate::api::error::InfraError;
use crate::api::types::UploadDestinationRequest;
use crate::config::APP_CONFIG;
use crate::domain::error::DomainError;
use crate::domain::notification::{LINK_COPIED, Notification, UPLOAD_ABORTED, UPLOAD_SUCCEEDED};
use crate::domain::progress::{UploadEvent, UploadProgress};
use crate::domain::session::{AttemptId, SelectedFile, UploadSession};
use crate::domain::share_link::build_share_url;
use crate::flow::{ClipboardWriter, UploadObserver};
use bytes::Bytes;
use futures::future::{AbortHandle, Abortable};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// `submit` の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// ファイル未選択、または送信中・完了済みのため何もしなかった
    Skipped,
    /// 転送完了
    Completed {
        upload_id: String,
        share_url: String,
    },
    /// ユーザーが中断した（通知は `abort` 側で出している）
    Aborted,
}

pub struct UploadController {
    client: ApiClient,
    share_base_url: String,
    chunk_size: usize,
    transfer_timeout: Option<Duration>,
    session: Arc<Mutex<UploadSession>>,
    in_flight: Mutex<Option<(AttemptId, AbortHandle)>>,
    observer: Arc<dyn UploadObserver>,
}

impl UploadController {
    /// 新しいコントローラーを作成
    ///
    /// 共有リンクのベースにはクライアントのベースURLを使う。
    /// 転送のタイムアウトは既定では無制限（`with_transfer_timeout` で設定）。
    pub fn new(client: ApiClient, observer: Arc<dyn UploadObserver>) -> Self {
        Self {
            share_base_url: client.base_url().to_string(),
            client,
            chunk_size: APP_CONFIG.upload.progress_chunk_size,
            transfer_timeout: None,
            session: Arc::new(Mutex::new(UploadSession::new())),
            in_flight: Mutex::new(None),
            observer,
        }
    }

    pub fn with_transfer_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.transfer_timeout = timeout;
        self
    }

    /// セッションの現在の状態（コピー）
    pub fn snapshot(&self) -> UploadSession {
        self.session.lock().clone()
    }

    #[cfg(test)]
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.lock().is_some()
    }

    /// ファイルを選択する
    ///
    /// `None` や送信中の選択は無視される。
    pub fn select_file(&self, candidate: Option<SelectedFile>) -> bool {
        let event = candidate.as_ref().map(|file| UploadEvent::FileSelected {
            file_name: file.name.clone(),
            size_bytes: file.size,
            content_type: file.content_type.clone(),
        });

        let accepted = self.session.lock().select_file(candidate);
        if accepted {
            if let Some(event) = event {
                self.emit(event);
            }
        } else {
            debug!("file selection ignored");
        }
        accepted
    }

    /// 選択中のファイルをアップロードする
    ///
    /// 失敗時はユーザーに通知し、ファイルを保持したまま Idle に戻してからエラーを返す。
    ///
    /// # Returns
    /// * `Ok(SubmitOutcome)` - 完了・中断・スキップ
    /// * `Err(InfraError)` - アップロード先の要求、ファイル読み込み、転送のいずれかが失敗
    pub async fn submit(&self) -> Result<SubmitOutcome, InfraError> {
        let (attempt, file, registration) = {
            let mut in_flight = self.in_flight.lock();
            if in_flight.is_some() {
                debug!("submission already in flight");
                return Ok(SubmitOutcome::Skipped);
            }

            let mut session = self.session.lock();
            let Some(file) = session.file().cloned() else {
                debug!("no file selected, nothing to submit");
                return Ok(SubmitOutcome::Skipped);
            };
            let Some(attempt) = session.reserve_attempt() else {
                debug!(phase = ?session.phase(), "session is not idle, nothing to submit");
                return Ok(SubmitOutcome::Skipped);
            };

            let (handle, registration) = AbortHandle::new_pair();
            *in_flight = Some((attempt, handle));
            (attempt, file, registration)
        };

        let result = Abortable::new(self.run_attempt(attempt, &file), registration).await;

        {
            let mut in_flight = self.in_flight.lock();
            if matches!(in_flight.as_ref(), Some((current, _)) if *current == attempt) {
                in_flight.take();
            }
        }

        match result {
            Err(_aborted) => Ok(SubmitOutcome::Aborted),
            Ok(Ok(Some((upload_id, share_url)))) => {
                info!(%upload_id, %share_url, "upload completed");
                self.emit(UploadEvent::Completed {
                    upload_id: upload_id.clone(),
                    share_url: share_url.clone(),
                });
                self.observer.notify(&Notification::success(UPLOAD_SUCCEEDED));
                Ok(SubmitOutcome::Completed {
                    upload_id,
                    share_url,
                })
            }
            // 途中で中断された試行
            Ok(Ok(None)) => Ok(SubmitOutcome::Aborted),
            Ok(Err(error)) => {
                if !self.session.lock().fail(attempt) {
                    return Ok(SubmitOutcome::Aborted);
                }
                warn!(file = %file.name, %error, "upload failed");
                self.emit(UploadEvent::Failed {
                    file_name: file.name.clone(),
                    reason: error.to_string(),
                });
                self.observer
                    .notify(&Notification::failure(format!("File upload failed: {}", error)));
                Err(error)
            }
        }
    }

    /// 1回の送信試行
    ///
    /// 試行が中断で無効になった場合は `Ok(None)`。
    async fn run_attempt(
        &self,
        attempt: AttemptId,
        file: &SelectedFile,
    ) -> Result<Option<(String, String)>, InfraError> {
        self.emit(UploadEvent::RequestingDestination {
            file_name: file.name.clone(),
        });

        let request = UploadDestinationRequest {
            name: file.name.clone(),
            content_type: file.content_type.clone(),
            content_length: file.size,
        };
        let destination = self.client.request_destination(&request).await?;

        self.emit(UploadEvent::DestinationCreated {
            upload_id: destination.id.clone(),
        });

        if !self.session.lock().start(attempt) {
            return Ok(None);
        }
        info!(file = %file.name, upload_id = %destination.id, "upload started");

        self.emit(UploadEvent::ReadingFile {
            file_name: file.name.clone(),
            size_bytes: file.size,
        });
        let buffer = tokio::fs::read(&file.path).await.map_err(|e| {
            InfraError::io(format!("Failed to read {}", file.path.display()), e)
        })?;
        let total = buffer.len() as u64;

        if !self.session.lock().begin_transfer(attempt, total) {
            return Ok(None);
        }
        self.emit(UploadEvent::Transferring {
            loaded: 0,
            total,
            percent: 0,
        });

        let session = Arc::clone(&self.session);
        let observer = Arc::clone(&self.observer);
        let on_progress = move |loaded: u64, reported_total: u64| {
            let snapshot = session
                .lock()
                .record_progress(attempt, loaded, Some(reported_total));
            if let Some(snapshot) = snapshot {
                observer.progress(&UploadProgress::new(UploadEvent::Transferring {
                    loaded: snapshot.loaded,
                    total: snapshot.total,
                    percent: snapshot.percent,
                }));
            }
        };

        self.client
            .put_with_progress(
                &destination.url,
                Bytes::from(buffer),
                &file.content_type,
                self.chunk_size,
                self.transfer_timeout,
                on_progress,
            )
            .await?;

        let share_url = build_share_url(&self.share_base_url, &destination.id);
        if !self.session.lock().complete(attempt, share_url.clone()) {
            return Ok(None);
        }

        Ok(Some((destination.id, share_url)))
    }

    /// 送信中の試行を中断する
    ///
    /// 送信中でなければ何もしない。転送が既に完了していた場合も何もしない。
    ///
    /// # Returns
    /// 中断した場合 true（失敗通知を1回出す）
    pub fn abort(&self) -> bool {
        let file_name = {
            let mut in_flight = self.in_flight.lock();
            let Some((_, handle)) = in_flight.take() else {
                debug!("abort requested but nothing is in flight");
                return false;
            };
            handle.abort();

            let mut session = self.session.lock();
            if !session.abort() {
                debug!("abort requested after the upload completed");
                return false;
            }
            session.file().map(|f| f.name.clone()).unwrap_or_default()
        };

        info!(file = %file_name, "upload aborted");
        self.emit(UploadEvent::Aborted { file_name });
        self.observer.notify(&Notification::failure(UPLOAD_ABORTED));
        true
    }

    /// 共有リンクをクリップボードにコピーする
    ///
    /// # Returns
    /// コピーしたリンク
    pub fn copy_share_link(&self, clipboard: &mut dyn ClipboardWriter) -> anyhow::Result<String> {
        let share_url = self
            .session
            .lock()
            .share_url()
            .map(str::to_string)
            .ok_or(DomainError::ShareLinkUnavailable)?;

        if let Err(error) = clipboard.write_text(&share_url) {
            warn!(%error, "failed to copy share link");
            self.observer
                .notify(&Notification::failure(format!("Could not copy link: {}", error)));
            return Err(error.into());
        }

        self.session.lock().mark_copied()?;
        self.observer.notify(&Notification::success(LINK_COPIED));
        Ok(share_url)
    }

    /// 完了したセッションを初期状態に戻す
    pub fn reset(&self) -> Result<(), DomainError> {
        self.session.lock().reset()?;
        debug!("session reset for next upload");
        Ok(())
    }

    fn emit(&self, event: UploadEvent) {
        self.observer.progress(&UploadProgress::new(event));
    }
}
