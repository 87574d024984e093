/// ドメイン層: アップロードセッション
///
/// 1回のアップロードの状態（選択ファイル、フェーズ、転送量、共有リンク）を保持する。
/// 状態遷移はすべてこの型のメソッドを通して行い、次の不変条件を守る。
///
/// - `share_url` は `phase == Completed` のときだけ `Some`
/// - 転送開始後は `loaded <= total` で、`loaded` は減少しない
/// - 中断・失敗した試行からの遅延コールバックは状態を変更しない
///   （`attempt` が一致しない更新は捨てる）
use crate::domain::error::DomainError;
use crate::domain::progress::compute_percent;
use serde::Serialize;
use std::path::PathBuf;

/// ユーザーが選択したファイル
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
    pub content_type: String,
    pub size: u64,
}

/// アップロードのフェーズ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadPhase {
    #[default]
    Idle,
    Started,
    Uploading,
    Completed,
}

/// 進捗更新後のスナップショット
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferSnapshot {
    pub loaded: u64,
    pub total: u64,
    pub percent: u8,
}

/// 送信試行の識別子
///
/// `UploadSession::reserve_attempt` で払い出され、中断・リセットで無効になる。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptId(u64);

#[derive(Debug, Clone, Default)]
pub struct UploadSession {
    file: Option<SelectedFile>,
    phase: UploadPhase,
    loaded: u64,
    total: u64,
    percent: u8,
    share_url: Option<String>,
    copied: bool,
    attempt: u64,
}

impl UploadSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub fn phase(&self) -> UploadPhase {
        self.phase
    }

    #[cfg(test)]
    pub fn loaded(&self) -> u64 {
        self.loaded
    }

    #[cfg(test)]
    pub fn total(&self) -> u64 {
        self.total
    }

    #[cfg(test)]
    pub fn percent(&self) -> u8 {
        self.percent
    }

    pub fn share_url(&self) -> Option<&str> {
        self.share_url.as_deref()
    }

    pub fn copied(&self) -> bool {
        self.copied
    }

    /// ファイルを選択する
    ///
    /// `None` は無視する。送信中・完了後（リセット前）の選択も無視する。
    /// 他のフィールドは変更しない。
    ///
    /// # Returns
    /// 選択を受け付けた場合 true
    pub fn select_file(&mut self, candidate: Option<SelectedFile>) -> bool {
        let Some(file) = candidate else {
            return false;
        };
        if self.phase != UploadPhase::Idle {
            return false;
        }
        self.file = Some(file);
        true
    }

    /// 新しい送信試行を予約する
    ///
    /// ファイル未選択、または Idle 以外のフェーズでは `None`。
    pub fn reserve_attempt(&mut self) -> Option<AttemptId> {
        if self.file.is_none() || self.phase != UploadPhase::Idle {
            return None;
        }
        self.attempt += 1;
        Some(AttemptId(self.attempt))
    }

    fn is_current(&self, attempt: AttemptId) -> bool {
        attempt.0 == self.attempt
    }

    /// Idle → Started（アップロード先の払い出し後）
    pub fn start(&mut self, attempt: AttemptId) -> bool {
        if !self.is_current(attempt) || self.phase != UploadPhase::Idle {
            return false;
        }
        self.phase = UploadPhase::Started;
        self.loaded = 0;
        self.total = 0;
        self.percent = 0;
        self.share_url = None;
        true
    }

    /// Started → Uploading。`total` はここで確定する
    pub fn begin_transfer(&mut self, attempt: AttemptId, total: u64) -> bool {
        if !self.is_current(attempt) || self.phase != UploadPhase::Started {
            return false;
        }
        self.phase = UploadPhase::Uploading;
        self.total = total;
        self.loaded = 0;
        self.percent = 0;
        true
    }

    /// 進捗通知を反映する
    ///
    /// `reported_total` は転送開始時に確定した `total` が 0 の場合だけ採用する。
    /// `loaded` は単調増加かつ `total` 以下に丸める。
    pub fn record_progress(
        &mut self,
        attempt: AttemptId,
        loaded: u64,
        reported_total: Option<u64>,
    ) -> Option<TransferSnapshot> {
        if !self.is_current(attempt) || self.phase != UploadPhase::Uploading {
            return None;
        }
        if self.total == 0 {
            self.total = reported_total.unwrap_or(0);
        }
        let mut loaded = loaded.max(self.loaded);
        if self.total > 0 {
            loaded = loaded.min(self.total);
        }
        self.loaded = loaded;
        self.percent = compute_percent(self.loaded, self.total);
        Some(TransferSnapshot {
            loaded: self.loaded,
            total: self.total,
            percent: self.percent,
        })
    }

    /// Uploading → Completed
    pub fn complete(&mut self, attempt: AttemptId, share_url: String) -> bool {
        if !self.is_current(attempt) || self.phase != UploadPhase::Uploading {
            return false;
        }
        self.phase = UploadPhase::Completed;
        self.loaded = self.total;
        self.percent = 100;
        self.share_url = Some(share_url);
        true
    }

    /// 指定した試行の失敗を反映し、Idle に戻す（ファイルは保持）
    ///
    /// # Returns
    /// 現在の試行だった場合 true
    pub fn fail(&mut self, attempt: AttemptId) -> bool {
        if !self.is_current(attempt) || self.phase == UploadPhase::Completed {
            return false;
        }
        self.attempt += 1;
        self.return_to_idle();
        true
    }

    /// 進行中の試行を中断し、Idle に戻す（ファイルは保持）
    ///
    /// 完了済みのセッションは変更しない。
    ///
    /// # Returns
    /// 状態を変更した場合 true
    pub fn abort(&mut self) -> bool {
        if self.phase == UploadPhase::Completed {
            return false;
        }
        self.attempt += 1;
        self.return_to_idle();
        true
    }

    fn return_to_idle(&mut self) {
        self.phase = UploadPhase::Idle;
        self.loaded = 0;
        self.total = 0;
        self.percent = 0;
        self.share_url = None;
    }

    /// 共有リンクをコピー済みにする
    pub fn mark_copied(&mut self) -> Result<&str, DomainError> {
        let url = self
            .share_url
            .as_deref()
            .ok_or(DomainError::ShareLinkUnavailable)?;
        self.copied = true;
        Ok(url)
    }

    /// 次のアップロードに向けて初期状態へ戻す（完了後のみ）
    pub fn reset(&mut self) -> Result<(), DomainError> {
        if self.phase != UploadPhase::Completed {
            return Err(DomainError::UploadNotCompleted);
        }
        *self = Self {
            attempt: self.attempt + 1,
            ..Self::default()
        };
        Ok(())
    }
}
