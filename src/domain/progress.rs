use serde::Serialize;
/// ドメイン層: アップロード進捗イベント定義
///
/// アップロード処理の各段階をビジネスロジックのイベントとして表現します。
/// プレゼンテーション層はこれらのイベントを受け取り、
/// 人間向けの進捗表示や機械向けのJSON出力に使用します。
use std::time::SystemTime;

/// アップロード処理の各段階を表すイベント
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum UploadEvent {
    /// ファイル選択
    FileSelected {
        file_name: String,
        size_bytes: u64,
        content_type: String,
    },

    /// アップロード先を要求中
    RequestingDestination { file_name: String },

    /// アップロード先の払い出し完了
    DestinationCreated { upload_id: String },

    /// ファイルをメモリに読み込み中
    ReadingFile { file_name: String, size_bytes: u64 },

    /// 転送中
    Transferring {
        loaded: u64,
        total: u64,
        percent: u8,
    },

    /// アップロード完了
    Completed { upload_id: String, share_url: String },

    /// ユーザーによる中断
    Aborted { file_name: String },

    /// 失敗（ファイルは保持される）
    Failed { file_name: String, reason: String },
}

/// アップロード進捗情報
///
/// 各処理段階のイベントとタイムスタンプを保持します。
#[derive(Debug, Clone, Serialize)]
pub struct UploadProgress {
    #[serde(flatten)]
    pub event: UploadEvent,
    #[serde(skip)]
    #[allow(dead_code)]
    pub timestamp: SystemTime,
}

impl UploadProgress {
    pub fn new(event: UploadEvent) -> Self {
        Self {
            event,
            timestamp: SystemTime::now(),
        }
    }
}

/// 転送済みバイト数から進捗率 [0, 100] を計算する
///
/// `total` が 0（不明）の場合は 0 を返す。四捨五入は 0.5 を切り上げる。
pub fn compute_percent(loaded: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    let loaded = u128::from(loaded.min(total));
    let total = u128::from(total);
    ((loaded * 100 + total / 2) / total) as u8
}
