/// HTTPクライアント
///
/// バックエンドAPI（アップロード先の払い出し）とストレージ（ファイル本体のPUT）との
/// 通信を担当するHTTPクライアント。タイムアウトとエラー分類を含みます。
use crate::api::error::InfraError;
use crate::api::types::{UploadDestination, UploadDestinationRequest};
use crate::config::APP_CONFIG;
use bytes::Bytes;
use futures::StreamExt;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Body, Client, Response};
use std::time::Duration;
use tracing::{debug, warn};

/// APIクライアントの結果型
type ApiResult<T> = Result<T, InfraError>;

/// APIクライアント
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// 新しいAPIクライアントを作成
    ///
    /// クライアント全体のタイムアウトは設定せず、リクエストごとに設定する。
    /// 転送は数分かかることがあるため。
    ///
    /// # Arguments
    /// * `base_url` - APIのベースURL（末尾の `/` は無い前提、例: "https://api.example.com"）
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(APP_CONFIG.api.connect_timeout_seconds))
            .build()
            .map_err(|e| InfraError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POSTリクエストを送信
    ///
    /// # Arguments
    /// * `endpoint` - エンドポイントパス（例: "/file/upload"）
    /// * `body` - リクエストボディ（JSON）
    pub async fn post<T: serde::Serialize>(&self, endpoint: &str, body: &T) -> ApiResult<Response> {
        let url = self.build_url(endpoint);
        debug!(%url, "POST");

        self.client
            .post(&url)
            .json(body)
            .timeout(Duration::from_secs(APP_CONFIG.api.timeout_seconds))
            .send()
            .await
            .map_err(|e| classify_send_error(e, "POST", endpoint))
    }

    /// アップロード先を払い出してもらう
    pub async fn request_destination(
        &self,
        request: &UploadDestinationRequest,
    ) -> ApiResult<UploadDestination> {
        let endpoint = APP_CONFIG.api.upload_request_path;
        let response = self.post(endpoint, request).await?;
        let response = Self::check_response(response, endpoint).await?;
        let destination: UploadDestination = Self::parse_json(response, endpoint).await?;

        if !destination.is_valid() {
            return Err(InfraError::invalid_response(
                endpoint,
                "response is missing 'url' or 'id'",
            ));
        }

        debug!(upload_id = %destination.id, "upload destination created");
        Ok(destination)
    }

    /// ファイル本体をPUTで転送する（進捗通知付き）
    ///
    /// バッファを `chunk_size` ごとのストリームとして送り、各チャンクを
    /// トランスポートに渡すたびに `on_progress(loaded, total)` を呼ぶ。
    /// `Content-Length` は明示する（署名付きURLの多くは chunked 転送を受け付けない）。
    ///
    /// 進捗は hyper がストリームから取り出したバイト数で、サーバーが受信を確認した量ではない。
    /// そのため応答前や、最終的に拒否される転送でも 100% に達することがある。
    /// 成否は戻り値でのみ判断すること。
    ///
    /// # Arguments
    /// * `url` - 完全なURL（払い出されたアップロード先）
    /// * `body` - ファイル全体
    /// * `content_type` - Content-Typeヘッダー
    /// * `timeout` - 転送全体のタイムアウト（`None` で無制限）
    pub async fn put_with_progress<F>(
        &self,
        url: &str,
        body: Bytes,
        content_type: &str,
        chunk_size: usize,
        timeout: Option<Duration>,
        on_progress: F,
    ) -> ApiResult<()>
    where
        F: Fn(u64, u64) + Send + Sync + 'static,
    {
        let total = body.len() as u64;
        let operation = format!("PUT {}", redact_query(url));
        debug!(%operation, total, "starting transfer");

        let mut sent = 0u64;
        let stream = futures::stream::iter(split_chunks(body, chunk_size)).map(move |chunk| {
            sent += chunk.len() as u64;
            on_progress(sent, total);
            Ok::<Bytes, std::io::Error>(chunk)
        });

        let mut request = self
            .client
            .put(url)
            .header(CONTENT_TYPE, content_type)
            .header(CONTENT_LENGTH, total)
            .body(Body::wrap_stream(stream));
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                InfraError::timeout(operation.clone())
            } else if e.is_connect() {
                InfraError::network(format!("Connection failed for {}: {}", operation, e))
            } else {
                InfraError::network(format!("Request failed for {}: {}", operation, e))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            warn!(status = status.as_u16(), "storage rejected transfer");
            return Err(InfraError::Transfer {
                status_code: status.as_u16(),
                message,
            });
        }

        Ok(())
    }

    /// URLを構築
    fn build_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// レスポンスをチェックしてエラーを返す
    pub async fn check_response(response: Response, endpoint: &str) -> ApiResult<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let status_code = status.as_u16();
        let error_body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read error response".to_string());

        warn!(endpoint, status_code, "API returned an error status");
        Err(InfraError::api(endpoint, error_body, Some(status_code)))
    }

    /// JSONレスポンスをデシリアライズ
    pub async fn parse_json<T: serde::de::DeserializeOwned>(
        response: Response,
        endpoint: &str,
    ) -> ApiResult<T> {
        response.json().await.map_err(|e| {
            InfraError::invalid_response(endpoint, format!("Failed to parse JSON response: {}", e))
        })
    }
}

/// 送信エラーを分類する
fn classify_send_error(e: reqwest::Error, method: &str, endpoint: &str) -> InfraError {
    if e.is_timeout() {
        InfraError::timeout(format!("{} {}", method, endpoint))
    } else if e.is_connect() {
        InfraError::network(format!("Connection failed for {} {}: {}", method, endpoint, e))
    } else {
        InfraError::network(format!("Request failed for {} {}: {}", method, endpoint, e))
    }
}

/// バッファをチャンクに分割する（コピーなし）
fn split_chunks(body: Bytes, chunk_size: usize) -> Vec<Bytes> {
    let chunk_size = chunk_size.max(1);
    let len = body.len();
    (0..len)
        .step_by(chunk_size)
        .map(|start| body.slice(start..(start + chunk_size).min(len)))
        .collect()
}

/// 署名付きURLのクエリ（署名）をログに出さない
fn redact_query(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}
