//! Board CRUD and category lookup
//!
//! Board create/update are multipart: a JSON `request` part carrying the
//! draft plus an optional `file` part. The created/updated post body is
//! parsed when it matches [`BoardDetail`] and silently ignored otherwise,
//! since the write contract only promises "the created post".

use std::collections::BTreeMap;

use reqwest::Method;

use crate::api::types::{BoardDetail, BoardDraft, BoardListPage, BoardSummary};
use crate::api::ApiClient;
use crate::client::gateway::{ApiRequest, FileAttachment};
use crate::error::{BoardctlError, Result};

impl ApiClient {
    /// Fetches the category key → display label mapping.
    pub async fn categories(&self) -> Result<BTreeMap<String, String>> {
        let response = self
            .gateway()
            .execute(ApiRequest::new(Method::GET, "/boards/categories"))
            .await?;
        let response = Self::expect_success(response, "list categories").await?;
        let categories = response
            .json::<BTreeMap<String, String>>()
            .await
            .map_err(BoardctlError::Http)?;
        Ok(categories)
    }

    /// Fetches one page of board summaries.
    pub async fn boards(&self, page: u32, size: u32) -> Result<Vec<BoardSummary>> {
        let request = ApiRequest::new(Method::GET, "/boards")
            .query("page", page.to_string())
            .query("size", size.to_string());
        let response = self.gateway().execute(request).await?;
        let response = Self::expect_success(response, "list boards").await?;
        let page = response
            .json::<BoardListPage>()
            .await
            .map_err(BoardctlError::Http)?;
        Ok(page.content)
    }

    /// Fetches one post.
    pub async fn board(&self, id: u64) -> Result<BoardDetail> {
        let response = self
            .gateway()
            .execute(ApiRequest::new(Method::GET, format!("/boards/{id}")))
            .await?;
        let response = Self::expect_success(response, "show board").await?;
        let detail = response
            .json::<BoardDetail>()
            .await
            .map_err(BoardctlError::Http)?;
        Ok(detail)
    }

    /// Creates a post, optionally with an attached file.
    pub async fn create_board(
        &self,
        draft: &BoardDraft,
        file: Option<FileAttachment>,
    ) -> Result<Option<BoardDetail>> {
        let body = serde_json::to_value(draft).map_err(BoardctlError::Serialization)?;
        let response = self
            .gateway()
            .execute(ApiRequest::new(Method::POST, "/boards").multipart(body, file))
            .await?;
        let response = Self::expect_success(response, "create board").await?;
        Ok(response.json::<BoardDetail>().await.ok())
    }

    /// Updates a post in place, optionally replacing its attached file.
    pub async fn update_board(
        &self,
        id: u64,
        draft: &BoardDraft,
        file: Option<FileAttachment>,
    ) -> Result<Option<BoardDetail>> {
        let body = serde_json::to_value(draft).map_err(BoardctlError::Serialization)?;
        let request = ApiRequest::new(Method::PATCH, format!("/boards/{id}")).multipart(body, file);
        let response = self.gateway().execute(request).await?;
        let response = Self::expect_success(response, "update board").await?;
        Ok(response.json::<BoardDetail>().await.ok())
    }

    /// Deletes a post.
    pub async fn delete_board(&self, id: u64) -> Result<()> {
        let response = self
            .gateway()
            .execute(ApiRequest::new(Method::DELETE, format!("/boards/{id}")))
            .await?;
        Self::expect_success(response, "delete board").await?;
        Ok(())
    }
}
