//! Board command handlers: list, show, create, edit, delete, categories

use std::collections::BTreeMap;
use std::path::Path;

use colored::Colorize;
use prettytable::{row, Table};

use crate::api::types::BoardDraft;
use crate::api::ApiClient;
use crate::client::gateway::FileAttachment;
use crate::commands::{note_login_required, prompt};
use crate::error::{BoardctlError, Result};

/// Lists posts, resolving category keys to display labels and optionally
/// filtering by category key on the client side.
pub async fn list(api: &ApiClient, page: u32, size: u32, category: Option<String>) -> Result<()> {
    let result = async {
        let labels = api.categories().await?;
        let posts = api.boards(page, size).await?;
        Ok::<_, anyhow::Error>((labels, posts))
    }
    .await;
    let (labels, posts) = note_login_required(api, result)?;

    let filtered: Vec<_> = posts
        .into_iter()
        .filter(|post| category.as_deref().map_or(true, |key| post.category == key))
        .collect();

    if filtered.is_empty() {
        println!("No posts found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.add_row(row!["ID", "CATEGORY", "TITLE", "CREATED"]);
    for post in &filtered {
        table.add_row(row![
            post.id,
            label_for(&labels, &post.category),
            post.title,
            post.created_at.format("%Y-%m-%d"),
        ]);
    }
    table.printstd();
    Ok(())
}

/// Shows one post, including the absolute URL of its attachment when one
/// exists.
pub async fn show(api: &ApiClient, id: u64) -> Result<()> {
    let detail = note_login_required(api, api.board(id).await)?;

    println!(
        "{} {}",
        format!("[{}]", detail.board_category).cyan(),
        detail.title.bold()
    );
    println!("{}", detail.created_at.format("%Y-%m-%d %H:%M"));
    println!();
    println!("{}", detail.content);
    if let Some(image_url) = &detail.image_url {
        // The backend returns a path relative to its own host.
        let absolute = api
            .gateway()
            .base_url()
            .join(image_url)
            .map(|url| url.to_string())
            .unwrap_or_else(|_| image_url.clone());
        println!();
        println!("Attachment: {absolute}");
    }
    Ok(())
}

/// Creates a post.
pub async fn create(
    api: &ApiClient,
    title: String,
    content: String,
    category: String,
    file: Option<&Path>,
) -> Result<()> {
    let attachment = file.map(load_attachment).transpose()?;
    let draft = BoardDraft {
        title,
        content,
        category,
    };

    let created = note_login_required(api, api.create_board(&draft, attachment).await)?;
    match created {
        Some(detail) => println!("{} (id {})", "Post created.".green(), detail.id),
        None => println!("{}", "Post created.".green()),
    }
    Ok(())
}

/// Edits a post. Omitted fields keep the values currently on the server,
/// so `boardctl boards edit 7 --title new` changes only the title.
pub async fn edit(
    api: &ApiClient,
    id: u64,
    title: Option<String>,
    content: Option<String>,
    category: Option<String>,
    file: Option<&Path>,
) -> Result<()> {
    let current = note_login_required(api, api.board(id).await)?;
    let draft = BoardDraft {
        title: title.unwrap_or(current.title),
        content: content.unwrap_or(current.content),
        category: category.unwrap_or(current.board_category),
    };
    let attachment = file.map(load_attachment).transpose()?;

    note_login_required(api, api.update_board(id, &draft, attachment).await)?;
    println!("{} (id {})", "Post updated.".green(), id);
    Ok(())
}

/// Deletes a post after confirmation (skipped with `--yes`).
pub async fn delete(api: &ApiClient, id: u64, yes: bool) -> Result<()> {
    if !yes {
        let answer = prompt(&format!("Delete post {id}? [y/N] "))?;
        if !answer.eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    note_login_required(api, api.delete_board(id).await)?;
    println!("{} (id {})", "Post deleted.".green(), id);
    Ok(())
}

/// Prints the category key → label table.
pub async fn categories(api: &ApiClient) -> Result<()> {
    let labels = note_login_required(api, api.categories().await)?;

    let mut table = Table::new();
    table.add_row(row!["KEY", "LABEL"]);
    for (key, label) in &labels {
        table.add_row(row![key, label]);
    }
    table.printstd();
    Ok(())
}

/// Resolves a category key to its display label, falling back to the key
/// itself for categories the backend has not labeled.
fn label_for<'a>(labels: &'a BTreeMap<String, String>, key: &'a str) -> &'a str {
    labels.get(key).map(String::as_str).unwrap_or(key)
}

/// Reads a file from disk into an attachment, guessing the MIME type from
/// the extension.
fn load_attachment(path: &Path) -> Result<FileAttachment> {
    let bytes = std::fs::read(path).map_err(BoardctlError::Io)?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "attachment".to_string());
    Ok(FileAttachment {
        content_type: mime_for_path(path).to_string(),
        file_name,
        bytes,
    })
}

/// Extension-based MIME guess for the upload part. The backend stores
/// whatever it is given, so unknown extensions fall back to octet-stream.
fn mime_for_path(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}
