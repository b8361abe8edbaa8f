use std::fs;
use std::path::{Path, PathBuf};

use clap::Subcommand;
use serde_json::json;

use crate::cli::config::api_client;
use crate::cli::utils::{output_record, output_success, print_table};
use crate::cli::OutputFormat;
use crate::models::s3::{ListObjectsParams, PresignedUrlDownloadRequest, PresignedUrlUploadRequest};
use crate::services::s3_service::UploadFile;
use crate::services::S3Service;

#[derive(Subcommand)]
pub enum S3Commands {
    #[command(about = "List stored objects")]
    List {
        #[arg(long, help = "Only keys starting with this prefix")]
        prefix: Option<String>,
        #[arg(long, help = "Maximum number of keys")]
        max_keys: Option<u32>,
    },

    #[command(about = "Check whether an object exists")]
    Exists {
        #[arg(help = "Object key")]
        key: String,
    },

    #[command(about = "Show object metadata")]
    Metadata {
        #[arg(help = "Object key")]
        key: String,
    },

    #[command(about = "Delete an object")]
    Delete {
        #[arg(help = "Object key")]
        key: String,
    },

    #[command(about = "Copy an object")]
    Copy {
        #[arg(help = "Source key")]
        source: String,
        #[arg(help = "Destination key")]
        destination: String,
    },

    #[command(about = "Move an object")]
    Move {
        #[arg(help = "Source key")]
        source: String,
        #[arg(help = "Destination key")]
        destination: String,
    },

    #[command(about = "Presigned URL for viewing an object")]
    ViewUrl {
        #[arg(help = "Object key")]
        key: String,
        #[arg(long, help = "Validity in minutes")]
        duration: Option<u32>,
    },

    #[command(about = "Presigned URL for downloading an object")]
    DownloadUrl {
        #[arg(help = "Object key")]
        key: String,
        #[arg(long, help = "Validity in minutes")]
        duration: Option<u32>,
    },

    #[command(about = "Presigned URL for uploading an object")]
    UploadUrl {
        #[arg(help = "Object key")]
        key: String,
        #[arg(long, help = "Content type of the upload")]
        content_type: String,
        #[arg(long, help = "Validity in minutes")]
        duration: Option<u32>,
    },

    #[command(about = "Download an object to a file")]
    Download {
        #[arg(help = "Object key")]
        key: String,
        #[arg(help = "Output file")]
        output: PathBuf,
    },

    #[command(about = "Upload a file")]
    Upload {
        #[arg(help = "File to upload")]
        file: PathBuf,
        #[arg(long, help = "Destination folder")]
        folder: Option<String>,
        #[arg(long, help = "Content type (guessed from the extension by default)")]
        content_type: Option<String>,
    },
}

/// Content type from a file extension; unknown extensions are sent as bytes.
pub fn guess_content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "json" => "application/json",
        "csv" => "text/csv",
        "txt" => "text/plain",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}

pub async fn handle(cmd: S3Commands, output_format: OutputFormat) -> anyhow::Result<()> {
    let s3 = S3Service::new(api_client()?);

    match cmd {
        S3Commands::List { prefix, max_keys } => {
            let listing = s3.list_objects(&ListObjectsParams { prefix, max_keys }).await?;
            match output_format {
                OutputFormat::Json => output_record(&output_format, &listing)?,
                OutputFormat::Text => {
                    if listing.objects.is_empty() {
                        println!("No objects found");
                    } else {
                        let rows: Vec<Vec<String>> = listing
                            .objects
                            .iter()
                            .map(|o| vec![o.key.clone(), o.size.to_string(), o.last_modified.clone()])
                            .collect();
                        print_table(&["key", "size", "lastModified"], &rows);
                        println!("\n{} objects", listing.total_count);
                    }
                }
            }
            Ok(())
        }
        S3Commands::Exists { key } => {
            let result = s3.object_exists(&key).await?;
            let message = if result.exists {
                format!("'{}' exists", key)
            } else {
                format!("'{}' does not exist", key)
            };
            output_success(&output_format, &message, Some(json!({ "exists": result.exists })))
        }
        S3Commands::Metadata { key } => {
            let metadata = s3.object_metadata(&key).await?;
            output_record(&output_format, &metadata)
        }
        S3Commands::Delete { key } => {
            s3.delete_file(&key).await?;
            output_success(&output_format, &format!("'{}' deleted", key), None)
        }
        S3Commands::Copy { source, destination } => {
            let result = s3.copy_object(&source, &destination).await?;
            output_success(&output_format, &result.message, None)
        }
        S3Commands::Move { source, destination } => {
            let result = s3.move_object(&source, &destination).await?;
            output_success(&output_format, &result.message, None)
        }
        S3Commands::ViewUrl { key, duration } => {
            let url = s3.generate_view_url(&key, duration).await?;
            output_url(&output_format, &url)
        }
        S3Commands::DownloadUrl { key, duration } => {
            let request = PresignedUrlDownloadRequest { object_key: key, duration_minutes: duration, content_type: None };
            let url = s3.generate_download_url(&request).await?;
            output_url(&output_format, &url)
        }
        S3Commands::UploadUrl { key, content_type, duration } => {
            let request = PresignedUrlUploadRequest { object_key: key, content_type, duration_minutes: duration };
            let url = s3.generate_upload_url(&request).await?;
            output_url(&output_format, &url)
        }
        S3Commands::Download { key, output } => {
            let bytes = s3.download_file(&key).await?;
            fs::write(&output, &bytes)?;
            output_success(
                &output_format,
                &format!("Saved '{}' to {} ({} bytes)", key, output.display(), bytes.len()),
                Some(json!({ "bytes": bytes.len() })),
            )
        }
        S3Commands::Upload { file, folder, content_type } => {
            let bytes = fs::read(&file)?;
            let file_name = file
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| anyhow::anyhow!("Cannot take a file name from {}", file.display()))?
                .to_string();
            let content_type = content_type.unwrap_or_else(|| guess_content_type(&file).to_string());

            let mut upload = UploadFile::new(file_name, content_type, bytes);
            if let Some(folder) = folder {
                upload = upload.in_folder(folder);
            }
            let uploaded = s3.upload_file(upload).await?;
            output_success(
                &output_format,
                &format!("Uploaded as '{}'", uploaded.object_key),
                Some(json!({ "upload": uploaded })),
            )
        }
    }
}

fn output_url(output_format: &OutputFormat, url: &crate::models::s3::PresignedUrlResponse) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => output_record(output_format, url),
        OutputFormat::Text => {
            println!("{}", url.presigned_url);
            println!("Expires at {} ({} minutes)", url.expires_at, url.duration_minutes);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_from_extension() {
        assert_eq!(guess_content_type(Path::new("report.PDF")), "application/pdf");
        assert_eq!(guess_content_type(Path::new("photo.jpeg")), "image/jpeg");
        assert_eq!(guess_content_type(Path::new("blob")), "application/octet-stream");
    }
}
