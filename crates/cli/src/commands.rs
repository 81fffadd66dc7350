//! Command execution against the registry client.

use std::path::Path;

use marksearch_client::{RegistryClient, Result, SearchQuery};
use tracing::info;

use crate::args::Command;

/// Run one subcommand to completion, printing its result to stdout.
pub async fn run(client: &RegistryClient, command: Command) -> Result<()> {
    match command {
        Command::Search {
            query,
            page,
            page_size,
            sort,
        } => {
            let mut request = SearchQuery::new(query).page(page);
            if let Some(size) = page_size {
                request = request.page_size(size);
            }
            if let Some(sort) = sort {
                request = request.sort(sort);
            }
            let results = client.search(&request).await?;
            info!(total = results.total, "search completed");
            print_json(&serde_json::json!({
                "total": results.total,
                "results": results.hits,
            }));
            Ok(())
        }

        Command::Notice { id } => {
            let notice = client.notice(&id).await?;
            print_json(&notice);
            Ok(())
        }

        Command::Image {
            id,
            variant,
            output,
        } => {
            let image = client.image(&id, variant).await?;
            write_image(&output, &image.bytes)?;
            eprintln!(
                "wrote {} bytes ({}) to {}",
                image.bytes.len(),
                image.content_type,
                output.display()
            );
            Ok(())
        }

        Command::ClearSession => {
            client.clear_auth_state();
            eprintln!("auth state cleared");
            Ok(())
        }
    }
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => eprintln!("failed to render output: {e}"),
    }
}

fn write_image(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes).map_err(|e| {
        marksearch_client::Error::Unexpected(format!(
            "could not write image to {}: {e}",
            path.display()
        ))
    })
}
