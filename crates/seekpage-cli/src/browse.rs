//! Fetches pages and writes them to an output stream.

use std::io::Write;

use anyhow::Context;
use seekpage_core::{DataSource, FieldResolver, Page, Paginator};
use serde::Serialize;

use crate::TRACING_TARGET_BROWSE;
use crate::config::BrowseConfig;

/// One printed page.
#[derive(Debug, Serialize)]
struct PageOutput<'a, R> {
    #[serde(flatten)]
    page: &'a Page<R>,
    #[serde(skip_serializing_if = "Option::is_none")]
    count: Option<u64>,
}

/// Prints the requested page, or every page from it with `--all`.
///
/// Each page is written as one JSON document followed by a newline. The
/// record count, when allowed, is only attached to the first page.
///
/// Returns the number of pages written.
pub fn browse<S, F, W>(
    paginator: &Paginator<S, F>,
    config: &BrowseConfig,
    mut out: W,
) -> anyhow::Result<usize>
where
    S: DataSource,
    S::Record: Serialize,
    F: FieldResolver<S::Record>,
    W: Write,
{
    let start = config.start_token();
    paginator
        .validate_token(&start)
        .with_context(|| format!("token {start} does not fit ordering {}", paginator.ordering()))?;

    let mut count = paginator.count().context("failed to count records")?;
    let mut page = paginator
        .fetch(start)
        .context("failed to fetch the first page")?;
    let mut written = 0;

    loop {
        let output = PageOutput {
            page: &page,
            count: count.take(),
        };
        write_json(&mut out, &output, config.pretty)?;
        written += 1;

        tracing::debug!(
            target: TRACING_TARGET_BROWSE,
            page = %page,
            records = page.len(),
            "wrote page"
        );

        let limit_reached = config.max_pages.is_some_and(|max| written >= max);
        if !config.all || !page.has_next() || limit_reached {
            break;
        }

        page = paginator
            .fetch(&page.next_token)
            .with_context(|| format!("failed to fetch page {}", page.next_token))?;
    }

    out.flush().context("failed to flush output")?;

    tracing::info!(
        target: TRACING_TARGET_BROWSE,
        pages = written,
        "finished browsing"
    );

    Ok(written)
}

fn write_json<W: Write>(out: &mut W, value: &impl Serialize, pretty: bool) -> anyhow::Result<()> {
    let written = if pretty {
        serde_json::to_writer_pretty(&mut *out, value)
    } else {
        serde_json::to_writer(&mut *out, value)
    };
    written.context("failed to serialize page")?;

    writeln!(out).context("failed to write page")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use seekpage_core::{MemorySource, PaginatorConfig};
    use serde_json::{Value, json};

    use super::*;

    fn source(n: u64) -> MemorySource {
        (1..=n)
            .map(|id| json!({ "id": id, "name": format!("object {}", id - 1) }))
            .collect()
    }

    fn run(config: PaginatorConfig, browse_config: &BrowseConfig) -> Vec<Value> {
        let paginator = Paginator::json(source(33), config).unwrap();
        let mut out = Vec::new();
        let written = browse(&paginator, browse_config, &mut out).unwrap();

        let pages: Vec<Value> = serde_json::Deserializer::from_slice(&out)
            .into_iter::<Value>()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(pages.len(), written);
        pages
    }

    #[test]
    fn prints_a_single_page() {
        let pages = run(PaginatorConfig::default(), &BrowseConfig::default());
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0]["records"].as_array().unwrap().len(), 25);
        assert_eq!(pages[0]["token"], Value::Null);
        assert_eq!(pages[0]["next_token"], json!("25"));
        assert_eq!(pages[0]["prev_token"], Value::Null);
        assert!(pages[0].get("count").is_none());
    }

    #[test]
    fn walks_every_page_with_count() {
        let config = BrowseConfig {
            all: true,
            ..BrowseConfig::default()
        };
        let pages = run(PaginatorConfig::new(11).with_count(), &config);

        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0]["count"], json!(33));
        assert!(pages[1].get("count").is_none());
        assert_eq!(pages[1]["prev_token"], json!(""));
        assert_eq!(pages[2]["prev_token"], json!("11"));
        assert_eq!(pages[2]["next_token"], Value::Null);
    }

    #[test]
    fn stops_at_max_pages() {
        let config = BrowseConfig {
            all: true,
            max_pages: Some(2),
            pretty: true,
            ..BrowseConfig::default()
        };
        let pages = run(PaginatorConfig::new(5), &config);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1]["token"], json!("5"));
    }

    #[test]
    fn starts_from_a_token() {
        let config = BrowseConfig {
            token: Some("25".into()),
            ..BrowseConfig::default()
        };
        let pages = run(PaginatorConfig::default(), &config);
        assert_eq!(pages[0]["records"].as_array().unwrap().len(), 8);
        assert_eq!(pages[0]["prev_token"], json!(""));
    }

    #[test]
    fn rejects_mismatched_tokens() {
        let paginator = Paginator::json(source(3), PaginatorConfig::default()).unwrap();
        let config = BrowseConfig {
            token: Some("1:2".into()),
            ..BrowseConfig::default()
        };
        assert!(browse(&paginator, &config, Vec::new()).is_err());
    }
}
