use crate::app::{AppContext, Result};
use crate::domain::Article;
use crate::engine::CACHE_CAPACITY;

/// Explicit, user-triggered refresh. Unlike the background path inside
/// `get()`, a failure here is reported upward once as a retryable error.
pub async fn refresh(ctx: &AppContext) -> Result<()> {
    let before = ctx.engine.count()?;
    ctx.engine.refresh().await?;
    let after = ctx.engine.count()?;

    println!("Refreshed: {} new articles, {} cached", after - before, after);
    Ok(())
}

pub async fn list(ctx: &AppContext, limit: usize) -> Result<()> {
    let mut rx = ctx.engine.clone().get();

    let mut shown = false;
    while let Some(snapshot) = rx.recv().await {
        if shown {
            println!("--- updated ---");
        }
        print_snapshot(&snapshot, limit);
        shown = true;
    }

    Ok(())
}

pub fn status(ctx: &AppContext) -> Result<()> {
    let count = ctx.engine.count()?;
    println!("{} of {} articles cached", count, CACHE_CAPACITY);
    Ok(())
}

pub fn clear(ctx: &AppContext) -> Result<()> {
    ctx.engine.clear()?;
    println!("Cache cleared");
    Ok(())
}

fn print_snapshot(articles: &[Article], limit: usize) {
    if articles.is_empty() {
        println!("(no cached articles yet)");
        return;
    }

    for article in articles.iter().take(limit) {
        let source = if article.source.is_empty() {
            String::new()
        } else {
            format!(" [{}]", article.source)
        };
        println!(
            "{}  {}{}",
            article.ingested_at.format("%Y-%m-%d %H:%M"),
            article.title,
            source
        );
        println!("    {}", article.url);
    }
}
