use anyhow::Result;
use colored::*;
use vendorsearch::core::api::{ApiClient, SearchRequest};
use vendorsearch::core::config::AppConfig;
use vendorsearch::search::{ScorePolicy, ViewResult};

pub struct SearchArgs {
    pub query: String,
    pub top_k: Option<usize>,
    pub mmr: bool,
    pub policy: Option<ScorePolicy>,
    pub min_pct: Option<f64>,
    pub json: bool,
}

pub async fn run(config: &AppConfig, args: SearchArgs) -> Result<()> {
    let policy = config.resolve_policy(args.policy)?;
    let client = ApiClient::new(config);

    let mut request = SearchRequest::new(args.query, config);
    if let Some(k) = args.top_k {
        request.top_k = k;
    }
    request.use_mmr |= args.mmr;

    let outcome = client
        .search_hits(&request, policy, args.min_pct.or(config.min_score_pct))
        .await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    // Unreadable layouts and genuinely empty answers look the same here
    if outcome.results.is_empty() {
        println!("No results found.");
        return Ok(());
    }

    for (rank, result) in outcome.results.iter().enumerate() {
        print_result(rank + 1, result);
    }

    Ok(())
}

fn print_result(rank: usize, result: &ViewResult) {
    let hit = &result.hit;
    let title = if hit.title.is_empty() { hit.id.as_str() } else { hit.title.as_str() };

    println!(
        "{} {} {}",
        format!("#{}", rank).dimmed(),
        title.lines().next().unwrap_or("").bold(),
        format!("{:.1}%", result.score_pct).green()
    );
    if let Some(url) = &hit.url {
        println!("  {}", url.blue());
    }
    for l in hit.snippet.lines().take(3) {
        // Limit snippet lines
        println!("  {}", l.trim().dimmed());
    }
    if let Some(status) = hit.metadata.get("status").and_then(|s| s.as_str()) {
        println!("  status: {}", status.magenta());
    }
    println!();
}
