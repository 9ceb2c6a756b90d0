//! Keyword cannibalisation cleanup on a small in-memory dataset.
//!
//! Run with `RUST_LOG=sift=debug` to see per-run logging.

use std::collections::HashMap;

use sift::DedupConfig;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // (keyword, monthly search volume) as exported from a keyword tool.
    let keywords = vec![
        ("best running shoes", "12,100"),
        ("running shoes best", "880"),
        ("Best Running Shoes!", "90"),
        ("trail running shoes", "4,400"),
        ("trail runners", "1,300"),
        ("running shoes for women", "8,100"),
        ("womens running shoes", "n/a"),
        ("marathon training plan", "2,900"),
    ];

    // Top results per keyword, as a search API would return them.
    let serp = |urls: &[&str]| urls.iter().map(|u| (*u).to_string()).collect::<Vec<_>>();
    let results: HashMap<String, Vec<String>> = HashMap::from([
        ("best running shoes".into(), serp(&["rw.com/best", "shoe.guide/", "gear.io/run"])),
        ("running shoes best".into(), serp(&["rw.com/best", "shoe.guide", "gear.io/run"])),
        ("Best Running Shoes!".into(), serp(&["rw.com/best"])),
        ("trail running shoes".into(), serp(&["trail.co/shoes", "rw.com/trail", "gear.io/trail"])),
        ("trail runners".into(), serp(&["trail.co/shoes", "rw.com/trail", "outdoor.net"])),
        ("running shoes for women".into(), serp(&["rw.com/women", "shoe.guide/women"])),
        ("womens running shoes".into(), serp(&["rw.com/women", "shoe.guide/women"])),
        ("marathon training plan".into(), serp(&["plan.run", "coach.io"])),
    ]);

    let config = DedupConfig::from_toml(
        r#"
        [lexical]
        stem = true

        [overlap]
        threshold = 0.5
        top_n = 3
        "#,
    )?;

    let signal = config.keyword_similarity(results);
    let run = config.deduplicator().run(keywords, &signal);

    println!("=== {} keywords -> {} groups ===", run.items().len(), run.len());
    for group in run.groups() {
        let rep = &run.items()[group.representative()];
        let merged: Vec<&str> = run
            .members(group)
            .filter(|item| item.key != rep.key)
            .map(|item| item.key.as_str())
            .collect();
        println!("  {:<26} {:>7}  merged: {:?}", rep.key, rep.weight, merged);
    }

    println!("\n=== by volume ===");
    for item in run.sorted_by_weight() {
        println!("  {:>7}  {}", item.weight, item.key);
    }

    Ok(())
}
