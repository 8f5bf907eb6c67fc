use clap::{Arg, ArgAction, Command};
use log::LevelFilter;
use lurescan::{ScannerConfig, ThreatAggregator, ThreatReport};
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let matches = Command::new("lurescan")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Multi-signal URL and content threat classification")
        .arg(
            Arg::new("url")
                .value_name("URL")
                .help("URL to scan")
                .index(1),
        )
        .arg(
            Arg::new("content")
                .long("content")
                .value_name("FILE")
                .help("Page or email text to analyze alongside the URL")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .value_name("FILE")
                .help("Scan URLs from a file, one per line")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("/etc/lurescan.yaml"),
        )
        .arg(
            Arg::new("generate-config")
                .long("generate-config")
                .value_name("FILE")
                .help("Generate a default configuration file")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("test-config")
                .long("test-config")
                .help("Test configuration validity and show table sizes")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Emit reports as JSON")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging with per-signal detail")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let log_level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    if let Some(generate_path) = matches.get_one::<String>("generate-config") {
        generate_default_config(generate_path);
        return;
    }

    let config_path = matches.get_one::<String>("config").unwrap();
    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            process::exit(1);
        }
    };

    if matches.get_flag("test-config") {
        print_config_summary(&config);
        return;
    }

    let as_json = matches.get_flag("json");
    let aggregator = Arc::new(ThreatAggregator::new(config));

    if let Some(batch_path) = matches.get_one::<String>("file") {
        let urls = match read_url_file(batch_path) {
            Ok(urls) => urls,
            Err(e) => {
                eprintln!("Error reading {batch_path}: {e}");
                process::exit(1);
            }
        };
        let reports = Arc::clone(&aggregator).batch_check(&urls).await;
        if as_json {
            print_json(&reports);
        } else {
            for report in &reports {
                print_report(report);
            }
        }
        return;
    }

    let url = match matches.get_one::<String>("url") {
        Some(url) => url,
        None => {
            eprintln!("No URL given; pass a URL or use --file");
            process::exit(1);
        }
    };

    let content = match matches.get_one::<String>("content") {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(text) => Some(text),
            Err(e) => {
                eprintln!("Error reading {path}: {e}");
                process::exit(1);
            }
        },
        None => None,
    };

    let report = aggregator.check(url, content.as_deref());
    if as_json {
        print_json(&[report]);
    } else {
        print_report(&report);
    }
}

fn load_config(path: &str) -> anyhow::Result<ScannerConfig> {
    if std::path::Path::new(path).exists() {
        ScannerConfig::from_file(path)
    } else {
        log::warn!("Configuration file '{path}' not found, using default configuration");
        Ok(ScannerConfig::default())
    }
}

fn generate_default_config(path: &str) {
    let config = ScannerConfig::default();
    match config.to_file(path) {
        Ok(()) => {
            println!("Default configuration written to: {path}");
            println!("Please edit the configuration file to suit your needs.");
        }
        Err(e) => {
            eprintln!("Error writing configuration file: {e}");
            process::exit(1);
        }
    }
}

fn print_config_summary(config: &ScannerConfig) {
    println!("Configuration OK");
    println!("  blacklisted domains:  {}", config.blacklist.len());
    println!("  legitimate domains:   {}", config.legitimate_domains.len());
    println!("  URL keywords:         {}", config.url_keywords.len());
    println!("  urgency keywords:     {}", config.urgency_keywords.len());
    println!("  financial keywords:   {}", config.financial_keywords.len());
    println!(
        "  result cache:         {} entries, {}s TTL",
        config.cache.max_entries, config.cache.ttl_seconds
    );
}

fn read_url_file(path: &str) -> anyhow::Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| line.to_string())
        .collect())
}

fn print_json(reports: &[ThreatReport]) {
    match serde_json::to_string_pretty(reports) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error serializing reports: {e}");
            process::exit(1);
        }
    }
}

fn print_report(report: &ThreatReport) {
    println!("{}", report.url);
    println!(
        "  verdict: {} (confidence {:.2})",
        report.threat_level.as_str(),
        report.confidence
    );
    if !report.threats.is_empty() {
        println!("  threats:");
        for threat in &report.threats {
            println!("    - {threat}");
        }
    }
    println!("  recommendations:");
    for recommendation in &report.recommendations {
        println!("    - {recommendation}");
    }
}
