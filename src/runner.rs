use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use reconpipe::config::Config;
use reconpipe::exec::{locate_executable, wait_for_port, ChainedTask, ProcessRegistry};
use reconpipe::{filter, report, utils};

use crate::cli::Cli;

const OUTPUT_DIR: &str = "output";
const RESULTS_DIR: &str = "output/results";
const LOGS_DIR: &str = "output/logs";
const TEMP_DIR: &str = "output/temp";

fn print_banner() {
    println!(
        r#"
             ┌──────────────────────────────────────────┐
             │   reconpipe — recon tool orchestrator    │
             └──────────────────────────────────────────┘
    "#
    );
}

/// Console plus append-mode application log; the file layer always
/// records debug so post-mortems have the full picture.
fn init_logging(debug: bool) -> anyhow::Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    utils::ensure_dir(Path::new(LOGS_DIR))?;
    let app_log = std::fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(Path::new(LOGS_DIR).join("app.log"))?;

    let console_level = if debug { "debug" } else { "info" };
    let console = fmt::layer()
        .with_target(false)
        .with_filter(EnvFilter::try_new(console_level).unwrap_or_else(|_| EnvFilter::new("info")));
    let file = fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(Arc::new(app_log))
        .with_filter(EnvFilter::new("debug"));

    tracing_subscriber::registry().with(console).with(file).init();
    Ok(())
}

/// Prompt for proxy startup, defaulting to yes. Automation mode skips
/// the prompt entirely.
fn confirm_proxy_start(auto: bool) -> bool {
    if auto {
        tracing::info!("automation mode enabled, starting proxy by default");
        return true;
    }

    print!("Start the intercepting proxy? [Y/n]: ");
    let _ = std::io::stdout().flush();
    let mut response = String::new();
    if std::io::stdin().read_line(&mut response).is_err() {
        return false;
    }
    matches!(response.trim().to_lowercase().as_str(), "" | "y" | "yes")
}

pub async fn run_from_cli(cli: Cli) -> anyhow::Result<()> {
    init_logging(cli.debug)?;
    let config = Config::default();

    print_banner();
    tracing::info!(auto = cli.auto, tor = cli.tor, "starting reconpipe");

    let registry = Arc::new(ProcessRegistry::new());
    reconpipe::exec::interrupt::install(registry.clone());

    if !cli.domains.exists() {
        anyhow::bail!(
            "domain list {} not found; create it with one domain per line",
            cli.domains.display()
        );
    }
    let domain_count = utils::count_lines(&cli.domains)?;
    tracing::info!("found {} ({domain_count} domain(s))", cli.domains.display());

    for dir in [OUTPUT_DIR, RESULTS_DIR, LOGS_DIR, TEMP_DIR] {
        utils::ensure_dir(Path::new(dir))?;
    }

    let proxy_path = locate_executable("burpsuite", cli.proxy_path.as_deref())?;
    tracing::info!("using proxy path: {}", proxy_path.display());
    tracing::info!("static filter pattern: {}", filter::static_filter_grep());

    let proxy_port = if cli.tor { config.tor_port } else { config.proxy_port };
    let proxy_url = if cli.tor {
        format!("socks5://127.0.0.1:{}", config.tor_port)
    } else {
        format!("http://127.0.0.1:{}", config.proxy_port)
    };

    // ProxySetup
    let mut proxy_started = false;
    if confirm_proxy_start(cli.auto) {
        tracing::info!("starting proxy at {}", proxy_path.display());
        let _proxy = ChainedTask::new(proxy_path.display().to_string())
            .log_to(Path::new(LOGS_DIR).join("proxy.log"))
            .spawn(registry.clone());

        let ready = wait_for_port(
            "localhost",
            proxy_port,
            Duration::from_secs(config.readiness_timeout_secs),
        )
        .await;
        if !ready {
            anyhow::bail!("proxy port {proxy_port} not ready");
        }
        tracing::info!("proxy port {proxy_port} is ready");
        proxy_started = true;
    } else {
        tracing::info!("skipping proxy startup");
    }

    let assetfinder = locate_executable("assetfinder", None)?;
    let subfinder = locate_executable("subfinder", None)?;
    let httpx = locate_executable("httpx", None)?;
    let wafw00f = locate_executable("wafw00f", None)?;
    tracing::info!("using assetfinder path: {}", assetfinder.display());
    tracing::info!("using subfinder path: {}", subfinder.display());
    tracing::info!("using httpx path: {}", httpx.display());
    tracing::info!("using wafw00f path: {}", wafw00f.display());

    // DiscoveryRunning: two independent pipelines, each chaining a
    // liveness probe behind its discovery step
    println!("[*] Discovery...");
    let domains = cli.domains.display().to_string();

    tracing::info!("starting asset discovery with alive check");
    let asset_task = ChainedTask::new(format!(
        "cat {domains} | {assetfinder} | anew {TEMP_DIR}/assets.txt",
        assetfinder = assetfinder.display()
    ))
    .then(format!(
        "{httpx} -l {TEMP_DIR}/assets.txt -ports {ports} -threads {threads} | anew {RESULTS_DIR}/alive_assets.txt",
        httpx = httpx.display(),
        ports = config.probe_ports,
        threads = config.probe_threads
    ))
    .log_to(Path::new(LOGS_DIR).join("assetfinder.log"))
    .spawn(registry.clone());

    tracing::info!("starting subdomain discovery with alive check");
    let subdomain_task = ChainedTask::new(format!(
        "{subfinder} -dL {domains} | anew {TEMP_DIR}/subdomains.txt",
        subfinder = subfinder.display()
    ))
    .then(format!(
        "{httpx} -l {TEMP_DIR}/subdomains.txt -ports {ports} -threads {threads} | anew {RESULTS_DIR}/alive_subdomains.txt",
        httpx = httpx.display(),
        ports = config.probe_ports,
        threads = config.probe_threads
    ))
    .log_to(Path::new(LOGS_DIR).join("subfinder.log"))
    .spawn(registry.clone());

    // DiscoveryJoined: both pipelines must finish, in either order
    let (asset_done, subdomain_done) = futures::future::join(asset_task, subdomain_task).await;
    if !matches!(asset_done, Ok(true)) {
        tracing::warn!("asset discovery pipeline reported failure");
    }
    if !matches!(subdomain_done, Ok(true)) {
        tracing::warn!("subdomain discovery pipeline reported failure");
    }
    tracing::info!("asset and subdomain discovery tasks completed");

    // WafScanning
    println!("[*] WAF scan...");
    let use_proxy = cli.tor || proxy_started;
    let waf_json = format!("{RESULTS_DIR}/waf_results.json");
    let mut waf_cmd = format!(
        "{wafw00f} --input={TEMP_DIR}/subdomains.txt --format=json --verbose --output={waf_json}",
        wafw00f = wafw00f.display()
    );
    if use_proxy {
        tracing::info!("[WAF] scanning through proxy {proxy_url}");
        waf_cmd.push_str(&format!(" --proxy {proxy_url}"));
    } else {
        tracing::info!("[WAF] scanning without proxy");
    }

    let waf_ok = ChainedTask::new(waf_cmd)
        .log_to(Path::new(LOGS_DIR).join("wafw00f.log"))
        .spawn(registry.clone())
        .await
        .unwrap_or(false);
    tracing::info!("WAF scan completed");

    // ResultExtraction
    if waf_ok {
        report::extract_unprotected(
            Path::new(&waf_json),
            &Path::new(RESULTS_DIR).join("no_waf_domains.txt"),
        )?;
    } else {
        tracing::error!("WAF scan failed, skipping result extraction");
    }

    // Done: drain anything still running (a confirmed proxy lives
    // until here)
    if !registry.is_empty() {
        tracing::info!("draining {} still-running process(es)", registry.len());
        registry.terminate_all();
    }
    tracing::info!("recon pipeline finished");
    Ok(())
}
