use clap::{Arg, ArgMatches, Command};
use tracing_subscriber::{EnvFilter, fmt};

use boston_data::{FetchConfig, Fetcher};

fn cli() -> Command {
    Command::new("boston-data")
        .about("Print the first five Boston open-data records whose title matches 'jones'")
        .version(clap::crate_version!())
        .arg(
            Arg::new("base-url")
                .long("base-url")
                .value_name("URL")
                .help("CKAN API root to query [env: DATA_BOSTON_BASE_URL]"),
        )
        .arg(
            Arg::new("user-agent")
                .long("user-agent")
                .value_name("UA")
                .help("User-Agent header to send [env: DATA_BOSTON_USER_AGENT]"),
        )
        .after_help(
            "The query is fixed: resource e4bfe397-6bfc-49c5-9367-c879fac7401d, limit 5,\n\
             q=title:jones. The JSON response is written to stdout.\n\
             Set RUST_LOG=debug to trace the request on stderr.",
        )
}

/// Environment first, then flags on top
fn build_config(matches: &ArgMatches) -> FetchConfig {
    let mut config = FetchConfig::from_env();

    if let Some(base_url) = matches.get_one::<String>("base-url") {
        config = config.with_base_url(base_url);
    }
    if let Some(user_agent) = matches.get_one::<String>("user-agent") {
        config = config.with_user_agent(user_agent);
    }

    config
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let matches = cli().get_matches();
    let fetcher = Fetcher::new(build_config(&matches))?;

    fetcher.run(&mut std::io::stdout().lock()).await?;

    Ok(())
}
