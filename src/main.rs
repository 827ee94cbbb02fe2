use anyhow::Context;
use std::borrow::Cow;
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use wvw_client::{Config, MatchupDetails, Team, WvwClient};

#[tokio::main]
async fn main() {
    // 로깅 초기화: 콘솔 + 일별 로테이션 파일
    let file_appender = tracing_appender::rolling::Builder::new()
        .rotation(tracing_appender::rolling::Rotation::DAILY)
        .filename_prefix("wvw-client")
        .filename_suffix("log")
        .build("logs")
        .expect("initializing rolling file appender failed");

    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into())
        )
        .with_writer(std::io::stderr.and(non_blocking))
        .with_ansi(true)
        .init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let config_path = if args.is_empty() {
        Cow::from("./config.toml")
    } else {
        Cow::from(args.remove(0))
    };
    let world_id = args.pop();

    let config = match get_config(&*config_path).await {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load config: {}", e);
            return;
        }
    };

    if let Err(e) = run(&config, world_id.as_deref()).await {
        tracing::error!("Client error: {}", e);
        tracing::error!("  {:?}", e);
    }
}

async fn run(config: &Config, world_id: Option<&str>) -> anyhow::Result<()> {
    let client = WvwClient::from_config(config)
        .await
        .context("could not initialize wvw client")?;

    let matchups = client
        .list_matchups(false)
        .await
        .context("could not list matchups")?;

    for matchup in matchups.iter() {
        println!(
            "{:>5}  {} / {} / {}",
            matchup.id, matchup.red.display_name, matchup.blue.display_name, matchup.green.display_name
        );
    }

    let Some(world_id) = world_id else {
        // 월드를 지정하지 않으면 전체 매치업 점수만 동시에 조회
        let all = futures_util::future::try_join_all(
            matchups.iter().map(|matchup| client.fetch_details(matchup)),
        )
        .await
        .context("could not fetch matchup details")?;

        for details in &all {
            let score = details.score();
            println!(
                "{:>5}  red {} / blue {} / green {}",
                details.id(), score[Team::Red], score[Team::Blue], score[Team::Green]
            );
        }
        return Ok(());
    };

    let world = client.world(world_id).await;
    let matchup = client
        .find_matchup(&world)
        .await
        .with_context(|| format!("could not find matchup for world {}", world_id))?;
    let details = client
        .fetch_details(&matchup)
        .await
        .with_context(|| format!("could not fetch details for {}", matchup.id))?;

    print_details(&details);
    Ok(())
}

fn print_details(details: &MatchupDetails) {
    let score = details.score();
    println!(
        "\n[{}] red {} / blue {} / green {}",
        details.id(), score[Team::Red], score[Team::Blue], score[Team::Green]
    );

    for map in details.maps() {
        let score = map.score();
        println!(
            "  {} (red {} / blue {} / green {})",
            map.kind(), score[Team::Red], score[Team::Blue], score[Team::Green]
        );
        for objective in map.objectives() {
            let name = if objective.name().is_empty() {
                objective.id()
            } else {
                objective.name()
            };
            match objective.claimed_by() {
                Some(guild) => println!("    {:<24} {} [{}]", name, objective.owner(), guild),
                None => println!("    {:<24} {}", name, objective.owner()),
            }
        }
    }
}

async fn get_config<P: AsRef<Path>>(path: P) -> anyhow::Result<Config> {
    let mut f = File::open(path)
        .await
        .context("could not open config file")?;
    let mut toml = String::new();
    f.read_to_string(&mut toml)
        .await
        .context("could not read config file")?;
    let config = toml::from_str(&toml).context("could not parse config file")?;

    Ok(config)
}
