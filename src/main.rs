use std::env;

use colored::Colorize;
use decloneify::{spotify::ReqwestTransport, Config, Result, Spotify};

async fn run(playlist_ids: &[String]) -> Result<()> {
    let config = Config::load()?;
    let credential = config.credential();

    let transport = match config.timeout() {
        Some(timeout) => ReqwestTransport::with_timeout(timeout)?,
        None => ReqwestTransport::new(),
    };
    let spotify = Spotify::with_transport(transport, config.api_url());

    let user_id = match &config.user_id {
        Some(user_id) => user_id.clone(),
        None => spotify.load_user_id(credential.as_ref()).await?,
    };

    if playlist_ids.is_empty() {
        let playlists = spotify.load_playlists(&user_id, credential.as_ref()).await?;
        for playlist in playlists.items {
            println!("{}  {}", playlist.id.dimmed(), playlist.name);
        }
        return Ok(());
    }

    for playlist_id in playlist_ids {
        let removed = spotify
            .remove_duplicate_tracks(&user_id, playlist_id, credential.as_ref())
            .await?;

        if removed {
            println!("{} {}", playlist_id, "duplicates removed".green());
        } else {
            println!("{} {}", playlist_id, "no duplicates".yellow());
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let playlist_ids: Vec<String> = env::args().skip(1).collect();

    if let Err(e) = run(&playlist_ids).await {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
