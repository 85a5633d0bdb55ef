//! APOD command handler

use crate::clients::NasaClient;
use crate::config::Config;

pub async fn cmd_apod(config: &Config) -> anyhow::Result<()> {
    let client = NasaClient::new(config.nasa.clone())?;
    let apod = client.fetch_apod().await?;

    println!(
        "{} ({})",
        apod.title.as_deref().unwrap_or("Untitled"),
        apod.date.as_deref().unwrap_or("?")
    );
    println!("{:-<70}", "");
    if let Some(explanation) = &apod.explanation {
        println!("{explanation}");
        println!();
    }
    match &apod.url {
        Some(url) => println!("URL: {url}"),
        None => println!(
            "No image URL (media type: {})",
            apod.media_type.as_deref().unwrap_or("unknown")
        ),
    }
    if let Some(hd) = &apod.hdurl {
        println!("HD:  {hd}");
    }
    if let Some(copyright) = &apod.copyright {
        println!("©    {}", copyright.trim());
    }

    Ok(())
}
