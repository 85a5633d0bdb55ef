//! Single photo command handler, straight from the NASA API

use crate::clients::NasaClient;
use crate::config::Config;
use crate::models::PhotoQuery;

pub async fn cmd_photo(
    config: &Config,
    rover: Option<&str>,
    sol: Option<i32>,
    camera: Option<&str>,
    page: u32,
) -> anyhow::Result<()> {
    let rover = rover.unwrap_or(&config.nasa.default_rover);
    let sol = sol.unwrap_or(config.nasa.default_sol);
    let query = PhotoQuery::new(rover, sol, camera);
    let page = page.max(1);

    let client = NasaClient::new(config.nasa.clone())?;
    match client.fetch_photo_at(&query, page).await? {
        Some(photo) => {
            println!("{} sol {} - photo {}", query.rover, query.sol, page);
            println!("{:-<70}", "");
            println!("id:     {}", photo.id);
            println!("camera: {}", photo.camera_name().unwrap_or("?"));
            println!("date:   {}", photo.earth_date);
            println!("image:  {}", photo.img_src);
        }
        None => println!(
            "No photo {} for {} on sol {}.",
            page, query.rover, query.sol
        ),
    }

    Ok(())
}
