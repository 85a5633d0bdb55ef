//! Photos command handler

use crate::config::Config;
use crate::models::PhotoQuery;
use crate::services::{Pagination, Persistence, PhotoLookup};
use crate::state::SharedState;

pub async fn cmd_photos(
    config: &Config,
    rover: Option<&str>,
    sol: Option<i32>,
    camera: Option<&str>,
    page: u32,
    limit: Option<u32>,
) -> anyhow::Result<()> {
    let rover = rover.unwrap_or(&config.nasa.default_rover);
    let sol = sol.unwrap_or(config.nasa.default_sol);
    let query = PhotoQuery::new(rover, sol, camera);
    let pagination = Pagination {
        page: page.max(1),
        limit: limit
            .unwrap_or(config.nasa.default_limit)
            .clamp(1, Pagination::MAX_LIMIT),
    };

    let state = SharedState::new(config.clone()).await?;

    let set = match state.photo_service.lookup(&query).await {
        PhotoLookup::Found(set) => set,
        PhotoLookup::NotFound => {
            println!("No photos found for {} on sol {}.", query.rover, query.sol);
            return Ok(());
        }
        PhotoLookup::UpstreamFailed(e) => return Err(e.into()),
    };

    let total = set.photos.len();
    let Some(photos) = pagination.slice(&set.photos) else {
        println!(
            "Page {} is out of range ({} photos, {} per page).",
            pagination.page, total, pagination.limit
        );
        return Ok(());
    };

    println!(
        "{} sol {} - page {} ({} photos total, source: {:?})",
        query.rover, query.sol, pagination.page, total, set.source
    );
    println!("{:-<70}", "");

    for photo in photos {
        let camera = photo
            .camera
            .as_ref()
            .map_or("?", |c| c.name.as_str());
        println!("#{} [{}] {} {}", photo.id, camera, photo.earth_date, photo.img_src);
    }

    match set.persistence {
        Persistence::Stored { inserted } => println!("\nStored {inserted} new photos."),
        Persistence::Failed(reason) => println!("\n⚠ Photos were not stored: {reason}"),
        Persistence::Skipped => {}
    }

    Ok(())
}
