use std::sync::Arc;

use chrono::{TimeZone, Utc};
use podcast_core::favourites::{FavouriteSort, FavouritesStore};
use podcast_core::model::{Episode, EpisodeSnapshot, ShowId};
use podcast_core::storage::{JsonFileStorage, MemoryStorage, Storage, FAVOURITES_KEY};
use tempfile::TempDir;

fn snapshot(show: &str, title: &str, season: u32, number: u32) -> EpisodeSnapshot {
    EpisodeSnapshot {
        show_id: ShowId::from(show),
        show_title: format!("Show {}", show),
        show_image: format!("https://img.test/{}.jpg", show),
        episode: Episode {
            id: None,
            title: title.to_string(),
            description: "desc".into(),
            audio_src: format!("https://cdn.test/{}/{}/{}.mp3", show, season, number),
            season,
            number,
        },
    }
}

fn fill(store: &mut FavouritesStore) {
    let at = |h| Utc.with_ymd_and_hms(2024, 6, 1, h, 0, 0).unwrap();
    store.toggle_favourite_at(snapshot("1", "Pilot", 1, 1), at(8));
    store.toggle_favourite_at(snapshot("2", "Opening", 1, 1), at(9));
    store.toggle_favourite_at(snapshot("1", "Finale", 2, 6), at(10));
}

#[test]
fn memory_round_trip_survives_restart() {
    let disk = MemoryStorage::new();
    let mut first = FavouritesStore::load(Arc::new(disk.clone()));
    fill(&mut first);
    first.sort_favourites(FavouriteSort::TitleDesc);

    let second = FavouritesStore::load(Arc::new(disk));
    assert_eq!(second.sort(), FavouriteSort::DateDesc);
    assert_eq!(second.len(), first.len());
    assert!(second.is_favourite("1-S2-E6"));
    let titles: Vec<_> = second.entries().iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Finale", "Opening", "Pilot"]);
}

#[test]
fn file_round_trip_survives_restart() {
    let dir = TempDir::new().unwrap();
    let storage = JsonFileStorage::new(dir.path());

    let mut first = FavouritesStore::load(Arc::new(storage.clone()));
    fill(&mut first);
    first.remove_favourite("2-S1-E1");
    assert!(storage.path_for(FAVOURITES_KEY).exists());

    let second = FavouritesStore::load(Arc::new(storage));
    assert_eq!(second.entries(), first.entries());
    assert_eq!(second.len(), 2);

    let groups = second.list();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].show_title, "Show 1");
    assert_eq!(groups[0].len(), 2);
}

#[test]
fn corrupt_file_starts_empty_and_recovers() {
    let dir = TempDir::new().unwrap();
    let storage = JsonFileStorage::new(dir.path());
    storage.write(FAVOURITES_KEY, "{\"truncated\": ").unwrap();

    let mut store = FavouritesStore::load(Arc::new(storage.clone()));
    assert!(store.is_empty());

    store.toggle_favourite(snapshot("3", "Again", 1, 1));
    let reloaded = FavouritesStore::load(Arc::new(storage));
    assert_eq!(reloaded.len(), 1);
}
