//! Sprite file lookup
//!
//! Every `SpriteId` maps to a file under the configured asset root. All of
//! them must exist before a session starts.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::AssetPaths;
use crate::error::LoadError;
use crate::platform::SpriteId;

/// Resolved sprite paths, plus the font
#[derive(Debug, Clone)]
pub struct SpriteAtlas {
    paths: HashMap<SpriteId, PathBuf>,
    font: PathBuf,
}

impl SpriteAtlas {
    /// Map every sprite to its file and fail on the first one missing
    pub fn resolve(root: impl AsRef<Path>, assets: &AssetPaths) -> Result<Self, LoadError> {
        let root = root.as_ref();
        let mut paths = HashMap::new();
        for (sprite, file) in entries(assets) {
            let path = root.join(file);
            if !path.is_file() {
                return Err(LoadError::MissingAsset {
                    sprite: format!("{sprite:?}"),
                    path,
                });
            }
            paths.insert(sprite, path);
        }

        let font = root.join(&assets.font);
        if !font.is_file() {
            return Err(LoadError::MissingAsset {
                sprite: "font".to_string(),
                path: font,
            });
        }

        log::info!("Resolved {} sprites under {}", paths.len(), root.display());
        Ok(Self { paths, font })
    }

    pub fn path(&self, sprite: SpriteId) -> Option<&Path> {
        self.paths.get(&sprite).map(PathBuf::as_path)
    }

    pub fn font(&self) -> &Path {
        &self.font
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

fn entries(assets: &AssetPaths) -> Vec<(SpriteId, &str)> {
    let mut entries = vec![
        (SpriteId::Taxi, assets.taxi.as_str()),
        (SpriteId::TaxiDamaged, assets.taxi_damaged.as_str()),
        (SpriteId::Driver, assets.driver.as_str()),
        (SpriteId::Passenger, assets.passenger.as_str()),
        (SpriteId::EnemyCar, assets.enemy_car.as_str()),
        (SpriteId::Fireball, assets.fireball.as_str()),
        (SpriteId::Fire, assets.fire.as_str()),
        (SpriteId::Smoke, assets.smoke.as_str()),
        (SpriteId::Blood, assets.blood.as_str()),
        (SpriteId::Coin, assets.coin.as_str()),
        (SpriteId::InvinciblePower, assets.invincible_power.as_str()),
        (SpriteId::EndFlag, assets.end_flag.as_str()),
        (SpriteId::BackgroundSunny, assets.background_sunny.as_str()),
        (SpriteId::BackgroundRaining, assets.background_raining.as_str()),
        (SpriteId::BackgroundHome, assets.background_home.as_str()),
        (SpriteId::BackgroundPlayerInfo, assets.background_player_info.as_str()),
        (SpriteId::BackgroundGameEnd, assets.background_game_end.as_str()),
    ];
    for (variant, file) in assets.other_cars.iter().enumerate() {
        entries.push((SpriteId::OtherCar(variant as u8), file.as_str()));
    }
    entries
}
