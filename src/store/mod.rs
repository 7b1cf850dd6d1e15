use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use rand::Rng;
use rand::seq::IteratorRandom;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::models::{
    DraftRecord, DraftSheet, HOF_SCORE_THRESHOLD, NewPlayer, Player, Position, Team,
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("player not found")]
    NotFound,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("invalid JSON in data file: {0}")]
    Json(#[from] serde_json::Error),
}

struct Inner {
    players: Vec<Player>,
    drafts: Vec<DraftRecord>,
}

/// JSON-file-backed store for players and drafts.
///
/// Both collections are loaded once at startup and held behind a single
/// `RwLock`, so concurrent requests serialize around mutations. Every
/// mutation rewrites the whole backing file.
pub struct Store {
    players_path: PathBuf,
    drafts_path: PathBuf,
    inner: RwLock<Inner>,
}

impl Store {
    /// Load both data files. Fails if either file is missing or malformed.
    pub async fn load(
        players_path: impl Into<PathBuf>,
        drafts_path: impl Into<PathBuf>,
    ) -> Result<Self, StoreError> {
        let players_path = players_path.into();
        let drafts_path = drafts_path.into();

        let players: Vec<Player> =
            serde_json::from_slice(&tokio::fs::read(&players_path).await?)?;
        let drafts: Vec<DraftRecord> =
            serde_json::from_slice(&tokio::fs::read(&drafts_path).await?)?;

        tracing::debug!(
            players = players.len(),
            drafts = drafts.len(),
            "loaded data files"
        );

        Ok(Store {
            players_path,
            drafts_path,
            inner: RwLock::new(Inner { players, drafts }),
        })
    }

    // Queries

    pub async fn players(&self) -> Vec<Player> {
        self.inner.read().await.players.clone()
    }

    pub async fn player_by_id(&self, player_id: u64) -> Option<Player> {
        self.inner
            .read()
            .await
            .players
            .iter()
            .find(|p| p.id == player_id)
            .cloned()
    }

    pub async fn players_by_position(&self, position: Position) -> Vec<Player> {
        self.inner
            .read()
            .await
            .players
            .iter()
            .filter(|p| p.position == position)
            .cloned()
            .collect()
    }

    pub async fn top_scorers(&self, top_n: i64) -> Vec<Player> {
        self.top_by(top_n, |p| p.ppg).await
    }

    pub async fn top_assisters(&self, top_n: i64) -> Vec<Player> {
        self.top_by(top_n, |p| p.apg).await
    }

    pub async fn top_rebounders(&self, top_n: i64) -> Vec<Player> {
        self.top_by(top_n, |p| p.rpg).await
    }

    async fn top_by<F>(&self, top_n: i64, metric: F) -> Vec<Player>
    where
        F: Fn(&Player) -> f64,
    {
        let mut players = self.inner.read().await.players.clone();
        players.sort_by(|a, b| {
            metric(b)
                .partial_cmp(&metric(a))
                .unwrap_or(Ordering::Equal)
        });
        // No bounds check on top_n: negative yields empty, oversize yields all.
        players.truncate(top_n.max(0) as usize);
        players
    }

    pub async fn by_min_championships(&self, min_championships: i64) -> Vec<Player> {
        self.inner
            .read()
            .await
            .players
            .iter()
            .filter(|p| i64::from(p.championships) >= min_championships)
            .cloned()
            .collect()
    }

    /// Containment match, not exact equality: the requested nickname only has
    /// to appear inside the string form of the player's team field.
    pub async fn by_team(&self, team: Team) -> Vec<Player> {
        self.inner
            .read()
            .await
            .players
            .iter()
            .filter(|p| p.team.as_str().contains(team.as_str()))
            .cloned()
            .collect()
    }

    pub async fn without_championships(&self) -> Vec<Player> {
        self.inner
            .read()
            .await
            .players
            .iter()
            .filter(|p| p.championships == 0)
            .cloned()
            .collect()
    }

    pub async fn hall_of_fame_candidates(&self) -> Vec<Player> {
        self.inner
            .read()
            .await
            .players
            .iter()
            .filter(|p| p.hall_of_fame_score() >= HOF_SCORE_THRESHOLD)
            .cloned()
            .collect()
    }

    pub async fn all_stars(&self, min_appearances: i64) -> Vec<Player> {
        self.inner
            .read()
            .await
            .players
            .iter()
            .filter(|p| i64::from(p.all_star_appearances) >= min_appearances)
            .cloned()
            .collect()
    }

    pub async fn drafts(&self) -> Vec<DraftRecord> {
        self.inner.read().await.drafts.clone()
    }

    // Mutations

    pub async fn add_championship(&self, player_id: u64) -> Result<Player, StoreError> {
        self.update_player(player_id, |p| p.championships += 1).await
    }

    pub async fn add_all_star(&self, player_id: u64) -> Result<Player, StoreError> {
        self.update_player(player_id, |p| p.all_star_appearances += 1)
            .await
    }

    pub async fn change_team(&self, player_id: u64, new_team: Team) -> Result<Player, StoreError> {
        self.update_player(player_id, |p| p.team = new_team).await
    }

    pub async fn change_position(
        &self,
        player_id: u64,
        new_position: Position,
    ) -> Result<Player, StoreError> {
        self.update_player(player_id, |p| p.position = new_position)
            .await
    }

    async fn update_player<F>(&self, player_id: u64, apply: F) -> Result<Player, StoreError>
    where
        F: FnOnce(&mut Player),
    {
        let mut inner = self.inner.write().await;
        let player = inner
            .players
            .iter_mut()
            .find(|p| p.id == player_id)
            .ok_or(StoreError::NotFound)?;
        apply(player);
        let updated = player.clone();
        write_json(&self.players_path, &inner.players).await?;
        Ok(updated)
    }

    /// Append a player with id = current count + 1. Ids are not reused after
    /// deletions, so the next id can collide with a surviving record.
    pub async fn add_player(&self, new_player: NewPlayer) -> Result<Player, StoreError> {
        let mut inner = self.inner.write().await;
        let player = Player {
            id: (inner.players.len() + 1) as u64,
            name: new_player.name,
            position: new_player.position,
            age: new_player.age,
            team: new_player.team,
            ppg: new_player.ppg,
            apg: new_player.apg,
            rpg: new_player.rpg,
            championships: new_player.championships,
            all_star_appearances: new_player.all_star_appearances,
        };
        inner.players.push(player.clone());
        write_json(&self.players_path, &inner.players).await?;
        Ok(player)
    }

    /// Remove every entry with the given id and persist the remainder.
    /// The bound check is against collection size, not id existence.
    pub async fn delete_player(&self, player_id: u64) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        if player_id as usize > inner.players.len() {
            return Err(StoreError::NotFound);
        }
        inner.players.retain(|p| p.id != player_id);
        write_json(&self.players_path, &inner.players).await?;
        Ok(())
    }

    /// Pick one uniformly-random eligible player per position and append the
    /// resulting sheet to the draft file.
    pub async fn random_draft(&self) -> Result<DraftRecord, StoreError> {
        let mut inner = self.inner.write().await;
        let sheet = {
            let mut rng = rand::thread_rng();
            DraftSheet {
                point_guard: pick(&inner.players, Position::PointGuard, &mut rng),
                shooting_guard: pick(&inner.players, Position::ShootingGuard, &mut rng),
                small_forward: pick(&inner.players, Position::SmallForward, &mut rng),
                power_forward: pick(&inner.players, Position::PowerForward, &mut rng),
                center: pick(&inner.players, Position::Center, &mut rng),
            }
        };
        let record = DraftRecord {
            id: (inner.drafts.len() + 1) as u64,
            draft: sheet,
        };
        inner.drafts.push(record.clone());
        write_json(&self.drafts_path, &inner.drafts).await?;
        Ok(record)
    }
}

fn pick<R: Rng>(players: &[Player], position: Position, rng: &mut R) -> Option<String> {
    players
        .iter()
        .filter(|p| p.position == position)
        .choose(rng)
        .map(|p| p.name.clone())
}

/// Rewrite the whole file atomically: write a temp file, then rename over.
async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let bytes = serde_json::to_vec_pretty(value)?;
    let tmp = path.with_extension("tmp");
    tokio::fs::write(&tmp, &bytes).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn player(id: u64, name: &str, position: Position, ppg: f64) -> Player {
        Player {
            id,
            name: name.to_string(),
            position,
            age: 35,
            team: Team::Lakers,
            ppg,
            apg: 5.0,
            rpg: 7.0,
            championships: 2,
            all_star_appearances: 8,
        }
    }

    fn seed_players() -> Vec<Player> {
        vec![
            player(1, "Magic Johnson", Position::PointGuard, 19.5),
            player(2, "Michael Jordan", Position::ShootingGuard, 30.1),
            player(3, "Larry Bird", Position::SmallForward, 24.3),
            player(4, "Tim Duncan", Position::PowerForward, 19.0),
        ]
    }

    async fn store_with(dir: &TempDir, players: &[Player]) -> Store {
        let players_path = dir.path().join("players.json");
        let drafts_path = dir.path().join("draft.json");
        std::fs::write(&players_path, serde_json::to_vec_pretty(players).unwrap()).unwrap();
        std::fs::write(&drafts_path, b"[]").unwrap();
        Store::load(players_path, drafts_path).await.unwrap()
    }

    #[tokio::test]
    async fn player_by_id_finds_and_misses() {
        let dir = TempDir::new().unwrap();
        let store = store_with(&dir, &seed_players()).await;

        let found = store.player_by_id(2).await.unwrap();
        assert_eq!(found.name, "Michael Jordan");
        assert!(store.player_by_id(99).await.is_none());
    }

    #[tokio::test]
    async fn top_scorers_sorted_and_truncated() {
        let dir = TempDir::new().unwrap();
        let store = store_with(&dir, &seed_players()).await;

        let top = store.top_scorers(2).await;
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].name, "Michael Jordan");
        assert_eq!(top[1].name, "Larry Bird");

        assert!(store.top_scorers(0).await.is_empty());
        assert!(store.top_scorers(-3).await.is_empty());
        assert_eq!(store.top_scorers(100).await.len(), 4);
    }

    #[tokio::test]
    async fn hall_of_fame_uses_weighted_threshold() {
        let dir = TempDir::new().unwrap();
        let mut scrub = player(1, "Bench Guy", Position::Center, 2.0);
        scrub.apg = 1.0;
        scrub.rpg = 2.0;
        scrub.championships = 0;
        scrub.all_star_appearances = 0;
        let star = player(2, "Ring Chaser", Position::Center, 12.5);
        // 12.5*0.4 + 5*0.3 + 7*0.2 + 2*10 = 27.9
        let store = store_with(&dir, &[scrub, star]).await;

        let candidates = store.hall_of_fame_candidates().await;
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].name, "Ring Chaser");
    }

    #[tokio::test]
    async fn add_championship_persists_to_file() {
        let dir = TempDir::new().unwrap();
        let store = store_with(&dir, &seed_players()).await;

        let updated = store.add_championship(3).await.unwrap();
        assert_eq!(updated.championships, 3);

        let on_disk: Vec<Player> =
            serde_json::from_slice(&std::fs::read(dir.path().join("players.json")).unwrap())
                .unwrap();
        let bird = on_disk.iter().find(|p| p.id == 3).unwrap();
        assert_eq!(bird.championships, 3);
    }

    #[tokio::test]
    async fn mutating_missing_id_fails_not_found() {
        let dir = TempDir::new().unwrap();
        let store = store_with(&dir, &seed_players()).await;

        assert!(matches!(
            store.add_championship(42).await,
            Err(StoreError::NotFound)
        ));
        assert!(matches!(
            store.change_team(42, Team::Heat).await,
            Err(StoreError::NotFound)
        ));
    }

    #[tokio::test]
    async fn add_player_assigns_count_plus_one() {
        let dir = TempDir::new().unwrap();
        let store = store_with(&dir, &seed_players()).await;

        let added = store
            .add_player(NewPlayer {
                name: "Stephen Curry".to_string(),
                position: Position::PointGuard,
                age: 37,
                team: Team::Warriors,
                ppg: 24.7,
                apg: 6.4,
                rpg: 4.7,
                championships: 4,
                all_star_appearances: 10,
            })
            .await
            .unwrap();
        assert_eq!(added.id, 5);

        let on_disk: Vec<Player> =
            serde_json::from_slice(&std::fs::read(dir.path().join("players.json")).unwrap())
                .unwrap();
        assert!(on_disk.iter().any(|p| p.name == "Stephen Curry"));
    }

    #[tokio::test]
    async fn next_id_follows_count_after_delete() {
        let dir = TempDir::new().unwrap();
        let store = store_with(&dir, &seed_players()).await;

        store.delete_player(1).await.unwrap();
        let added = store
            .add_player(NewPlayer {
                name: "Kevin Durant".to_string(),
                position: Position::SmallForward,
                age: 36,
                team: Team::Suns,
                ppg: 27.2,
                apg: 4.4,
                rpg: 7.0,
                championships: 2,
                all_star_appearances: 14,
            })
            .await
            .unwrap();
        // 3 players remain, so the new id is 4 and collides with Tim Duncan.
        assert_eq!(added.id, 4);
    }

    #[tokio::test]
    async fn delete_bound_check_uses_collection_size() {
        let dir = TempDir::new().unwrap();
        let store = store_with(&dir, &seed_players()).await;

        assert!(matches!(
            store.delete_player(5).await,
            Err(StoreError::NotFound)
        ));

        store.delete_player(2).await.unwrap();
        let remaining = store.players().await;
        assert_eq!(remaining.len(), 3);
        assert!(remaining.iter().all(|p| p.id != 2));
    }

    #[tokio::test]
    async fn random_draft_fills_every_slot_or_null() {
        let dir = TempDir::new().unwrap();
        // No center in the pool, so that slot must be null.
        let store = store_with(&dir, &seed_players()).await;

        let record = store.random_draft().await.unwrap();
        assert_eq!(record.id, 1);
        assert_eq!(record.draft.point_guard.as_deref(), Some("Magic Johnson"));
        assert!(record.draft.center.is_none());

        let on_disk: Vec<DraftRecord> =
            serde_json::from_slice(&std::fs::read(dir.path().join("draft.json")).unwrap()).unwrap();
        assert_eq!(on_disk, vec![record]);
    }

    #[tokio::test]
    async fn mutations_survive_reload() {
        let dir = TempDir::new().unwrap();
        let store = store_with(&dir, &seed_players()).await;

        store.add_championship(1).await.unwrap();
        store.change_team(2, Team::Wizards).await.unwrap();
        store.delete_player(4).await.unwrap();
        store.random_draft().await.unwrap();
        let in_memory = store.players().await;
        let drafts = store.drafts().await;

        let reloaded = Store::load(
            dir.path().join("players.json"),
            dir.path().join("draft.json"),
        )
        .await
        .unwrap();
        assert_eq!(reloaded.players().await, in_memory);
        assert_eq!(reloaded.drafts().await, drafts);
    }
}
