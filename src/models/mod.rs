use std::fmt;

use serde::{Deserialize, Serialize};

/// Composite-score threshold for hall-of-fame candidacy.
pub const HOF_SCORE_THRESHOLD: f64 = 25.0;

/// Playing positions, serialized as their short codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "PG")]
    PointGuard,
    #[serde(rename = "SG")]
    ShootingGuard,
    #[serde(rename = "SF")]
    SmallForward,
    #[serde(rename = "PF")]
    PowerForward,
    #[serde(rename = "C")]
    Center,
}

impl Position {
    /// Fixed iteration order used when assembling a draft sheet.
    pub const ALL: [Position; 5] = [
        Position::PointGuard,
        Position::ShootingGuard,
        Position::SmallForward,
        Position::PowerForward,
        Position::Center,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::PointGuard => "PG",
            Position::ShootingGuard => "SG",
            Position::SmallForward => "SF",
            Position::PowerForward => "PF",
            Position::Center => "C",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// NBA franchises, serialized as their nicknames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    Hawks,
    Celtics,
    Nets,
    Hornets,
    Bulls,
    Cavaliers,
    Mavericks,
    Nuggets,
    Pistons,
    Warriors,
    Rockets,
    Pacers,
    Clippers,
    Lakers,
    Grizzlies,
    Heat,
    Bucks,
    Timberwolves,
    Pelicans,
    Knicks,
    Thunder,
    Magic,
    #[serde(rename = "76ers")]
    SeventySixers,
    Suns,
    #[serde(rename = "Trail Blazers")]
    TrailBlazers,
    Kings,
    Spurs,
    Raptors,
    Jazz,
    Wizards,
}

impl Team {
    pub fn as_str(&self) -> &'static str {
        match self {
            Team::Hawks => "Hawks",
            Team::Celtics => "Celtics",
            Team::Nets => "Nets",
            Team::Hornets => "Hornets",
            Team::Bulls => "Bulls",
            Team::Cavaliers => "Cavaliers",
            Team::Mavericks => "Mavericks",
            Team::Nuggets => "Nuggets",
            Team::Pistons => "Pistons",
            Team::Warriors => "Warriors",
            Team::Rockets => "Rockets",
            Team::Pacers => "Pacers",
            Team::Clippers => "Clippers",
            Team::Lakers => "Lakers",
            Team::Grizzlies => "Grizzlies",
            Team::Heat => "Heat",
            Team::Bucks => "Bucks",
            Team::Timberwolves => "Timberwolves",
            Team::Pelicans => "Pelicans",
            Team::Knicks => "Knicks",
            Team::Thunder => "Thunder",
            Team::Magic => "Magic",
            Team::SeventySixers => "76ers",
            Team::Suns => "Suns",
            Team::TrailBlazers => "Trail Blazers",
            Team::Kings => "Kings",
            Team::Spurs => "Spurs",
            Team::Raptors => "Raptors",
            Team::Jazz => "Jazz",
            Team::Wizards => "Wizards",
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A player record as persisted in the players file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: u64,
    pub name: String,
    pub position: Position,
    pub age: u32,
    pub team: Team,
    pub ppg: f64,
    pub apg: f64,
    pub rpg: f64,
    pub championships: u32,
    pub all_star_appearances: u32,
}

impl Player {
    /// Weighted composite used for hall-of-fame candidacy.
    pub fn hall_of_fame_score(&self) -> f64 {
        self.ppg * 0.4
            + self.apg * 0.3
            + self.rpg * 0.2
            + f64::from(self.championships) * 10.0
    }
}

/// Request body for adding a player; the id is assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPlayer {
    pub name: String,
    pub position: Position,
    pub age: u32,
    pub team: Team,
    pub ppg: f64,
    pub apg: f64,
    pub rpg: f64,
    pub championships: u32,
    pub all_star_appearances: u32,
}

/// One name slot per position; null when no eligible player exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftSheet {
    #[serde(rename = "PG")]
    pub point_guard: Option<String>,
    #[serde(rename = "SG")]
    pub shooting_guard: Option<String>,
    #[serde(rename = "SF")]
    pub small_forward: Option<String>,
    #[serde(rename = "PF")]
    pub power_forward: Option<String>,
    #[serde(rename = "C")]
    pub center: Option<String>,
}

impl DraftSheet {
    pub fn slot(&self, position: Position) -> &Option<String> {
        match position {
            Position::PointGuard => &self.point_guard,
            Position::ShootingGuard => &self.shooting_guard,
            Position::SmallForward => &self.small_forward,
            Position::PowerForward => &self.power_forward,
            Position::Center => &self.center,
        }
    }
}

/// A generated draft as persisted in the drafts file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftRecord {
    pub id: u64,
    pub draft: DraftSheet,
}

/// Lookup result for endpoints that report "not found" inside a 200 body.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Lookup<T> {
    Found(T),
    Missing { error: String },
}

impl<T> Lookup<T> {
    pub fn missing(message: &str) -> Self {
        Lookup::Missing {
            error: message.to_string(),
        }
    }
}

// Response wrappers for the ranked and filtered player endpoints

#[derive(Debug, Serialize, Deserialize)]
pub struct TopScorersResponse {
    pub top_scorers: Vec<Player>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TopAssistersResponse {
    pub top_assisters: Vec<Player>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TopReboundersResponse {
    pub top_rebounders: Vec<Player>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChampionshipFilterResponse {
    pub min_championships: i64,
    pub players: Vec<Player>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TeamFilterResponse {
    pub team: Team,
    pub players: Vec<Player>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NoChampionshipsResponse {
    pub players: Vec<Player>,
    pub count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HallOfFameResponse {
    pub hall_of_fame_candidates: Vec<Player>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AllStarsResponse {
    pub min_appearances: i64,
    pub players: Vec<Player>,
}

/// Response for mutations that return the updated player.
#[derive(Debug, Serialize, Deserialize)]
pub struct MutationResponse {
    pub message: String,
    pub player: Player,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RandomDraftResponse {
    pub message: String,
    pub draft: DraftRecord,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(ppg: f64, apg: f64, rpg: f64, championships: u32) -> Player {
        Player {
            id: 1,
            name: "Test Player".to_string(),
            position: Position::PointGuard,
            age: 30,
            team: Team::Lakers,
            ppg,
            apg,
            rpg,
            championships,
            all_star_appearances: 0,
        }
    }

    #[test]
    fn hall_of_fame_score_weights() {
        let p = player(20.0, 10.0, 5.0, 2);
        // 20*0.4 + 10*0.3 + 5*0.2 + 2*10 = 8 + 3 + 1 + 20
        assert!((p.hall_of_fame_score() - 32.0).abs() < 1e-9);
    }

    #[test]
    fn position_codes_round_trip() {
        for position in Position::ALL {
            let json = serde_json::to_string(&position).unwrap();
            assert_eq!(json, format!("\"{}\"", position.as_str()));
            let back: Position = serde_json::from_str(&json).unwrap();
            assert_eq!(back, position);
        }
    }

    #[test]
    fn team_nicknames_with_spaces_and_digits() {
        assert_eq!(
            serde_json::to_string(&Team::SeventySixers).unwrap(),
            "\"76ers\""
        );
        let team: Team = serde_json::from_str("\"Trail Blazers\"").unwrap();
        assert_eq!(team, Team::TrailBlazers);
    }

    #[test]
    fn lookup_serializes_flat() {
        let found = Lookup::Found(player(1.0, 1.0, 1.0, 0));
        let value = serde_json::to_value(&found).unwrap();
        assert_eq!(value["name"], "Test Player");

        let missing: Lookup<Player> = Lookup::missing("Player not found");
        let value = serde_json::to_value(&missing).unwrap();
        assert_eq!(value["error"], "Player not found");
    }
}
