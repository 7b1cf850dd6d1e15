pub mod drafts;
pub mod health;
pub mod players;
