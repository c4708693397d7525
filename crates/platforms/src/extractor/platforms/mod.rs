pub mod goodgame;
pub mod twitch;
