#[path = "offline/mock.rs"]
mod mock;

#[path = "offline/lifecycle.rs"]
mod lifecycle;

#[path = "offline/strategies.rs"]
mod strategies;
