mod app;
mod player;
mod select;

pub use app::Reprise;

#[cfg(test)]
mod tests;
