mod state;

pub use state::Screen;
