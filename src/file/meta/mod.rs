mod tempo;
pub use tempo::*;
