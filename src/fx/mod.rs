//! Pure per-frame state and geometry for every decorative
//! component. Nothing here touches the DOM; `web` wires these to the page.

pub mod counter;
pub mod cursor;
pub mod hero;
pub mod orb;
pub mod parallax;
pub mod particles;
pub mod reveal;
pub mod spectrum;
pub mod tilt;
pub mod waveform;
