//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements       | Connects to                 |
//! |----------------|------------------|-----------------------------|
//! | `console`      | (input)          | stdin → `EventQueue`        |
//! | `cue_sink`     | EventSink        | terminal output + bell      |
//! | `image_cache`  | ImagePort        | pose image files, memoized  |
//! | `log_sink`     | EventSink        | `log` facade                |
//! | `prefs`        | PreferencePort   | JSON file / in-memory map   |

pub mod console;
pub mod cue_sink;
pub mod image_cache;
pub mod log_sink;
pub mod prefs;
