//! Configuration section definitions.
//!
//! Each module corresponds to a section in `webpipe.toml`:
//!
//! | Module   | TOML Section | Purpose                                 |
//! |----------|--------------|-----------------------------------------|
//! | `output` | `[output]`   | Output directory and filename templates |
//! | `serve`  | `[serve]`    | Dev server and live-reload proxy        |
//! | `notify` | `[notify]`   | Desktop build notifications             |
//! | `html`   | `[html]`     | Extra generated HTML documents          |

mod html;
mod notify;
mod output;
mod serve;

pub use html::{HtmlConfig, INDEX_PAGE};
pub use notify::NotifyConfig;
pub use output::OutputConfig;
pub use serve::ServeConfig;
