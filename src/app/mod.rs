// Interactive layer: prompts, report rendering, raw-data pager, session loop.

pub mod console;
pub mod pager;
pub mod prompts;
pub mod report;
pub mod session;
