//! Start and stop banners printed around a session

const TAG_INFO: &str = "\x1b[1;36m[INFO]\x1b[0m";
const TAG_SUCCESS: &str = "\x1b[1;32m[SUCCESS]\x1b[0m";

/// Lifecycle points a session announces on stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Milestone {
    Starting { mode: String, source: String },
    ShuttingDown,
    Exited,
}

impl Milestone {
    fn line(&self) -> String {
        match self {
            Self::Starting { mode, source } => {
                format!("{} Starting {} mode watching {}", TAG_INFO, mode, source)
            }
            Self::ShuttingDown => format!("{} Shutting down...", TAG_INFO),
            Self::Exited => format!("{} Speedmeter exited successfully", TAG_SUCCESS),
        }
    }
}

pub fn print_session_starting(mode: &str, source: &str) {
    let milestone = Milestone::Starting {
        mode: mode.to_string(),
        source: source.to_string(),
    };
    println!("{}", milestone.line());
}

pub fn print_session_shutdown() {
    println!("{}", Milestone::ShuttingDown.line());
}

pub fn print_session_exit_success() {
    println!("{}", Milestone::Exited.line());
}
