//! Progress bar display for module builds

use indicatif::{ProgressBar, ProgressStyle};

/// Progress display for a bundle build
pub struct ProgressDisplay {
    /// One tick per built module
    module_pb: ProgressBar,
}

impl ProgressDisplay {
    /// Create a new progress display with total module count
    pub fn new(total_modules: u64) -> Self {
        let style = ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");

        let module_pb = ProgressBar::new(total_modules);
        module_pb.set_style(style);

        Self { module_pb }
    }

    /// Show the module currently being built
    pub fn update_module(&self, classname: &str) {
        let display_name = if classname.len() > 50 {
            let start = classname.len() - 47;
            let start = (start..classname.len())
                .find(|&i| classname.is_char_boundary(i))
                .unwrap_or(start);
            format!("...{}", &classname[start..])
        } else {
            classname.to_string()
        };
        self.module_pb.set_message(display_name);
    }

    /// Increment module progress
    pub fn inc_module(&self) {
        self.module_pb.inc(1);
    }

    pub fn finish(&self) {
        self.module_pb.finish_and_clear();
    }

    /// Abandon on error
    pub fn abandon(&self) {
        self.module_pb.abandon();
    }
}
