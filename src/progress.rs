// src/progress.rs
/// Lightweight progress reporting for a run.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the number of input lines.
    fn begin(&mut self, _total: usize) {}

    /// A new input line is being handled (`index` is 0-based).
    fn item_start(&mut self, _index: usize, _name: &str) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called at the end with the names we got no data for.
    fn finish(&mut self, _failed: &[String]) {}
}

/// Prints progress to stdout, one line per event.
#[derive(Default)]
pub struct ConsoleProgress {
    total: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }

    fn item_start(&mut self, index: usize, name: &str) {
        println!("Processing {}/{}: {}", index + 1, self.total, name);
    }

    fn log(&mut self, msg: &str) {
        println!("\t{msg}");
    }

    fn finish(&mut self, failed: &[String]) {
        if failed.is_empty() {
            return;
        }
        println!("\nFailed to retrieve data for the following companies:");
        for name in failed {
            println!("\t- {name}");
        }
    }
}

/// Collects messages in memory. Handy in tests.
#[derive(Default, Debug)]
pub struct RecordingProgress {
    pub lines: Vec<String>,
}

impl Progress for RecordingProgress {
    fn item_start(&mut self, index: usize, name: &str) {
        self.lines.push(format!("[{}] {}", index + 1, name));
    }

    fn log(&mut self, msg: &str) {
        self.lines.push(s!(msg));
    }
}
