const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct Spinner {
    pub message: String,
    pub frame: usize,
    pub spinning: bool,
}

impl Spinner {
    pub fn new() -> Self {
        Self {
            message: String::new(),
            frame: 0,
            spinning: false,
        }
    }

    pub fn start(&mut self, message: &str) {
        self.message = message.to_string();
        self.spinning = true;
    }

    pub fn stop(&mut self) {
        self.spinning = false;
        self.frame = 0;
    }

    pub fn tick(&mut self) {
        if self.spinning {
            self.frame = (self.frame + 1) % FRAMES.len();
        }
    }

    pub fn glyph(&self) -> &'static str {
        FRAMES[self.frame % FRAMES.len()]
    }
}
