use console_logging::{console_debug, console_warn};

/// Poll sequence number assigned by the poller, one per issued request.
pub type PollSeq = u64;

#[derive(Debug, Clone, PartialEq)]
pub struct StatusSnapshot {
    pub message: String,
    /// Not clamped; the engine may report values outside 0..=100.
    pub percent: f64,
    pub running: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Neutral,
    Accent,
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Badge {
    #[default]
    Connecting,
    Downloading,
    Completed,
    Disconnected,
}

impl Badge {
    pub fn label(self) -> &'static str {
        match self {
            Badge::Connecting => "Connecting",
            Badge::Downloading => "Downloading",
            Badge::Completed => "Completed",
            Badge::Disconnected => "Disconnected",
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            Badge::Connecting => Tone::Neutral,
            Badge::Downloading => Tone::Accent,
            Badge::Completed => Tone::Success,
            Badge::Disconnected => Tone::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatusPanel {
    message: String,
    percent: f64,
    bar_tone: Tone,
    badge: Badge,
    last_seq: Option<PollSeq>,
}

impl StatusPanel {
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn percent(&self) -> f64 {
        self.percent
    }

    pub fn bar_tone(&self) -> Tone {
        self.bar_tone
    }

    pub fn badge(&self) -> Badge {
        self.badge
    }

    /// Claims `seq` for rendering unless a newer poll was already rendered.
    fn claim(&mut self, seq: PollSeq) -> bool {
        if self.last_seq.is_some_and(|last| seq <= last) {
            console_debug!(
                "Discarding stale status poll seq={} last={:?}",
                seq,
                self.last_seq
            );
            return false;
        }
        self.last_seq = Some(seq);
        true
    }

    pub fn apply_snapshot(&mut self, seq: PollSeq, snapshot: StatusSnapshot) -> bool {
        if !self.claim(seq) {
            return false;
        }
        self.message = snapshot.message;
        self.percent = snapshot.percent;
        if snapshot.percent >= 100.0 {
            self.bar_tone = Tone::Success;
            self.badge = Badge::Completed;
        } else if snapshot.running {
            self.badge = Badge::Downloading;
        }
        // Not running and below 100: badge and bar tone stay as they were.
        true
    }

    pub fn apply_failure(&mut self, seq: PollSeq, reason: &str) -> bool {
        if !self.claim(seq) {
            return false;
        }
        if self.badge != Badge::Disconnected {
            console_warn!("Status poll failed: {}", reason);
        }
        self.badge = Badge::Disconnected;
        true
    }

    /// Rounded percentage label, e.g. `"40%"`. Halves round up.
    pub fn percent_text(&self) -> String {
        format!("{}%", (self.percent + 0.5).floor())
    }

    /// Bar width as a CSS-style percentage, passed through unclamped.
    pub fn bar_width(&self) -> String {
        format!("{}%", self.percent)
    }
}
