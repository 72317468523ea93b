//! Run configuration for fusion prediction.

/// Minimum number of residues a 5' domain must retain to survive truncation.
pub const MIN_DOMAIN_LENGTH: i64 = 5;

/// Character inserted between the two fragments when junction marking is on.
pub const JUNCTION_MARKER: char = '*';

/// Annotation track projected when none is configured.
pub const DEFAULT_TRACK: &str = "pfam";

/// Settings shared by every fusion transcript built in one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Minimum retained length for 5' domains straddling the junction.
    pub min_domain_length: i64,
    /// Insert `JUNCTION_MARKER` between the 5' and 3' fragments.
    pub junction_marker: bool,
    /// Domain annotation tracks to project, in output order.
    pub tracks: Vec<String>,
    /// Worker threads for enumeration (None = rayon default).
    pub threads: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Config {
            min_domain_length: MIN_DOMAIN_LENGTH,
            junction_marker: false,
            tracks: vec![DEFAULT_TRACK.to_string()],
            threads: None,
        }
    }

    /// The marker character, if junction marking is enabled.
    pub fn marker(&self) -> Option<char> {
        if self.junction_marker {
            Some(JUNCTION_MARKER)
        } else {
            None
        }
    }

    /// Parse a comma-separated list of annotation tracks.
    ///
    /// Returns false (leaving the current tracks untouched) if the list is
    /// empty or names the same track twice.
    pub fn parse_tracks(&mut self, tracks_str: &str) -> bool {
        let mut tracks: Vec<String> = Vec::new();
        for track in tracks_str.split(',') {
            let track = track.trim();
            if track.is_empty() || tracks.iter().any(|t| t == track) {
                return false;
            }
            tracks.push(track.to_string());
        }
        if tracks.is_empty() {
            return false;
        }
        self.tracks = tracks;
        true
    }
}
