// Fretboard geometry: tuning, fret bound, and physical distances.
//
// The fret distance table uses equal-tempered spacing: fret f sits at
// neck_length / 2^(f/12) from the bridge, so the 12th fret is at half the
// neck and high frets crowd together. String spacing is uniform. These
// distances feed the travel cost in distance.rs.

/// A tuning plus the physical dimensions the distance scorer needs.
#[derive(Debug, Clone)]
pub struct Fretboard {
    /// Open-string pitches in tab line order.
    pub tuning: Vec<i32>,
    /// Highest playable fret.
    pub max_fret: u8,
    /// Inches between adjacent strings.
    pub string_spacing: f64,
    fret_distances: Vec<f64>,
}

impl Fretboard {
    /// Build a fretboard and precompute the fret distance table.
    pub fn new(tuning: Vec<i32>, max_fret: u8, neck_length: f64, string_spacing: f64) -> Self {
        let fret_distances = (0..=max_fret as u32)
            .map(|fret| neck_length / 2f64.powf(f64::from(fret) / 12.0))
            .collect();
        Fretboard {
            tuning,
            max_fret,
            string_spacing,
            fret_distances,
        }
    }

    /// Number of strings.
    pub fn strings(&self) -> usize {
        self.tuning.len()
    }

    /// Whether `pitch` is reachable on a string with open pitch `open`.
    pub fn reachable(&self, pitch: i32, open: i32) -> bool {
        open <= pitch && pitch <= open + i32::from(self.max_fret)
    }

    /// Distance of a fret from the bridge, in inches.
    pub fn fret_distance(&self, fret: u8) -> f64 {
        self.fret_distances[fret as usize]
    }

    /// The pitch sounded by fretting `fret` on string `string`.
    pub fn pitch_at(&self, string: usize, fret: u8) -> i32 {
        self.tuning[string] + i32::from(fret)
    }
}
